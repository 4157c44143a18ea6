// crates/ggb-core/src/section/report.rs

use std::time::Duration;

use crate::encode::line::LineStats;
use crate::error::GgError;
use crate::section::partition::SectionRange;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildStatus {
    Built { placements: usize },
    /// The section artifact already existed; nothing was encoded.
    Skipped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixtureStatus {
    NotSampled,
    Written,
    AlreadyPresent,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionReport {
    pub range: SectionRange,
    pub status: BuildStatus,
    pub fixture: FixtureStatus,
    pub stats: LineStats,
    pub elapsed: Duration,
}

impl SectionReport {
    pub fn index(&self) -> usize {
        self.range.index
    }

    pub fn skipped(&self) -> bool {
        self.status == BuildStatus::Skipped
    }
}

/// A section that could not be finished. Other sections are unaffected.
#[derive(Debug)]
pub struct SectionFailure {
    pub index: usize,
    pub error: GgError,
}

impl std::fmt::Display for SectionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // the error already names the section
        match &self.error {
            GgError::Section { .. } => write!(f, "{}", self.error),
            other => write!(f, "section {}: {}", self.index, other),
        }
    }
}
