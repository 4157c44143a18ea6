// crates/ggb-core/src/section/partition.rs

use std::ops::Range;

use crate::error::{GgError, Result};

/// Half-open line range `[start, end)` of section `index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionRange {
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

impl SectionRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn lines(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// `ceil(total / chunk)`.
pub fn section_count(total: usize, chunk: usize) -> usize {
    if chunk == 0 {
        return 0;
    }
    total.div_ceil(chunk)
}

/// Split `[0, total)` into contiguous chunks of `chunk` lines; the last
/// one may be shorter. No empty trailing section is produced.
pub fn partition(total: usize, chunk: usize) -> Result<Vec<SectionRange>> {
    if chunk == 0 {
        return Err(GgError::Config("chunk size must be > 0".into()));
    }
    let out = (0..section_count(total, chunk))
        .map(|index| {
            let start = index * chunk;
            SectionRange {
                index,
                start,
                end: (start + chunk).min(total),
            }
        })
        .collect();
    Ok(out)
}
