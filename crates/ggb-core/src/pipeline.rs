// crates/ggb-core/src/pipeline.rs
//
// Whole-run orchestration:
//   partition -> sample fixtures (fatal on oversample) -> build sections
//   in parallel -> summarize -> optional assembly

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::artifact::assembly;
use crate::artifact::paths::OutputPaths;
use crate::config::BuildConfig;
use crate::encode::line::LineStats;
use crate::error::{GgError, Result};
use crate::reference::table::ReferenceTable;
use crate::render::Renderer;
use crate::section::builder::SectionBuilder;
use crate::section::partition::partition;
use crate::section::report::{BuildStatus, FixtureStatus, SectionFailure, SectionReport};
use crate::section::sampler::sample_sections;
use crate::section::scheduler::run_sections;

#[derive(Debug, Default)]
pub struct BuildSummary {
    pub total_lines: usize,
    pub sections: usize,
    pub sampled: BTreeSet<usize>,
    pub reports: Vec<SectionReport>,
    pub failures: Vec<SectionFailure>,
    pub stats: LineStats,
    /// No reference table: nothing was encoded or written.
    pub encoding_disabled: bool,
    pub reference_id: Option<String>,
    pub assembly: Option<PathBuf>,
    pub elapsed: Duration,
}

impl BuildSummary {
    pub fn built(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.status, BuildStatus::Built { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.reports.iter().filter(|r| r.skipped()).count()
    }

    pub fn fixtures_written(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| r.fixture == FixtureStatus::Written)
            .count()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Choose the fixture sections for a run over `section_count` sections.
pub fn pick_fixture_sections(config: &BuildConfig, section_count: usize) -> Result<BTreeSet<usize>> {
    if !config.produce_fixtures || config.sample_count == 0 {
        return Ok(BTreeSet::new());
    }
    let Some(max_index) = section_count.checked_sub(1) else {
        return Err(GgError::Oversample {
            requested: config.sample_count,
            available: 0,
        });
    };
    let mut rng = match config.sample_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    sample_sections(&mut rng, config.sample_count, max_index)
}

/// Run the full build.
///
/// Errors returned here are whole-run failures (bad config, oversample,
/// output directories not creatable, assembly). Per-section failures are
/// collected in the summary instead.
pub fn run_build(
    config: &BuildConfig,
    reference: Option<&ReferenceTable>,
    lines: &[String],
    paths: &OutputPaths,
    renderer: &dyn Renderer,
) -> Result<BuildSummary> {
    let started = Instant::now();
    config.validate()?;

    let ranges = partition(lines.len(), config.chunk_size)?;
    log::info!(
        "{} lines to process in {} sections of {}",
        lines.len(),
        ranges.len(),
        config.chunk_size
    );

    let sampled = pick_fixture_sections(config, ranges.len())?;
    if !sampled.is_empty() {
        log::info!("sections selected as fixtures: {:?}", sampled);
    }

    let mut summary = BuildSummary {
        total_lines: lines.len(),
        sections: ranges.len(),
        sampled,
        ..Default::default()
    };

    let Some(reference) = reference else {
        log::warn!("no command reference loaded, skipping model generation");
        summary.encoding_disabled = true;
        summary.elapsed = started.elapsed();
        return Ok(summary);
    };
    summary.reference_id = Some(reference.id_hex());

    for s in reference.shadowed_overloads() {
        log::warn!(
            "reference: {} entry #{} is shadowed by entry #{} and will never be chosen",
            s.name,
            s.later,
            s.earlier
        );
    }

    paths.create_dirs(!summary.sampled.is_empty())?;

    let builder = SectionBuilder {
        reference,
        lines,
        fixtures: &summary.sampled,
        paths,
        renderer,
        show_lines: config.show_lines,
    };
    let outcomes = run_sections(&builder, &ranges, config.workers)?;

    for outcome in outcomes {
        match outcome {
            Ok(rep) => {
                summary.stats.merge(&rep.stats);
                summary.reports.push(rep);
            }
            Err(f) => summary.failures.push(f),
        }
    }

    report_dropped(&summary.stats);

    if config.produce_assembly {
        if summary.is_success() && summary.sections > 0 {
            summary.assembly = Some(write_assembly(paths, summary.sections)?);
        } else {
            log::warn!(
                "assembly skipped: {} failed sections",
                summary.failures.len()
            );
        }
    }

    summary.elapsed = started.elapsed();
    Ok(summary)
}

/// Stack sections `0..section_count` into `<stem>_PIP.gga`.
pub fn write_assembly(paths: &OutputPaths, section_count: usize) -> Result<PathBuf> {
    let a = assembly::assemble(paths, section_count)?;
    let out = paths.assembly();
    assembly::write_file(&out, &a)?;
    log::info!(
        "assembly written: {} ({} sections, {} placements)",
        out.display(),
        a.parts.len(),
        a.placement_count()
    );
    Ok(out)
}

fn report_dropped(stats: &LineStats) {
    if stats.unknown_commands > 0 {
        log::warn!("{} lines dropped: unknown command", stats.unknown_commands);
    }
    if stats.partial_lines > 0 {
        log::warn!(
            "{} lines used parameters no overload declares; those fields were dropped",
            stats.partial_lines
        );
    }
    if stats.dropped_fields() > 0 {
        log::warn!(
            "{} parameter fields dropped ({} unknown, {} malformed)",
            stats.dropped_fields(),
            stats.unknown_parameters,
            stats.malformed_tokens
        );
    }
    if stats.ambiguous_lines > 0 {
        log::warn!(
            "{} lines matched several overloads; first match used",
            stats.ambiguous_lines
        );
    }
}
