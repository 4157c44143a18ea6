// crates/ggb-core/src/section/scheduler.rs
//
// Fan-out of section builds over a fixed rayon pool. Workers share only
// immutable inputs and write disjoint files, so there is no locking.

use rayon::prelude::*;

use crate::error::{GgError, Result};
use crate::section::builder::SectionBuilder;
use crate::section::partition::SectionRange;
use crate::section::report::{SectionFailure, SectionReport};

pub type SectionOutcome = std::result::Result<SectionReport, SectionFailure>;

/// Build every range on a pool of `workers` threads (0 = one per CPU).
///
/// One outcome per range, in range order. A failing section does not
/// stop the others.
pub fn run_sections(
    builder: &SectionBuilder<'_>,
    ranges: &[SectionRange],
    workers: usize,
) -> Result<Vec<SectionOutcome>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("ggb-section-{i}"))
        .build()
        .map_err(|e| GgError::Scheduler(e.to_string()))?;

    log::debug!(
        "scheduling {} sections on {} workers",
        ranges.len(),
        pool.current_num_threads()
    );

    let outcomes = pool.install(|| {
        ranges
            .par_iter()
            .map(|range| {
                builder.build(range).map_err(|error| {
                    log::error!("section {} failed: {error}", range.index);
                    SectionFailure {
                        index: range.index,
                        error,
                    }
                })
            })
            .collect::<Vec<_>>()
    });

    Ok(outcomes)
}
