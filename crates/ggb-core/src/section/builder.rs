// crates/ggb-core/src/section/builder.rs

use std::collections::BTreeSet;
use std::time::Instant;

use crate::artifact::fixture::write_fixture;
use crate::artifact::paths::OutputPaths;
use crate::encode::line::{encode_line, LineStats};
use crate::error::{GgError, Result};
use crate::layout::MarkerPlacement;
use crate::reference::table::ReferenceTable;
use crate::render::Renderer;
use crate::section::partition::SectionRange;
use crate::section::report::{BuildStatus, FixtureStatus, SectionReport};

#[derive(Debug, Default)]
pub struct SectionEncoding {
    pub placements: Vec<MarkerPlacement>,
    pub stats: LineStats,
}

/// Encode every line of `range`; row numbers restart at 0 per section.
pub fn encode_section(
    reference: &ReferenceTable,
    lines: &[String],
    range: &SectionRange,
    show_lines: bool,
) -> Result<SectionEncoding> {
    let slice = section_lines(lines, range)?;
    let mut out = SectionEncoding::default();
    for (row, line) in slice.iter().enumerate() {
        if show_lines {
            log::debug!("section {} row {row}: {line}", range.index);
        }
        let enc = encode_line(reference, line, row);
        if let Some(err) = enc.issues.into_iter().find(|e| !e.is_recoverable()) {
            return Err(err);
        }
        out.stats.merge(&enc.stats);
        out.placements.extend(enc.placements);
    }
    Ok(out)
}

fn section_lines<'a>(lines: &'a [String], range: &SectionRange) -> Result<&'a [String]> {
    lines.get(range.lines()).ok_or_else(|| {
        GgError::Config(format!(
            "section {} spans lines {}..{} but only {} lines are loaded",
            range.index,
            range.start,
            range.end,
            lines.len()
        ))
    })
}

/// Everything one section build reads. All of it is shared read-only
/// between workers; each build writes only its own artifact and fixture.
pub struct SectionBuilder<'a> {
    pub reference: &'a ReferenceTable,
    pub lines: &'a [String],
    pub fixtures: &'a BTreeSet<usize>,
    pub paths: &'a OutputPaths,
    pub renderer: &'a dyn Renderer,
    pub show_lines: bool,
}

impl SectionBuilder<'_> {
    /// Build one section unless its artifact exists, then capture its
    /// fixture if sampled. The two outputs are checked independently.
    pub fn build(&self, range: &SectionRange) -> Result<SectionReport> {
        self.build_inner(range).map_err(|e| e.in_section(range.index))
    }

    fn build_inner(&self, range: &SectionRange) -> Result<SectionReport> {
        let started = Instant::now();
        let out = self.paths.section_artifact(range.index);

        let (status, stats) = if out.exists() {
            log::info!("section {} already exists, skipping", range.index);
            (BuildStatus::Skipped, LineStats::default())
        } else {
            log::info!("section {} starting ({} lines)", range.index, range.len());
            let enc = encode_section(self.reference, self.lines, range, self.show_lines)?;
            let placements = enc.placements.len();
            self.renderer
                .render(range, self.reference.id(), enc.placements, &out)?;
            log::info!(
                "section {} completed in {:.3}s ({} placements)",
                range.index,
                started.elapsed().as_secs_f64(),
                placements
            );
            (BuildStatus::Built { placements }, enc.stats)
        };

        let fixture = if self.fixtures.contains(&range.index) {
            let lines = section_lines(self.lines, range)?;
            let status = write_fixture(&self.paths.fixture(range.index), lines)?;
            if status == FixtureStatus::Written {
                log::info!("section {} fixture written", range.index);
            }
            status
        } else {
            FixtureStatus::NotSampled
        };

        Ok(SectionReport {
            range: *range,
            status,
            fixture,
            stats,
            elapsed: started.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::fixture::read_fixture;
    use crate::artifact::section;
    use crate::reference::entry::CommandEntry;
    use crate::render::ArtifactRenderer;
    use crate::section::partition::partition;

    fn reference() -> ReferenceTable {
        ReferenceTable::from_entries(vec![
            CommandEntry::new("G1", 1, [('X', 1), ('Y', 2)]).unwrap(),
        ])
        .unwrap()
    }

    fn lines(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("G1 X{i}")).collect()
    }

    #[test]
    fn rows_restart_per_section() {
        let r = reference();
        let buf = lines(12);
        let parts = partition(buf.len(), 5).unwrap();
        let enc = encode_section(&r, &buf, &parts[1], false).unwrap();
        let max_row = enc.placements.iter().map(|p| p.row).max().unwrap();
        assert_eq!(max_row, 4);
        assert_eq!(enc.stats.lines, 5);
    }

    #[test]
    fn out_of_range_section_is_an_error() {
        let r = reference();
        let buf = lines(3);
        let bad = SectionRange { index: 0, start: 0, end: 4 };
        assert!(encode_section(&r, &buf, &bad, false).is_err());
    }

    #[test]
    fn existing_artifact_is_skipped_but_fixture_still_written() {
        let dir = tempfile::tempdir().unwrap();
        let paths = OutputPaths::new(dir.path(), "T");
        paths.create_dirs(true).unwrap();

        let r = reference();
        let buf = lines(20);
        let parts = partition(buf.len(), 5).unwrap();
        let fixtures: BTreeSet<usize> = [3].into_iter().collect();
        let renderer = ArtifactRenderer::default();
        let builder = SectionBuilder {
            reference: &r,
            lines: &buf,
            fixtures: &fixtures,
            paths: &paths,
            renderer: &renderer,
            show_lines: false,
        };

        std::fs::write(paths.section_artifact(3), b"placeholder").unwrap();
        let rep = builder.build(&parts[3]).unwrap();
        assert!(rep.skipped());
        assert_eq!(rep.fixture, FixtureStatus::Written);
        assert_eq!(
            read_fixture(&paths.fixture(3)).unwrap(),
            buf[15..20].to_vec()
        );
        // untouched
        assert_eq!(std::fs::read(paths.section_artifact(3)).unwrap(), b"placeholder");

        let again = builder.build(&parts[3]).unwrap();
        assert_eq!(again.fixture, FixtureStatus::AlreadyPresent);

        let fresh = builder.build(&parts[0]).unwrap();
        assert!(matches!(fresh.status, BuildStatus::Built { placements } if placements > 0));
        assert_eq!(fresh.fixture, FixtureStatus::NotSampled);
        let art = section::read_file(&paths.section_artifact(0)).unwrap();
        assert_eq!(art.line_count, 5);
        assert_eq!(art.reference_id, r.id());
    }
}
