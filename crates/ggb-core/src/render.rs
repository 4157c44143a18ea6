// crates/ggb-core/src/render.rs
//
// Hand-off point to whatever materializes a section's placements.
// The default backend persists them as a GGS1 artifact; a mesh exporter
// can implement the same trait.

use std::path::Path;

use crate::artifact::section::{self, SectionArtifact};
use crate::error::Result;
use crate::layout::{ChannelGuides, MarkerPlacement};
use crate::section::partition::SectionRange;

/// Materializes and persists one section.
///
/// Called concurrently from worker threads, each call with its own
/// `out` path.
pub trait Renderer: Sync {
    fn render(
        &self,
        range: &SectionRange,
        reference_id: [u8; 16],
        placements: Vec<MarkerPlacement>,
        out: &Path,
    ) -> Result<()>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ArtifactRenderer {
    pub guides: ChannelGuides,
}

impl Renderer for ArtifactRenderer {
    fn render(
        &self,
        range: &SectionRange,
        reference_id: [u8; 16],
        placements: Vec<MarkerPlacement>,
        out: &Path,
    ) -> Result<()> {
        let artifact = SectionArtifact {
            section: range.index,
            first_line: range.start,
            line_count: range.len(),
            reference_id,
            guides: self.guides,
            placements,
        };
        section::write_file(out, &artifact)
    }
}
