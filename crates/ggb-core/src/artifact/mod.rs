// crates/ggb-core/src/artifact/mod.rs
//
// Persisted outputs: section artifacts (GGS1), the stacked assembly
// (GGA1) and fixture text files, plus the directory naming they share.

pub mod assembly;
pub mod codec;
pub mod fixture;
pub mod paths;
pub mod section;

use std::io::Write;
use std::path::Path;

use crate::error::{GgError, Result};

pub use assembly::{assemble, Assembly, AssemblyPart, STACK_PITCH};
pub use paths::OutputPaths;
pub use section::SectionArtifact;

/// Write `bytes` to `path` through a temp file in the same directory,
/// so readers only ever see a missing or a complete file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| GgError::Io(e.error))?;
    Ok(())
}
