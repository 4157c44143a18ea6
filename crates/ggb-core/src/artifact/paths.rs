// crates/ggb-core/src/artifact/paths.rs

use std::path::{Path, PathBuf};

/// Deterministic output names for one input, rooted at an output dir.
///
/// ```text
/// <root>/<stem>_SECTIONS/<stem>Section<i>.ggs
/// <root>/<stem>_TESTCASES/Case<i>.txt
/// <root>/<stem>_PIP.gga
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPaths {
    root: PathBuf,
    stem: String,
}

impl OutputPaths {
    pub fn new(root: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            stem: stem.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn sections_dir(&self) -> PathBuf {
        self.root.join(format!("{}_SECTIONS", self.stem))
    }

    pub fn fixtures_dir(&self) -> PathBuf {
        self.root.join(format!("{}_TESTCASES", self.stem))
    }

    pub fn section_artifact(&self, index: usize) -> PathBuf {
        self.sections_dir()
            .join(format!("{}Section{}.ggs", self.stem, index))
    }

    pub fn fixture(&self, index: usize) -> PathBuf {
        self.fixtures_dir().join(format!("Case{index}.txt"))
    }

    pub fn assembly(&self) -> PathBuf {
        self.root.join(format!("{}_PIP.gga", self.stem))
    }

    pub fn create_dirs(&self, fixtures: bool) -> std::io::Result<()> {
        std::fs::create_dir_all(self.sections_dir())?;
        if fixtures {
            std::fs::create_dir_all(self.fixtures_dir())?;
        }
        Ok(())
    }
}
