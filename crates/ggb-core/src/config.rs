// crates/ggb-core/src/config.rs

use std::path::Path;

use serde::Deserialize;

use crate::error::{GgError, Result};

/// Lines per section.
pub const DEFAULT_CHUNK_SIZE: usize = 90;

/// Sections sampled as test fixtures per run.
pub const DEFAULT_SAMPLE_COUNT: usize = 8;

/// Process-level options of a build run.
///
/// Every field has a default, so an empty TOML document is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Lines per section. Only settable from a config file.
    pub chunk_size: usize,
    /// How many section indices to capture as fixtures.
    pub sample_count: usize,
    /// Capture fixtures at all.
    pub produce_fixtures: bool,
    /// Stack the finished sections into one combined artifact.
    pub produce_assembly: bool,
    /// Log every processed line at debug level.
    pub show_lines: bool,
    /// Worker threads; 0 means one per CPU.
    pub workers: usize,
    /// Fixed seed for the fixture sampler. Random per run when absent.
    pub sample_seed: Option<u64>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            sample_count: DEFAULT_SAMPLE_COUNT,
            produce_fixtures: true,
            produce_assembly: false,
            show_lines: false,
            workers: 0,
            sample_seed: None,
        }
    }
}

impl BuildConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(content).map_err(|e| GgError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(GgError::Config("chunk_size must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let cfg = BuildConfig::from_toml("").unwrap();
        assert_eq!(cfg, BuildConfig::default());
        assert_eq!(cfg.chunk_size, 90);
        assert_eq!(cfg.sample_count, 8);
        assert!(cfg.produce_fixtures);
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = BuildConfig::from_toml(
            "chunk_size = 10\nsample_count = 2\nproduce_fixtures = false\nsample_seed = 7\n",
        )
        .unwrap();
        assert_eq!(cfg.chunk_size, 10);
        assert_eq!(cfg.sample_count, 2);
        assert!(!cfg.produce_fixtures);
        assert_eq!(cfg.sample_seed, Some(7));
    }

    #[test]
    fn rejects_zero_chunk_and_unknown_keys() {
        assert!(BuildConfig::from_toml("chunk_size = 0").is_err());
        assert!(BuildConfig::from_toml("chunk = 3").is_err());
    }
}
