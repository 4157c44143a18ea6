// crates/ggb-cli/src/io/config_file.rs

use anyhow::{Context, Result};
use ggb_core::BuildConfig;

/// Defaults when no path is given.
pub fn load(path: Option<&str>) -> Result<BuildConfig> {
    match path {
        Some(p) => BuildConfig::load_from_file(std::path::Path::new(p))
            .with_context(|| format!("load config {p}")),
        None => Ok(BuildConfig::default()),
    }
}
