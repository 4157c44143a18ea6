// crates/ggb-cli/src/io/reference_file.rs

use anyhow::{Context, Result};
use ggb_core::reference::format;
use ggb_core::ReferenceTable;

/// `Ok(None)` when the file is missing or declares no commands.
pub fn load(path: &str) -> Result<Option<ReferenceTable>> {
    let table = format::load_from_file(std::path::Path::new(path))
        .with_context(|| format!("load reference {path}"))?;
    match &table {
        Some(t) => log::info!(
            "reference {path}: {} commands, id {}",
            t.len(),
            t.id_hex()
        ),
        None => log::warn!("reference {path} missing or empty"),
    }
    Ok(table)
}

/// Same as [`load`] but absence is an error.
pub fn require(path: &str) -> Result<ReferenceTable> {
    match load(path)? {
        Some(t) => Ok(t),
        None => anyhow::bail!("reference {path} not found or declares no commands"),
    }
}
