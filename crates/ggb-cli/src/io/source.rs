// crates/ggb-cli/src/io/source.rs
//
// Input G-code -> line buffer, through the `<stem>_minimal.gcode` cache
// kept next to the input.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ggb_core::artifact::write_atomic;
use ggb_core::line::minimize;

const MINIMAL_SUFFIX: &str = "_minimal.gcode";

pub struct Source {
    pub stem: String,
    pub lines: Vec<String>,
    pub cache: PathBuf,
    pub cache_reused: bool,
}

pub fn stem_of(input: &Path) -> Result<String> {
    input
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .with_context(|| format!("input {} has no usable file stem", input.display()))
}

pub fn minimal_path(input: &Path, stem: &str) -> PathBuf {
    input.with_file_name(format!("{stem}{MINIMAL_SUFFIX}"))
}

pub fn load(input: &Path) -> Result<Source> {
    let stem = stem_of(input)?;
    let cache = minimal_path(input, &stem);

    if cache.exists() {
        let text = std::fs::read_to_string(&cache)
            .with_context(|| format!("read minimal cache {}", cache.display()))?;
        // the cache is already minimal; running it through again is a no-op
        // that also tolerates hand edits
        let lines = minimize(&text);
        log::info!("reusing {} ({} lines)", cache.display(), lines.len());
        return Ok(Source {
            stem,
            lines,
            cache,
            cache_reused: true,
        });
    }

    let text = std::fs::read_to_string(input)
        .with_context(|| format!("read input {}", input.display()))?;
    let lines = minimize(&text);

    let mut body = lines.join("\n");
    if !body.is_empty() {
        body.push('\n');
    }
    write_atomic(&cache, body.as_bytes())
        .with_context(|| format!("write minimal cache {}", cache.display()))?;
    log::info!(
        "minimized {} -> {} ({} lines)",
        input.display(),
        cache.display(),
        lines.len()
    );

    Ok(Source {
        stem,
        lines,
        cache,
        cache_reused: false,
    })
}

/// `--out-dir`, or the directory holding the input.
pub fn out_dir(explicit: Option<&str>, input: &Path) -> PathBuf {
    match explicit {
        Some(d) => PathBuf::from(d),
        None => input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    }
}
