// crates/ggb-core/src/artifact/fixture.rs
//
// Test fixtures: the verbatim source lines of one sampled section.

use std::path::Path;

use crate::artifact::write_atomic;
use crate::error::Result;
use crate::section::report::FixtureStatus;

/// Write `lines` (one per line, newline-terminated) unless `path` exists.
pub fn write_fixture<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<FixtureStatus> {
    if path.exists() {
        return Ok(FixtureStatus::AlreadyPresent);
    }
    let mut text = String::with_capacity(lines.iter().map(|l| l.as_ref().len() + 1).sum());
    for l in lines {
        text.push_str(l.as_ref());
        text.push('\n');
    }
    write_atomic(path, text.as_bytes())?;
    Ok(FixtureStatus::Written)
}

pub fn read_fixture(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)?;
    Ok(text.lines().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_once_then_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("Case0.txt");
        assert_eq!(write_fixture(&p, &["G1 X1", "G1 Y2"]).unwrap(), FixtureStatus::Written);
        assert_eq!(
            write_fixture(&p, &["different"]).unwrap(),
            FixtureStatus::AlreadyPresent
        );
        assert_eq!(read_fixture(&p).unwrap(), vec!["G1 X1", "G1 Y2"]);
    }
}
