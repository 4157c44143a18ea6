// crates/ggb-core/src/reference/format.rs
//
// TOML reference dataset:
//
//   [[command]]
//   name = "G1"
//   opcode = 1
//   params = { X = 1, Y = 2, Z = 3, E = 4, F = 5 }
//
// Table order is resolution order.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{GgError, Result};
use crate::reference::entry::CommandEntry;
use crate::reference::table::ReferenceTable;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawReference {
    #[serde(default)]
    command: Vec<RawCommand>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCommand {
    name: String,
    opcode: u8,
    #[serde(default)]
    params: BTreeMap<String, u8>,
}

pub fn from_toml(content: &str) -> Result<ReferenceTable> {
    let raw: RawReference =
        toml::from_str(content).map_err(|e| GgError::Reference(e.to_string()))?;

    let mut entries = Vec::with_capacity(raw.command.len());
    for (row, cmd) in raw.command.into_iter().enumerate() {
        let mut params = Vec::with_capacity(cmd.params.len());
        for (key, slot) in cmd.params {
            let mut chars = key.chars();
            let letter = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(GgError::Reference(format!(
                        "command #{row} ({}): parameter key {key:?} must be a single letter",
                        cmd.name
                    )))
                }
            };
            params.push((letter, slot));
        }
        let entry = CommandEntry::new(&cmd.name, cmd.opcode, params)
            .map_err(|e| GgError::Reference(format!("command #{row}: {e}")))?;
        entries.push(entry);
    }

    ReferenceTable::from_entries(entries)
}

/// Load the reference dataset from `path`.
///
/// A missing file, or one that declares no commands, yields `Ok(None)`:
/// the caller runs without encoding. A present but invalid file is an error.
pub fn load_from_file(path: &Path) -> Result<Option<ReferenceTable>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let table = from_toml(&content)?;
    if table.is_empty() {
        return Ok(None);
    }
    Ok(Some(table))
}
