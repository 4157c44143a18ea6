// crates/ggb-core/src/reference/table.rs

use std::collections::HashMap;

use crate::checksum::{blake3_16, hex16};
use crate::error::{GgError, Result};
use crate::reference::entry::{normalize_name, CommandEntry};

/// Outcome of resolving a command name against the table.
#[derive(Clone, Copy, Debug)]
pub struct Resolution<'a> {
    pub entry: &'a CommandEntry,
    /// A later overload of the same name also accepts the observed letters.
    pub ambiguous: bool,
    /// No overload accepts every observed letter; `entry` declares only
    /// some of them.
    pub partial: bool,
}

impl Resolution<'_> {
    pub fn opcode(&self) -> u8 {
        self.entry.opcode()
    }
}

/// A later overload that can never be chosen because an earlier one of
/// the same name accepts every letter it accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shadowed {
    pub name: String,
    pub earlier: usize,
    pub later: usize,
}

/// Immutable command reference, loaded once per process and shared
/// read-only across workers.
#[derive(Clone, Debug)]
pub struct ReferenceTable {
    entries: Vec<CommandEntry>,
    by_name: HashMap<String, Vec<usize>>,
    id: [u8; 16],
}

impl ReferenceTable {
    pub fn from_entries(entries: Vec<CommandEntry>) -> Result<Self> {
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
        for (ix, e) in entries.iter().enumerate() {
            by_name.entry(e.name().to_string()).or_default().push(ix);
        }
        let id = blake3_16(&canonical_bytes(&entries));
        Ok(Self {
            entries,
            by_name,
            id,
        })
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn id(&self) -> [u8; 16] {
        self.id
    }

    pub fn id_hex(&self) -> String {
        hex16(&self.id)
    }

    /// Resolve `name` with the observed parameter letters.
    ///
    /// First match in table order wins, even when a later overload fits
    /// the letters more tightly. When no overload accepts every letter,
    /// the one accepting the most of them is used (earliest on ties) and
    /// the resolution is marked partial; the caller drops the undeclared
    /// fields one by one. Only an unknown name fails.
    pub fn resolve(&self, name: &str, letters: &[char]) -> Result<Resolution<'_>> {
        let key = normalize_name(name);
        let candidates: Vec<&CommandEntry> = self
            .by_name
            .get(&key)
            .ok_or_else(|| GgError::UnknownCommand(key.clone()))?
            .iter()
            .map(|&ix| &self.entries[ix])
            .collect();

        let mut matching = candidates.iter().filter(|e| e.accepts(letters));
        if let Some(&entry) = matching.next() {
            let ambiguous = matching.next().is_some();
            return Ok(Resolution {
                entry,
                ambiguous,
                partial: false,
            });
        }

        let declared = |e: &CommandEntry| letters.iter().filter(|&&l| e.slot_of(l).is_some()).count();
        let mut best: Option<(&CommandEntry, usize)> = None;
        for &e in &candidates {
            let n = declared(e);
            if best.map_or(true, |(_, m)| n > m) {
                best = Some((e, n));
            }
        }
        match best {
            Some((entry, _)) => Ok(Resolution {
                entry,
                ambiguous: false,
                partial: true,
            }),
            None => Err(GgError::UnknownCommand(key)),
        }
    }

    /// Channel slot of `letter` within the resolved entry.
    pub fn slot(&self, entry: &CommandEntry, letter: char) -> Result<u8> {
        entry.slot_of(letter).ok_or_else(|| GgError::UnknownParameter {
            command: entry.name().to_string(),
            letter: letter.to_ascii_uppercase(),
        })
    }

    pub fn shadowed_overloads(&self) -> Vec<Shadowed> {
        let mut out = Vec::new();
        let mut names: Vec<&String> = self.by_name.keys().collect();
        names.sort();
        for name in names {
            let ixs = &self.by_name[name];
            for (pos, &later) in ixs.iter().enumerate() {
                let shadowing = ixs[..pos]
                    .iter()
                    .copied()
                    .find(|&earlier| self.entries[earlier].covers(&self.entries[later]));
                if let Some(earlier) = shadowing {
                    out.push(Shadowed {
                        name: name.clone(),
                        earlier,
                        later,
                    });
                }
            }
        }
        out
    }
}

// name \0 opcode count (letter slot)*, per entry in table order
fn canonical_bytes(entries: &[CommandEntry]) -> Vec<u8> {
    let mut b = Vec::with_capacity(entries.len() * 16);
    b.extend_from_slice(&(entries.len() as u32).to_le_bytes());
    for e in entries {
        b.extend_from_slice(e.name().as_bytes());
        b.push(0);
        b.push(e.opcode());
        b.push(e.params().len() as u8);
        for p in e.params() {
            b.push(p.letter as u8);
            b.push(p.slot);
        }
    }
    b
}
