// crates/ggb-core/src/reference/entry.rs

use crate::error::{GgError, Result};
use crate::layout::CHANNEL_COUNT;

/// One parameter letter and the channel slot it is encoded on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamSlot {
    pub letter: char,
    pub slot: u8,
}

/// One row of the reference table.
///
/// Several entries may share a name (overloads); they differ in the
/// parameter letters they accept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandEntry {
    name: String,
    opcode: u8,
    // sorted by letter
    params: Vec<ParamSlot>,
}

impl CommandEntry {
    pub fn new<I>(name: &str, opcode: u8, params: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, u8)>,
    {
        let name = normalize_name(name);
        if name.is_empty() {
            return Err(GgError::Reference("command name must not be empty".into()));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(GgError::Reference(format!(
                "command name {name:?} contains whitespace"
            )));
        }

        let mut slots: Vec<ParamSlot> = Vec::new();
        for (letter, slot) in params {
            if !letter.is_ascii_alphabetic() {
                return Err(GgError::Reference(format!(
                    "{name}: parameter key {letter:?} is not a letter"
                )));
            }
            let letter = letter.to_ascii_uppercase();
            // channel 0 carries the opcode
            if slot == 0 || slot as usize >= CHANNEL_COUNT {
                return Err(GgError::Reference(format!(
                    "{name}: parameter {letter} slot {slot} out of range 1..={}",
                    CHANNEL_COUNT - 1
                )));
            }
            if let Some(dup) = slots.iter().find(|p| p.letter == letter || p.slot == slot) {
                return Err(GgError::Reference(format!(
                    "{name}: parameter {letter} (slot {slot}) collides with {} (slot {})",
                    dup.letter, dup.slot
                )));
            }
            slots.push(ParamSlot { letter, slot });
        }
        slots.sort_by_key(|p| p.letter);

        Ok(Self {
            name,
            opcode,
            params: slots,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    pub fn params(&self) -> &[ParamSlot] {
        &self.params
    }

    pub fn slot_of(&self, letter: char) -> Option<u8> {
        let letter = letter.to_ascii_uppercase();
        self.params
            .binary_search_by_key(&letter, |p| p.letter)
            .ok()
            .map(|ix| self.params[ix].slot)
    }

    /// Accepted set is a superset of `letters`.
    pub fn accepts(&self, letters: &[char]) -> bool {
        letters.iter().all(|&l| self.slot_of(l).is_some())
    }

    /// Accepted set is a superset of `other`'s accepted set.
    pub fn covers(&self, other: &CommandEntry) -> bool {
        other.params.iter().all(|p| self.slot_of(p.letter).is_some())
    }

    /// Accepted letters in table order, e.g. "EFXYZ".
    pub fn letters(&self) -> String {
        self.params.iter().map(|p| p.letter).collect()
    }
}

pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_ascii_uppercase()
}
