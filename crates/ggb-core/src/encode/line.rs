// crates/ggb-core/src/encode/line.rs
//
// One source line -> marker placements:
//   resolve command -> opcode field on channel 0
//   each parameter  -> 16-bit field on its resolved channel
//   each set bit    -> placement (row, channel, 1-based bit position)

use crate::encode::bitfield::{BitField, ParamValue};
use crate::error::GgError;
use crate::layout::{Channel, MarkerPlacement};
use crate::line::tokenize::tokenize;
use crate::reference::table::ReferenceTable;

/// Per-line outcome counters. Summed per section and per run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineStats {
    pub lines: u64,
    pub encoded_lines: u64,
    pub unknown_commands: u64,
    /// Encoded with an overload that declares only some of the letters.
    pub partial_lines: u64,
    pub unknown_parameters: u64,
    pub malformed_tokens: u64,
    pub sentinel_fields: u64,
    pub ambiguous_lines: u64,
    pub placements: u64,
}

impl LineStats {
    pub fn merge(&mut self, other: &LineStats) {
        self.lines += other.lines;
        self.encoded_lines += other.encoded_lines;
        self.unknown_commands += other.unknown_commands;
        self.partial_lines += other.partial_lines;
        self.unknown_parameters += other.unknown_parameters;
        self.malformed_tokens += other.malformed_tokens;
        self.sentinel_fields += other.sentinel_fields;
        self.ambiguous_lines += other.ambiguous_lines;
        self.placements += other.placements;
    }

    pub fn dropped_lines(&self) -> u64 {
        self.unknown_commands
    }

    pub fn dropped_fields(&self) -> u64 {
        self.unknown_parameters + self.malformed_tokens
    }

    fn count(&mut self, err: &GgError) {
        match err {
            GgError::UnknownCommand(_) => self.unknown_commands += 1,
            GgError::UnknownParameter { .. } => self.unknown_parameters += 1,
            GgError::MalformedToken(_) => self.malformed_tokens += 1,
            _ => {}
        }
    }
}

#[derive(Debug, Default)]
pub struct LineEncoding {
    pub placements: Vec<MarkerPlacement>,
    pub stats: LineStats,
    /// Recoverable conditions hit on this line, in order.
    pub issues: Vec<GgError>,
}

/// Encode `line` as row `row` of its section.
///
/// Unknown commands drop the whole line; unknown or malformed parameters
/// drop only their own field. Neither is an error for the caller.
pub fn encode_line(reference: &ReferenceTable, line: &str, row: usize) -> LineEncoding {
    let mut out = LineEncoding::default();
    out.stats.lines = 1;

    let Some(src) = tokenize(line) else {
        return out;
    };

    let (params, malformed) = src.split_params();
    for err in malformed {
        out.stats.count(&err);
        out.issues.push(err);
    }

    let mut letters: Vec<char> = params.iter().map(|p| p.letter).collect();
    letters.sort_unstable();
    letters.dedup();

    let resolution = match reference.resolve(&src.command, &letters) {
        Ok(r) => r,
        Err(err) => {
            log::debug!("row {row}: {err}; line dropped");
            out.stats.count(&err);
            out.issues.push(err);
            return out;
        }
    };
    if resolution.ambiguous {
        log::debug!(
            "row {row}: {} [{}] matches several overloads, using opcode {}",
            src.command,
            letters.iter().collect::<String>(),
            resolution.opcode()
        );
        out.stats.ambiguous_lines += 1;
    }
    if resolution.partial {
        log::debug!(
            "row {row}: no {} overload declares all of [{}], using opcode {}",
            src.command,
            letters.iter().collect::<String>(),
            resolution.opcode()
        );
        out.stats.partial_lines += 1;
    }
    out.stats.encoded_lines = 1;

    push_field(
        &mut out.placements,
        row,
        Channel::OPCODE,
        BitField::opcode(resolution.opcode()),
    );

    for p in &params {
        let slot = match reference.slot(resolution.entry, p.letter) {
            Ok(s) => s,
            Err(err) => {
                log::debug!("row {row}: {err}; field dropped");
                out.stats.count(&err);
                out.issues.push(err);
                continue;
            }
        };
        let channel = match Channel::new(slot) {
            Ok(c) => c,
            Err(err) => {
                out.issues.push(err);
                continue;
            }
        };
        let value = ParamValue::parse(p.value);
        if value == ParamValue::Sentinel {
            if !p.value.is_empty() {
                log::debug!("row {row}: {:?} is not numeric, placing sentinel", p.raw);
            }
            out.stats.sentinel_fields += 1;
        }
        push_field(&mut out.placements, row, channel, BitField::parameter(value));
    }

    out.stats.placements = out.placements.len() as u64;
    out
}

fn push_field(out: &mut Vec<MarkerPlacement>, row: usize, channel: Channel, field: BitField) {
    out.extend(
        field
            .set_positions()
            .map(|bit| MarkerPlacement { row, channel, bit }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::entry::CommandEntry;

    fn reference() -> ReferenceTable {
        ReferenceTable::from_entries(vec![
            CommandEntry::new("G1", 1, [('X', 1), ('Y', 2), ('Z', 3), ('E', 4), ('F', 5)]).unwrap(),
            CommandEntry::new("G28", 28, [('X', 1), ('Y', 2), ('Z', 3)]).unwrap(),
            CommandEntry::new("G28", 29, [('X', 1)]).unwrap(),
        ])
        .unwrap()
    }

    fn on(enc: &LineEncoding, ch: u8) -> Vec<u8> {
        enc.placements
            .iter()
            .filter(|p| p.channel.index() == ch)
            .map(|p| p.bit)
            .collect()
    }

    #[test]
    fn g1_x10_places_opcode_and_half_bits() {
        let enc = encode_line(&reference(), "G1 X10", 4);
        // opcode 1 -> 00000001
        assert_eq!(on(&enc, 0), vec![8]);
        // 10.0 -> 0x4900 -> 0100 1001 0000 0000
        assert_eq!(on(&enc, 1), vec![2, 5, 8]);
        assert!(enc.placements.iter().all(|p| p.row == 4));
        assert_eq!(enc.stats.encoded_lines, 1);
        assert_eq!(enc.stats.placements, 4);
    }

    #[test]
    fn letter_only_parameter_places_sixteen() {
        let r = reference();
        for (line, ch) in [("G28 X", 1u8), ("G28 Y", 2), ("G28 Z", 3), ("G1 F", 5)] {
            let enc = encode_line(&r, line, 0);
            assert_eq!(on(&enc, ch).len(), 16, "{line}");
            assert_eq!(enc.stats.sentinel_fields, 1);
        }
    }

    #[test]
    fn unknown_command_drops_line() {
        let enc = encode_line(&reference(), "M104 S200", 0);
        assert!(enc.placements.is_empty());
        assert_eq!(enc.stats.lines, 1);
        assert_eq!(enc.stats.unknown_commands, 1);
        assert_eq!(enc.stats.encoded_lines, 0);
    }

    #[test]
    fn undeclared_parameter_drops_only_its_field() {
        let enc = encode_line(&reference(), "G1 X10 Q5", 0);
        assert_eq!(enc.stats.encoded_lines, 1);
        assert_eq!(enc.stats.unknown_parameters, 1);
        assert_eq!(enc.stats.partial_lines, 1);
        assert_eq!(enc.stats.dropped_lines(), 0);
        assert!(matches!(
            enc.issues.as_slice(),
            [GgError::UnknownParameter { letter: 'Q', .. }]
        ));
        // opcode 1 plus X10 (0x4900) survive
        assert_eq!(on(&enc, 0), vec![8]);
        assert_eq!(on(&enc, 1), vec![2, 5, 8]);
        assert_eq!(enc.placements.len(), 4);
    }

    #[test]
    fn undeclared_parameter_on_overloaded_command() {
        // no G28 overload takes E; the three-axis one covers the most letters
        let enc = encode_line(&reference(), "G28 X Y E1", 0);
        assert_eq!(enc.stats.unknown_parameters, 1);
        assert_eq!(on(&enc, 0), vec![4, 5, 6]);
        assert_eq!(on(&enc, 1).len(), 16);
        assert_eq!(on(&enc, 2).len(), 16);
        assert!(enc.issues.iter().all(GgError::is_recoverable));
    }

    #[test]
    fn malformed_token_drops_only_its_field() {
        let enc = encode_line(&reference(), "G1 5 X1", 0);
        assert_eq!(enc.stats.malformed_tokens, 1);
        assert!(enc.issues.iter().all(GgError::is_recoverable));
        assert_eq!(on(&enc, 0), vec![8]);
        // 1.0 -> 0x3C00 -> 0011 1100 0000 0000
        assert_eq!(on(&enc, 1), vec![3, 4, 5, 6]);
    }

    #[test]
    fn ambiguous_resolution_is_counted_first_match_kept() {
        let enc = encode_line(&reference(), "G28 X", 0);
        assert_eq!(enc.stats.ambiguous_lines, 1);
        // opcode 28 -> 00011100
        assert_eq!(on(&enc, 0), vec![4, 5, 6]);
    }

    #[test]
    fn zero_value_places_nothing_on_its_channel() {
        let enc = encode_line(&reference(), "G1 Y0", 0);
        assert!(on(&enc, 2).is_empty());
        assert_eq!(enc.stats.sentinel_fields, 0);
    }
}
