// crates/ggb-core/src/encode/rows.rs
//
// Fold placements back into per-row bit fields. Used by `inspect` and
// by tests that check an artifact against the line it came from.

use std::collections::BTreeMap;

use crate::encode::bitfield::{BitField, FieldKind};
use crate::layout::{Channel, MarkerPlacement};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedRow {
    pub row: usize,
    pub fields: BTreeMap<Channel, BitField>,
}

impl DecodedRow {
    /// Opcode of the row, if channel 0 carries any set bit.
    pub fn opcode(&self) -> Option<u8> {
        self.fields
            .get(&Channel::OPCODE)
            .map(|f| f.pattern() as u8)
    }

    /// Bit pattern on a parameter channel.
    pub fn parameter(&self, channel: Channel) -> Option<u16> {
        if channel == Channel::OPCODE {
            return None;
        }
        self.fields.get(&channel).map(|f| f.pattern())
    }
}

fn kind_for(channel: Channel) -> FieldKind {
    if channel == Channel::OPCODE {
        FieldKind::Opcode
    } else {
        FieldKind::Parameter
    }
}

/// Group placements by row, then by channel. Rows come out ascending.
///
/// All-zero fields place nothing and therefore do not reappear here, so
/// an opcode of 0 or a parameter of +0.0 is indistinguishable from an
/// absent field.
pub fn decode_rows(placements: &[MarkerPlacement]) -> Vec<DecodedRow> {
    let mut grouped: BTreeMap<usize, BTreeMap<Channel, Vec<u8>>> = BTreeMap::new();
    for p in placements {
        grouped
            .entry(p.row)
            .or_default()
            .entry(p.channel)
            .or_default()
            .push(p.bit);
    }

    grouped
        .into_iter()
        .map(|(row, channels)| DecodedRow {
            row,
            fields: channels
                .into_iter()
                .map(|(ch, bits)| (ch, BitField::from_positions(kind_for(ch), bits)))
                .collect(),
        })
        .collect()
}
