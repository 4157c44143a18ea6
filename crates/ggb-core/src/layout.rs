// crates/ggb-core/src/layout.rs
//
// Channel layout: (channel, bit index, row) -> physical offset.
// Pure arithmetic, no state.

use crate::error::{GgError, Result};

pub const CHANNEL_COUNT: usize = 7;

/// Edge length of one marker cube; also the distance between bit positions.
pub const BIT_PITCH: f64 = 1.75;

/// Distance between consecutive rows (source lines) along the build axis.
pub const ROW_PITCH: f64 = 2.475;

/// Base physical offset of each channel, increasing.
///
/// `10.5 + k * BIT_PITCH` for k in [0, 9, 26, 43, 61, 78, 95].
pub const CHANNEL_BASE: [f64; CHANNEL_COUNT] = [10.5, 26.25, 56.0, 85.75, 117.25, 147.0, 176.75];

/// Static channel-guide geometry, persisted with every section so a
/// renderer does not need this crate's constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelGuides {
    pub bases: [f64; CHANNEL_COUNT],
    pub bit_pitch: f64,
    pub row_pitch: f64,
}

impl Default for ChannelGuides {
    fn default() -> Self {
        Self {
            bases: CHANNEL_BASE,
            bit_pitch: BIT_PITCH,
            row_pitch: ROW_PITCH,
        }
    }
}

/// One of the seven physical lanes. Channel 0 carries the opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Channel(u8);

impl Channel {
    pub const OPCODE: Channel = Channel(0);

    pub fn new(index: u8) -> Result<Self> {
        if (index as usize) < CHANNEL_COUNT {
            Ok(Channel(index))
        } else {
            Err(GgError::Reference(format!(
                "channel {index} out of range 0..{CHANNEL_COUNT}"
            )))
        }
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn base(self) -> f64 {
        CHANNEL_BASE[self.0 as usize]
    }
}

/// Where a set bit must be realized: lane, 1-based bit position within
/// its field, and row within the section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerPlacement {
    pub row: usize,
    pub channel: Channel,
    pub bit: u8,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// Across the channels.
    pub x: f64,
    /// Along the build axis; row 0 sits at 0 and later rows go negative.
    pub z: f64,
}

/// `ChannelBase[channel] + BIT_PITCH * bit`.
pub fn bit_offset(channel: Channel, bit: u8) -> f64 {
    channel.base() + BIT_PITCH * bit as f64
}

pub fn row_offset(row: usize) -> f64 {
    -(ROW_PITCH * row as f64)
}

impl MarkerPlacement {
    pub fn position(&self) -> Point {
        Point {
            x: bit_offset(self.channel, self.bit),
            z: row_offset(self.row),
        }
    }
}
