// crates/ggb-core/src/encode/bitfield.rs

use crate::encode::half::f64_to_f16_bits;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Opcode,
    Parameter,
}

impl FieldKind {
    pub const fn width(self) -> u8 {
        match self {
            FieldKind::Opcode => 8,
            FieldKind::Parameter => 16,
        }
    }
}

/// Parsed parameter value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    /// Decimal value, stored as binary16 bits.
    Half(u16),
    /// Letter present, no representable value: every bit is placed.
    Sentinel,
}

impl ParamValue {
    /// Parse the value substring of a parameter token (letter stripped).
    pub fn parse(value: &str) -> Self {
        if value.is_empty() {
            return ParamValue::Sentinel;
        }
        match value.parse::<f64>() {
            Ok(v) => ParamValue::Half(f64_to_f16_bits(v)),
            Err(_) => ParamValue::Sentinel,
        }
    }
}

/// A fixed-width bit pattern, most significant bit first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitField {
    kind: FieldKind,
    pattern: u16,
}

impl BitField {
    pub fn opcode(op: u8) -> Self {
        Self {
            kind: FieldKind::Opcode,
            pattern: op as u16,
        }
    }

    pub fn parameter(value: ParamValue) -> Self {
        let pattern = match value {
            ParamValue::Half(bits) => bits,
            ParamValue::Sentinel => u16::MAX,
        };
        Self {
            kind: FieldKind::Parameter,
            pattern,
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn width(&self) -> u8 {
        self.kind.width()
    }

    pub fn pattern(&self) -> u16 {
        self.pattern
    }

    /// Bit at 1-based position `pos` (1 = most significant).
    pub fn bit(&self, pos: u8) -> bool {
        debug_assert!(pos >= 1 && pos <= self.width());
        (self.pattern >> (self.width() - pos)) & 1 == 1
    }

    /// 1-based positions of the set bits, in field order.
    ///
    /// The position counter is local to this field and starts at 1.
    pub fn set_positions(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=self.width()).filter(move |&pos| self.bit(pos))
    }

    /// Rebuild a field from the positions its set bits were placed at.
    /// Positions outside the field width are ignored.
    pub fn from_positions<I>(kind: FieldKind, positions: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        let width = kind.width();
        let mut pattern = 0u16;
        for pos in positions {
            if pos >= 1 && pos <= width {
                pattern |= 1 << (width - pos);
            }
        }
        Self { kind, pattern }
    }

    /// MSB-first rendering, e.g. "00000001".
    pub fn to_bit_string(&self) -> String {
        (1..=self.width())
            .map(|pos| if self.bit(pos) { '1' } else { '0' })
            .collect()
    }
}
