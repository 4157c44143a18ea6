// crates/ggb-core/src/encode/half.rs
//
// IEEE 754 binary16 conversion, done on the bit level so the produced
// pattern does not depend on the platform's float casts.
//
// binary16: sign[15] exponent[14:10] (bias 15) mantissa[9:0]

const F64_MAN_BITS: u32 = 52;
const F64_BIAS: i32 = 1023;
const F16_MAN_BITS: u32 = 10;
const F16_BIAS: i32 = 15;

pub const F16_INFINITY: u16 = 0x7C00;
pub const F16_QUIET_NAN: u16 = 0x7E00;
pub const F16_MAX: u16 = 0x7BFF; // 65504

/// Convert `value` to binary16 bits with round-to-nearest-even.
///
/// Magnitudes that round past 65504 become infinity; magnitudes below
/// half the smallest subnormal become signed zero.
pub fn f64_to_f16_bits(value: f64) -> u16 {
    let bits = value.to_bits();
    let sign = ((bits >> 48) & 0x8000) as u16;
    let exp = ((bits >> F64_MAN_BITS) & 0x7FF) as i32;
    let man = bits & ((1u64 << F64_MAN_BITS) - 1);

    if exp == 0x7FF {
        if man == 0 {
            return sign | F16_INFINITY;
        }
        // NaN: keep the top payload bits, never collapse to infinity
        let payload = (man >> (F64_MAN_BITS - F16_MAN_BITS)) as u16;
        let nan = F16_INFINITY | payload;
        return sign | if nan == F16_INFINITY { nan | 1 } else { nan };
    }

    if exp == 0 {
        // f64 zero or subnormal, far below the f16 range
        return sign;
    }

    let half_exp = exp - F64_BIAS + F16_BIAS;

    if half_exp >= 0x1F {
        return sign | F16_INFINITY;
    }

    if half_exp <= 0 {
        // subnormal result: value = frac * 2^-24
        let full = man | (1u64 << F64_MAN_BITS);
        let shift = (F64_MAN_BITS - F16_MAN_BITS) as i32 + 1 - half_exp;
        if shift >= 64 {
            return sign;
        }
        // a carry into bit 10 lands exactly on the smallest normal
        return sign | round_shift(full, shift as u32) as u16;
    }

    let frac = round_shift(man, F64_MAN_BITS - F16_MAN_BITS);
    // frac == 1 << 10 carries into the exponent; at half_exp 30 that
    // yields exactly the infinity pattern
    sign | (((half_exp as u64) << F16_MAN_BITS) + frac) as u16
}

/// Exact widening of binary16 bits to f64.
pub fn f16_bits_to_f64(bits: u16) -> f64 {
    let negative = bits & 0x8000 != 0;
    let exp = ((bits >> F16_MAN_BITS) & 0x1F) as i32;
    let man = (bits & 0x03FF) as u64;

    let magnitude = match exp {
        0 => man as f64 * 2f64.powi(1 - F16_BIAS - F16_MAN_BITS as i32),
        0x1F if man == 0 => f64::INFINITY,
        0x1F => {
            let payload = man << (F64_MAN_BITS - F16_MAN_BITS);
            f64::from_bits((0x7FFu64 << F64_MAN_BITS) | payload)
        }
        _ => {
            let e = (exp - F16_BIAS + F64_BIAS) as u64;
            f64::from_bits((e << F64_MAN_BITS) | (man << (F64_MAN_BITS - F16_MAN_BITS)))
        }
    };

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

#[inline]
fn round_shift(v: u64, shift: u32) -> u64 {
    debug_assert!(shift > 0 && shift < 64);
    let q = v >> shift;
    let rem = v & ((1u64 << shift) - 1);
    let halfway = 1u64 << (shift - 1);
    if rem > halfway || (rem == halfway && q & 1 == 1) {
        q + 1
    } else {
        q
    }
}
