// crates/ggb-core/src/artifact/codec.rs
//
// Little-endian field readers and the packed placement payload shared
// by GGS1 and GGA1.
//
// payload (before zstd): repeated { row:varint channel:u8 bit:u8 }

use std::io::Cursor;

use crate::encode::bitfield::FieldKind;
use crate::error::{GgError, Result};
use crate::layout::{Channel, MarkerPlacement};

const ZSTD_LEVEL: i32 = 3;

pub fn pack_placements(placements: &[MarkerPlacement]) -> Result<Vec<u8>> {
    let mut raw = Vec::with_capacity(placements.len() * 3);
    for p in placements {
        put_varint(p.row as u64, &mut raw);
        raw.push(p.channel.index());
        raw.push(p.bit);
    }
    Ok(zstd::stream::encode_all(Cursor::new(raw), ZSTD_LEVEL)?)
}

pub fn unpack_placements(packed: &[u8], count: usize) -> Result<Vec<MarkerPlacement>> {
    let raw = zstd::stream::decode_all(Cursor::new(packed))?;
    // header counts are untrusted; a placement takes at least 3 raw bytes
    let mut out = Vec::with_capacity(count.min(raw.len() / 3));
    let mut i = 0usize;
    while i < raw.len() {
        let row = get_varint(&raw, &mut i)?;
        let row = usize::try_from(row)
            .map_err(|_| GgError::ArtifactFormat(format!("row {row} out of range")))?;
        let channel = Channel::new(read_u8(&raw, &mut i)?)
            .map_err(|e| GgError::ArtifactFormat(e.to_string()))?;
        let bit = read_u8(&raw, &mut i)?;
        if bit == 0 || bit > FieldKind::Parameter.width() {
            return Err(GgError::ArtifactFormat(format!("bit position {bit} out of range")));
        }
        out.push(MarkerPlacement { row, channel, bit });
    }
    if out.len() != count {
        return Err(GgError::ArtifactFormat(format!(
            "placement count mismatch: header {count}, payload {}",
            out.len()
        )));
    }
    Ok(out)
}

/// `v` as a u32 header field, or an error naming `what`.
pub fn u32_field(what: &str, v: usize) -> Result<u32> {
    u32::try_from(v).map_err(|_| GgError::ArtifactFormat(format!("{what} {v} exceeds u32")))
}

pub fn put_varint(mut v: u64, out: &mut Vec<u8>) {
    loop {
        let low = (v & 0x7F) as u8;
        v >>= 7;
        if v == 0 {
            out.push(low);
            return;
        }
        out.push(low | 0x80);
    }
}

pub fn get_varint(bytes: &[u8], i: &mut usize) -> Result<u64> {
    let mut acc: u64 = 0;
    for shift in (0..64).step_by(7) {
        let b = read_u8(bytes, i)?;
        let low = (b & 0x7F) as u64;
        if shift == 63 && low > 1 {
            return Err(GgError::ArtifactFormat("varint overflow".into()));
        }
        acc |= low << shift;
        if b & 0x80 == 0 {
            return Ok(acc);
        }
    }
    Err(GgError::ArtifactFormat("varint too long".into()))
}

fn take<'a>(bytes: &'a [u8], i: &mut usize, n: usize) -> Result<&'a [u8]> {
    let end = i
        .checked_add(n)
        .filter(|&e| e <= bytes.len())
        .ok_or_else(|| GgError::ArtifactFormat("unexpected eof".into()))?;
    let s = &bytes[*i..end];
    *i = end;
    Ok(s)
}

fn take_array<const N: usize>(bytes: &[u8], i: &mut usize) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    out.copy_from_slice(take(bytes, i, N)?);
    Ok(out)
}

pub fn read_u8(bytes: &[u8], i: &mut usize) -> Result<u8> {
    Ok(take(bytes, i, 1)?[0])
}

pub fn read_u16(bytes: &[u8], i: &mut usize) -> Result<u16> {
    Ok(u16::from_le_bytes(take_array(bytes, i)?))
}

pub fn read_u32(bytes: &[u8], i: &mut usize) -> Result<u32> {
    Ok(u32::from_le_bytes(take_array(bytes, i)?))
}

pub fn read_u64(bytes: &[u8], i: &mut usize) -> Result<u64> {
    Ok(u64::from_le_bytes(take_array(bytes, i)?))
}

pub fn read_f64(bytes: &[u8], i: &mut usize) -> Result<f64> {
    Ok(f64::from_le_bytes(take_array(bytes, i)?))
}

pub fn read_id16(bytes: &[u8], i: &mut usize) -> Result<[u8; 16]> {
    take_array(bytes, i)
}

pub fn read_bytes<'a>(bytes: &'a [u8], i: &mut usize, n: usize) -> Result<&'a [u8]> {
    take(bytes, i, n)
}

/// Split off and verify the trailing crc32; returns the covered body.
pub fn split_crc<'a>(bytes: &'a [u8], what: &str) -> Result<&'a [u8]> {
    if bytes.len() < 4 {
        return Err(GgError::ArtifactFormat(format!("{what} too small")));
    }
    let crc_off = bytes.len() - 4;
    let mut i = crc_off;
    let expected = read_u32(bytes, &mut i)?;
    let body = &bytes[..crc_off];
    if crate::checksum::crc32(body) != expected {
        return Err(GgError::ArtifactFormat(format!("{what} crc32 mismatch")));
    }
    Ok(body)
}
