// crates/ggb-core/src/artifact/section.rs

use std::path::Path;

use crate::artifact::codec::*;
use crate::artifact::write_atomic;
use crate::checksum::crc32;
use crate::error::{GgError, Result};
use crate::layout::{ChannelGuides, MarkerPlacement, CHANNEL_COUNT};

pub const MAGIC: &[u8; 4] = b"GGS1";
const VERSION: u16 = 1;

/// One built section: its placements plus enough context to render,
/// inspect or assemble it later.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionArtifact {
    pub section: usize,
    pub first_line: usize,
    pub line_count: usize,
    pub reference_id: [u8; 16],
    pub guides: ChannelGuides,
    pub placements: Vec<MarkerPlacement>,
}

/// GGS1 layout (little-endian):
/// MAGIC[4]
/// version:u16
/// section:u32
/// first_line:u64
/// line_count:u32
/// reference_id:[16]
/// channel_base:[f64; 7] bit_pitch:f64 row_pitch:f64
/// placement_count:u32
/// payload_len:u32
/// payload[payload_len]   (zstd, see codec)
/// crc32:u32              (over everything before crc32)
pub fn encode(a: &SectionArtifact) -> Result<Vec<u8>> {
    let payload = pack_placements(&a.placements)?;

    let mut b = Vec::with_capacity(128 + payload.len());
    b.extend_from_slice(MAGIC);
    b.extend_from_slice(&VERSION.to_le_bytes());
    b.extend_from_slice(&u32_field("section", a.section)?.to_le_bytes());
    b.extend_from_slice(&(a.first_line as u64).to_le_bytes());
    b.extend_from_slice(&u32_field("line_count", a.line_count)?.to_le_bytes());
    b.extend_from_slice(&a.reference_id);
    for base in a.guides.bases {
        b.extend_from_slice(&base.to_le_bytes());
    }
    b.extend_from_slice(&a.guides.bit_pitch.to_le_bytes());
    b.extend_from_slice(&a.guides.row_pitch.to_le_bytes());
    b.extend_from_slice(&u32_field("placement_count", a.placements.len())?.to_le_bytes());
    b.extend_from_slice(&u32_field("payload_len", payload.len())?.to_le_bytes());
    b.extend_from_slice(&payload);

    let c = crc32(&b);
    b.extend_from_slice(&c.to_le_bytes());
    Ok(b)
}

pub fn decode(bytes: &[u8]) -> Result<SectionArtifact> {
    let body = split_crc(bytes, "section artifact")?;
    let mut i = 0usize;

    if read_bytes(body, &mut i, 4)? != MAGIC {
        return Err(GgError::ArtifactFormat("bad section magic".into()));
    }
    let version = read_u16(body, &mut i)?;
    if version != VERSION {
        return Err(GgError::ArtifactFormat(format!(
            "unsupported section version {version}"
        )));
    }

    let section = read_u32(body, &mut i)? as usize;
    let first_line = read_u64(body, &mut i)? as usize;
    let line_count = read_u32(body, &mut i)? as usize;
    let reference_id = read_id16(body, &mut i)?;

    let mut bases = [0f64; CHANNEL_COUNT];
    for base in bases.iter_mut() {
        *base = read_f64(body, &mut i)?;
    }
    let bit_pitch = read_f64(body, &mut i)?;
    let row_pitch = read_f64(body, &mut i)?;

    let count = read_u32(body, &mut i)? as usize;
    let payload_len = read_u32(body, &mut i)? as usize;
    let payload = read_bytes(body, &mut i, payload_len)?;
    if i != body.len() {
        return Err(GgError::ArtifactFormat("trailing bytes after payload".into()));
    }

    let placements = unpack_placements(payload, count)?;
    if let Some(p) = placements.iter().find(|p| p.row >= line_count) {
        return Err(GgError::ArtifactFormat(format!(
            "placement row {} outside section of {line_count} lines",
            p.row
        )));
    }

    Ok(SectionArtifact {
        section,
        first_line,
        line_count,
        reference_id,
        guides: ChannelGuides {
            bases,
            bit_pitch,
            row_pitch,
        },
        placements,
    })
}

pub fn write_file(path: &Path, a: &SectionArtifact) -> Result<()> {
    write_atomic(path, &encode(a)?)
}

pub fn read_file(path: &Path) -> Result<SectionArtifact> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}
