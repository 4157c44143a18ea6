// crates/ggb-core/src/artifact/assembly.rs
//
// Print-in-place assembly: every section stacked into one artifact,
// section 0 on top.

use std::path::Path;

use crate::artifact::codec::*;
use crate::artifact::paths::OutputPaths;
use crate::artifact::section::{self, SectionArtifact};
use crate::artifact::write_atomic;
use crate::checksum::{crc32, hex16};
use crate::error::{GgError, Result};
use crate::layout::{MarkerPlacement, BIT_PITCH};

pub const MAGIC: &[u8; 4] = b"GGA1";
const VERSION: u16 = 1;
const PART_HEAD_LEN: usize = 20;

/// Clearance between stacked sections.
pub const STACK_GAP: f64 = 0.2;

/// Distance between consecutive sections in the stack.
pub const STACK_PITCH: f64 = BIT_PITCH + STACK_GAP;

#[derive(Clone, Debug, PartialEq)]
pub struct AssemblyPart {
    pub section: usize,
    pub line_count: usize,
    /// Translation along the stacking axis.
    pub offset: f64,
    pub placements: Vec<MarkerPlacement>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Assembly {
    pub reference_id: [u8; 16],
    pub parts: Vec<AssemblyPart>,
}

impl Assembly {
    pub fn placement_count(&self) -> usize {
        self.parts.iter().map(|p| p.placements.len()).sum()
    }
}

/// Stacking offset of section `index` when `last` is the highest index.
pub fn stack_offset(index: usize, last: usize) -> f64 {
    STACK_PITCH * last as f64 - STACK_PITCH * index as f64
}

/// Load sections `0..section_count` and stack them.
///
/// Fails on the first missing or unreadable section, or when sections
/// were built from different reference tables.
pub fn assemble(paths: &OutputPaths, section_count: usize) -> Result<Assembly> {
    let mut loaded: Vec<SectionArtifact> = Vec::with_capacity(section_count);
    for index in 0..section_count {
        let path = paths.section_artifact(index);
        let a = section::read_file(&path).map_err(|e| e.in_section(index))?;
        if a.section != index {
            return Err(GgError::ArtifactFormat(format!(
                "{} holds section {}, expected {index}",
                path.display(),
                a.section
            ))
            .in_section(index));
        }
        loaded.push(a);
    }
    from_sections(loaded)
}

pub fn from_sections(sections: Vec<SectionArtifact>) -> Result<Assembly> {
    let reference_id = sections.first().map(|a| a.reference_id).unwrap_or([0u8; 16]);
    if let Some(odd) = sections.iter().find(|a| a.reference_id != reference_id) {
        return Err(GgError::ArtifactFormat(format!(
            "section {} was built with reference {}, section 0 with {}",
            odd.section,
            hex16(&odd.reference_id),
            hex16(&reference_id)
        )));
    }

    let last = sections.len().saturating_sub(1);
    let parts = sections
        .into_iter()
        .enumerate()
        .map(|(i, a)| AssemblyPart {
            section: a.section,
            line_count: a.line_count,
            offset: stack_offset(i, last),
            placements: a.placements,
        })
        .collect();

    Ok(Assembly {
        reference_id,
        parts,
    })
}

/// GGA1 layout (little-endian):
/// MAGIC[4]
/// version:u16
/// reference_id:[16]
/// part_count:u32
/// parts: repeated { section:u32 line_count:u32 offset:f64 placement_count:u32 }
/// payload_len:u32
/// payload[payload_len]   (all parts' placements in part order, zstd)
/// crc32:u32
pub fn encode(a: &Assembly) -> Result<Vec<u8>> {
    let all: Vec<MarkerPlacement> = a
        .parts
        .iter()
        .flat_map(|p| p.placements.iter().copied())
        .collect();
    let payload = pack_placements(&all)?;

    let mut b = Vec::with_capacity(32 + a.parts.len() * 20 + payload.len());
    b.extend_from_slice(MAGIC);
    b.extend_from_slice(&VERSION.to_le_bytes());
    b.extend_from_slice(&a.reference_id);
    b.extend_from_slice(&u32_field("part_count", a.parts.len())?.to_le_bytes());
    for p in &a.parts {
        b.extend_from_slice(&u32_field("section", p.section)?.to_le_bytes());
        b.extend_from_slice(&u32_field("line_count", p.line_count)?.to_le_bytes());
        b.extend_from_slice(&p.offset.to_le_bytes());
        b.extend_from_slice(&u32_field("placement_count", p.placements.len())?.to_le_bytes());
    }
    b.extend_from_slice(&u32_field("payload_len", payload.len())?.to_le_bytes());
    b.extend_from_slice(&payload);

    let c = crc32(&b);
    b.extend_from_slice(&c.to_le_bytes());
    Ok(b)
}

pub fn decode(bytes: &[u8]) -> Result<Assembly> {
    let body = split_crc(bytes, "assembly")?;
    let mut i = 0usize;

    if read_bytes(body, &mut i, 4)? != MAGIC {
        return Err(GgError::ArtifactFormat("bad assembly magic".into()));
    }
    let version = read_u16(body, &mut i)?;
    if version != VERSION {
        return Err(GgError::ArtifactFormat(format!(
            "unsupported assembly version {version}"
        )));
    }
    let reference_id = read_id16(body, &mut i)?;

    let part_count = read_u32(body, &mut i)? as usize;
    // each part header is 20 bytes; never reserve more than the body holds
    let mut heads = Vec::with_capacity(part_count.min(body.len().saturating_sub(i) / PART_HEAD_LEN));
    for _ in 0..part_count {
        let section = read_u32(body, &mut i)? as usize;
        let line_count = read_u32(body, &mut i)? as usize;
        let offset = read_f64(body, &mut i)?;
        let count = read_u32(body, &mut i)? as usize;
        heads.push((section, line_count, offset, count));
    }

    let payload_len = read_u32(body, &mut i)? as usize;
    let payload = read_bytes(body, &mut i, payload_len)?;
    if i != body.len() {
        return Err(GgError::ArtifactFormat("trailing bytes after payload".into()));
    }

    let total = heads
        .iter()
        .try_fold(0usize, |acc, h| acc.checked_add(h.3))
        .ok_or_else(|| GgError::ArtifactFormat("placement counts overflow".into()))?;
    let mut all = unpack_placements(payload, total)?.into_iter();

    let parts = heads
        .into_iter()
        .map(|(section, line_count, offset, count)| AssemblyPart {
            section,
            line_count,
            offset,
            placements: all.by_ref().take(count).collect(),
        })
        .collect();

    Ok(Assembly {
        reference_id,
        parts,
    })
}

pub fn write_file(path: &Path, a: &Assembly) -> Result<()> {
    write_atomic(path, &encode(a)?)
}

pub fn read_file(path: &Path) -> Result<Assembly> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}
