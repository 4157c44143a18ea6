// crates/ggb-core/src/reference/mod.rs
//
// Command reference: name -> opcode, and per entry the accepted
// parameter letters with the channel slot each one is encoded on.

pub mod entry;
pub mod format;
pub mod table;

pub use entry::{CommandEntry, ParamSlot};
pub use table::{Resolution, ReferenceTable, Shadowed};
