pub mod bitfield;
pub mod half;
pub mod line;
pub mod rows;

pub use bitfield::{BitField, FieldKind, ParamValue};
pub use line::{encode_line, LineEncoding, LineStats};
pub use rows::{decode_rows, DecodedRow};
