// crates/ggb-cli/src/cmd/mod.rs

pub mod assemble;
pub mod build;
pub mod encode_line;
pub mod inspect;
