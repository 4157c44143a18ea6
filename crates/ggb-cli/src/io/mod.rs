// crates/ggb-cli/src/io/mod.rs

pub mod config_file;
pub mod reference_file;
pub mod source;
