// crates/ggb-cli/src/cmd/encode_line.rs

use clap::Args;
use ggb_core::encode::half::f16_bits_to_f64;
use ggb_core::encode::{decode_rows, encode_line};
use ggb_core::line::tokenize;

use crate::io::reference_file;

#[derive(Args, Debug)]
pub struct EncodeLineArgs {
    /// Command reference table (TOML)
    #[arg(long, default_value = "configs/progref.toml")]
    pub reference: String,

    /// One G-code line, e.g. "G1 X10 F1200"
    #[arg(long)]
    pub line: String,

    /// Row index the line would occupy in its section
    #[arg(long, default_value_t = 0)]
    pub row: usize,
}

pub fn run(args: EncodeLineArgs) -> anyhow::Result<()> {
    let table = reference_file::require(&args.reference)?;
    let enc = encode_line(&table, &args.line, args.row);

    eprintln!("--- encode-line ---");
    eprintln!("line        = {:?}", args.line);
    if let Some(src) = tokenize(&args.line) {
        eprintln!("command     = {}", src.command);
    }
    eprintln!("encoded     = {}", enc.stats.encoded_lines == 1);
    eprintln!("ambiguous   = {}", enc.stats.ambiguous_lines == 1);
    eprintln!("placements  = {}", enc.placements.len());
    for issue in &enc.issues {
        eprintln!("issue       = {issue}");
    }

    for row in decode_rows(&enc.placements) {
        for (channel, field) in &row.fields {
            if *channel == ggb_core::Channel::OPCODE {
                println!(
                    "ch{} opcode {:>5} {}",
                    channel.index(),
                    field.pattern(),
                    field.to_bit_string()
                );
            } else {
                println!(
                    "ch{} param  {:>5} {} ({})",
                    channel.index(),
                    field.pattern(),
                    field.to_bit_string(),
                    f16_bits_to_f64(field.pattern())
                );
            }
        }
    }
    Ok(())
}
