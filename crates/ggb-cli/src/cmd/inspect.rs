// crates/ggb-cli/src/cmd/inspect.rs

use anyhow::Context;
use clap::Args;
use ggb_core::artifact::{assembly, section};
use ggb_core::checksum::hex16;
use ggb_core::encode::decode_rows;
use ggb_core::MarkerPlacement;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// .ggs section artifact or .gga assembly
    #[arg(long)]
    pub artifact: String,

    /// Print decoded rows (opcode + parameter bit patterns)
    #[arg(long)]
    pub rows: bool,
}

pub fn run(args: InspectArgs) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(&args.artifact).with_context(|| format!("read {}", args.artifact))?;

    match bytes.get(..4) {
        Some(m) if m == section::MAGIC => {
            let a = section::decode(&bytes).with_context(|| format!("decode {}", args.artifact))?;
            eprintln!("--- section ---");
            eprintln!("file          = {}", args.artifact);
            eprintln!("crc_ok        = true");
            eprintln!("section       = {}", a.section);
            eprintln!("lines         = {}..{}", a.first_line, a.first_line + a.line_count);
            eprintln!("reference_id  = {}", hex16(&a.reference_id));
            eprintln!("channel_base  = {:?}", a.guides.bases);
            eprintln!("bit_pitch     = {}", a.guides.bit_pitch);
            eprintln!("row_pitch     = {}", a.guides.row_pitch);
            eprintln!("placements    = {}", a.placements.len());
            if args.rows {
                print_rows(&a.placements);
            }
        }
        Some(m) if m == assembly::MAGIC => {
            let a = assembly::decode(&bytes).with_context(|| format!("decode {}", args.artifact))?;
            eprintln!("--- assembly ---");
            eprintln!("file          = {}", args.artifact);
            eprintln!("crc_ok        = true");
            eprintln!("reference_id  = {}", hex16(&a.reference_id));
            eprintln!("parts         = {}", a.parts.len());
            eprintln!("placements    = {}", a.placement_count());
            for p in &a.parts {
                eprintln!(
                    "part {:>4} lines={:<4} offset={:>8.3} placements={}",
                    p.section,
                    p.line_count,
                    p.offset,
                    p.placements.len()
                );
                if args.rows {
                    print_rows(&p.placements);
                }
            }
        }
        _ => anyhow::bail!("{}: not a GGS1/GGA1 artifact", args.artifact),
    }
    Ok(())
}

fn print_rows(placements: &[MarkerPlacement]) {
    for row in decode_rows(placements) {
        let mut line = format!("row {:>3}", row.row);
        for (channel, field) in &row.fields {
            line.push_str(&format!(" ch{}={}", channel.index(), field.to_bit_string()));
        }
        println!("{line}");
    }
}
