// crates/ggb-cli/src/cmd/assemble.rs

use std::path::Path;

use clap::Args;
use ggb_core::artifact::OutputPaths;
use ggb_core::pipeline;
use ggb_core::section::section_count;

use crate::io::{config_file, source};

#[derive(Args, Debug)]
pub struct AssembleArgs {
    /// Input G-code file the sections were built from
    #[arg(long)]
    pub r#in: String,

    /// Output root used for the build (default: the input's directory)
    #[arg(long)]
    pub out_dir: Option<String>,

    /// Build config (for chunk_size)
    #[arg(long)]
    pub config: Option<String>,
}

pub fn run(args: AssembleArgs) -> anyhow::Result<()> {
    let config = config_file::load(args.config.as_deref())?;
    config.validate()?;

    let input = Path::new(&args.r#in);
    let src = source::load(input)?;
    let count = section_count(src.lines.len(), config.chunk_size);
    if count == 0 {
        anyhow::bail!("{} has no lines, nothing to assemble", args.r#in);
    }

    let paths = OutputPaths::new(source::out_dir(args.out_dir.as_deref(), input), src.stem);
    let out = pipeline::write_assembly(&paths, count)?;

    eprintln!("--- assemble ---");
    eprintln!("sections = {count}");
    eprintln!("assembly = {}", out.display());
    Ok(())
}
