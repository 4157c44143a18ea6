// crates/ggb-cli/src/main.rs

use clap::{Parser, Subcommand};

mod cmd;
mod io;

#[derive(Parser)]
#[command(name = "ggb-cli")]
#[command(about = "G-code to channel-encoded section builder", long_about = None)]
pub struct Cli {
    /// Debug-level logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encode a G-code file into section artifacts (+ fixtures, assembly)
    Build(cmd::build::BuildArgs),

    /// Stack existing section artifacts into one assembly
    Assemble(cmd::assemble::AssembleArgs),

    /// Inspect a .ggs section or .gga assembly (header, crc, rows)
    Inspect(cmd::inspect::InspectArgs),

    /// Encode a single line against a reference table and print the fields
    EncodeLine(cmd::encode_line::EncodeLineArgs),
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    // a second init (tests, embedding) is harmless
    let _ = builder.try_init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.cmd {
        Commands::Build(args) => cmd::build::run(args),
        Commands::Assemble(args) => cmd::assemble::run(args),
        Commands::Inspect(args) => cmd::inspect::run(args),
        Commands::EncodeLine(args) => cmd::encode_line::run(args),
    }
}
