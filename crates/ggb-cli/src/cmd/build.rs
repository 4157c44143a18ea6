// crates/ggb-cli/src/cmd/build.rs

use std::path::Path;

use anyhow::Context;
use clap::Args;
use ggb_core::artifact::OutputPaths;
use ggb_core::pipeline::{self, BuildSummary};
use ggb_core::section::BuildStatus;
use ggb_core::{ArtifactRenderer, BuildConfig};

use crate::io::{config_file, reference_file, source};

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Input G-code file
    #[arg(long)]
    pub r#in: String,

    /// Command reference table (TOML). Missing file = no encoding.
    #[arg(long, default_value = "configs/progref.toml")]
    pub reference: String,

    /// Output root (default: the input's directory)
    #[arg(long)]
    pub out_dir: Option<String>,

    /// Build config (TOML); flags below override it
    #[arg(long)]
    pub config: Option<String>,

    /// Number of sections to copy out as test fixtures
    #[arg(long)]
    pub sample_count: Option<usize>,

    /// Do not write test fixtures
    #[arg(long)]
    pub no_fixtures: bool,

    /// Stack all sections into <stem>_PIP.gga after a clean build
    #[arg(long)]
    pub assemble: bool,

    /// Log every processed line (debug level)
    #[arg(long)]
    pub show_lines: bool,

    /// Worker threads (0 = one per CPU)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Seed for fixture sampling
    #[arg(long)]
    pub seed: Option<u64>,
}

impl BuildArgs {
    fn apply(&self, config: &mut BuildConfig) {
        if let Some(k) = self.sample_count {
            config.sample_count = k;
        }
        if self.no_fixtures {
            config.produce_fixtures = false;
        }
        if self.assemble {
            config.produce_assembly = true;
        }
        if self.show_lines {
            config.show_lines = true;
        }
        if let Some(w) = self.workers {
            config.workers = w;
        }
        if self.seed.is_some() {
            config.sample_seed = self.seed;
        }
    }
}

pub fn run(args: BuildArgs) -> anyhow::Result<()> {
    let mut config = config_file::load(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate().context("invalid build config")?;

    let input = Path::new(&args.r#in);
    let src = source::load(input)?;
    let reference = reference_file::load(&args.reference)?;
    let paths = OutputPaths::new(source::out_dir(args.out_dir.as_deref(), input), src.stem.clone());

    let summary = pipeline::run_build(
        &config,
        reference.as_ref(),
        &src.lines,
        &paths,
        &ArtifactRenderer::default(),
    )
    .with_context(|| format!("build {}", args.r#in))?;

    print_summary(&args, &src, &paths, &summary);

    if !summary.is_success() {
        anyhow::bail!(
            "{} of {} sections failed",
            summary.failures.len(),
            summary.sections
        );
    }
    Ok(())
}

fn print_summary(args: &BuildArgs, src: &source::Source, paths: &OutputPaths, s: &BuildSummary) {
    eprintln!("--- build ---");
    eprintln!("input             = {}", args.r#in);
    eprintln!(
        "minimal           = {} ({})",
        src.cache.display(),
        if src.cache_reused { "reused" } else { "written" }
    );
    eprintln!("lines             = {}", s.total_lines);
    eprintln!("sections          = {}", s.sections);
    eprintln!("sampled           = {:?}", s.sampled);
    eprintln!("encoding_disabled = {}", s.encoding_disabled);
    if let Some(id) = &s.reference_id {
        eprintln!("reference_id      = {id}");
    }
    if s.encoding_disabled {
        eprintln!("elapsed_ms        = {}", s.elapsed.as_millis());
        return;
    }

    eprintln!("out_dir           = {}", paths.root().display());
    eprintln!("built             = {}", s.built());
    eprintln!("skipped           = {}", s.skipped());
    eprintln!("failed            = {}", s.failures.len());
    eprintln!("fixtures_written  = {}", s.fixtures_written());
    eprintln!("encoded_lines     = {}", s.stats.encoded_lines);
    eprintln!("dropped_lines     = {}", s.stats.dropped_lines());
    eprintln!("dropped_fields    = {}", s.stats.dropped_fields());
    eprintln!("sentinel_fields   = {}", s.stats.sentinel_fields);
    eprintln!("ambiguous_lines   = {}", s.stats.ambiguous_lines);
    eprintln!("partial_lines     = {}", s.stats.partial_lines);
    eprintln!("placements        = {}", s.stats.placements);
    if let Some(a) = &s.assembly {
        eprintln!("assembly          = {}", a.display());
    }
    eprintln!("elapsed_ms        = {}", s.elapsed.as_millis());

    eprintln!("--- sections ---");
    for r in &s.reports {
        let status = match r.status {
            BuildStatus::Built { placements } => format!("built ({placements} placements)"),
            BuildStatus::Skipped => "skipped".to_string(),
        };
        eprintln!(
            "section {:>4} lines {:>6}..{:<6} {:<28} fixture={:?}",
            r.index(),
            r.range.start,
            r.range.end,
            status,
            r.fixture
        );
    }
    for f in &s.failures {
        eprintln!("FAILED {f}");
    }
}
