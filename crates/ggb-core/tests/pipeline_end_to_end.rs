// crates/ggb-core/tests/pipeline_end_to_end.rs

use ggb_core::artifact::{assembly, section, OutputPaths};
use ggb_core::pipeline::run_build;
use ggb_core::reference::format::from_toml;
use ggb_core::section::{BuildStatus, FixtureStatus};
use ggb_core::{ArtifactRenderer, BuildConfig, GgError, ReferenceTable};

const REFERENCE: &str = r#"
[[command]]
name = "G1"
opcode = 1
params = { X = 1, Y = 2, Z = 3, E = 4, F = 5 }

[[command]]
name = "G28"
opcode = 28
params = { X = 1, Y = 2, Z = 3 }
"#;

fn reference() -> ReferenceTable {
    from_toml(REFERENCE).expect("reference")
}

fn config(sample_count: usize) -> BuildConfig {
    BuildConfig {
        sample_count,
        sample_seed: Some(42),
        workers: 2,
        ..BuildConfig::default()
    }
}

fn lcg_next(x: &mut u64) -> u64 {
    // deterministic, not crypto
    *x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
    *x
}

fn gcode_lines(n: usize) -> Vec<String> {
    let mut seed = 0x00C0_FFEE_u64;
    (0..n)
        .map(|_| {
            let x = (lcg_next(&mut seed) >> 40) % 2000;
            let y = (lcg_next(&mut seed) >> 40) % 2000;
            format!("G1 X{}.{} Y-{}", x / 10, x % 10, y)
        })
        .collect()
}

#[test]
fn three_lines_one_section_unknown_command_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let paths = OutputPaths::new(dir.path(), "TRIPLE");
    let lines: Vec<String> = ["G1 X10", "G1 Y-5", "M104"].iter().map(|s| s.to_string()).collect();

    let summary = run_build(
        &config(1),
        Some(&reference()),
        &lines,
        &paths,
        &ArtifactRenderer::default(),
    )
    .expect("build");

    assert_eq!(summary.sections, 1);
    assert!(summary.is_success());
    assert_eq!(summary.reports.len(), 1);
    let rep = &summary.reports[0];
    assert_eq!(rep.range.index, 0);
    assert_eq!((rep.range.start, rep.range.end), (0, 3));
    assert_eq!(rep.stats.unknown_commands, 1);
    assert_eq!(rep.stats.encoded_lines, 2);
    assert_eq!(rep.fixture, FixtureStatus::Written);

    let art = section::read_file(&paths.section_artifact(0)).expect("artifact");
    assert_eq!(art.line_count, 3);
    let rows: std::collections::BTreeSet<usize> = art.placements.iter().map(|p| p.row).collect();
    assert_eq!(rows, std::collections::BTreeSet::from([0usize, 1]));

    let fixture = std::fs::read_to_string(paths.fixture(0)).unwrap();
    assert_eq!(fixture, "G1 X10\nG1 Y-5\nM104\n");
}

#[test]
fn missing_reference_runs_as_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let paths = OutputPaths::new(dir.path(), "NOREF");
    let lines = gcode_lines(100);

    let summary = run_build(&config(2), None, &lines, &paths, &ArtifactRenderer::default())
        .expect("degraded run is not an error");

    assert!(summary.encoding_disabled);
    assert_eq!(summary.sections, 2);
    assert!(summary.reports.is_empty());
    assert!(!paths.sections_dir().exists());
}

#[test]
fn oversample_fails_before_any_section_work() {
    let dir = tempfile::tempdir().unwrap();
    let paths = OutputPaths::new(dir.path(), "OVER");
    let lines = gcode_lines(200); // 3 sections

    let err = run_build(
        &config(4),
        Some(&reference()),
        &lines,
        &paths,
        &ArtifactRenderer::default(),
    )
    .unwrap_err();

    assert!(matches!(err, GgError::Oversample { requested: 4, available: 3 }));
    assert!(!paths.sections_dir().exists());
}

#[test]
fn rerun_skips_existing_section_but_still_writes_its_fixture() {
    let dir = tempfile::tempdir().unwrap();
    let paths = OutputPaths::new(dir.path(), "RESUME");
    let lines = gcode_lines(5 * 90 - 7); // 5 sections, last one short
    let r = reference();
    let renderer = ArtifactRenderer::default();

    // every section sampled, so index 3 is guaranteed to be in the set
    let cfg = config(5);

    paths.create_dirs(true).unwrap();
    std::fs::write(paths.section_artifact(3), b"from an earlier run").unwrap();

    let first = run_build(&cfg, Some(&r), &lines, &paths, &renderer).expect("first run");
    assert!(first.is_success());
    assert_eq!(first.sampled.len(), 5);
    for rep in &first.reports {
        if rep.range.index == 3 {
            assert_eq!(rep.status, BuildStatus::Skipped);
        } else {
            assert!(matches!(rep.status, BuildStatus::Built { .. }));
        }
        assert_eq!(rep.fixture, FixtureStatus::Written);
    }
    assert_eq!(first.reports[4].range.len(), 90 - 7);
    assert_eq!(
        std::fs::read(paths.section_artifact(3)).unwrap(),
        b"from an earlier run"
    );
    let case3 = std::fs::read_to_string(paths.fixture(3)).unwrap();
    assert_eq!(case3.lines().count(), 90);
    assert_eq!(case3.lines().next().unwrap(), lines[270]);

    let second = run_build(&cfg, Some(&r), &lines, &paths, &renderer).expect("second run");
    assert_eq!(second.skipped(), 5);
    assert_eq!(second.built(), 0);
    assert_eq!(second.fixtures_written(), 0);
}

#[test]
fn outputs_are_deterministic_across_runs() {
    let lines = gcode_lines(181);
    let r = reference();
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    let pa = OutputPaths::new(a.path(), "D");
    let pb = OutputPaths::new(b.path(), "D");
    let mut cfg = config(0);
    cfg.workers = 3;

    run_build(&cfg, Some(&r), &lines, &pa, &ArtifactRenderer::default()).unwrap();
    cfg.workers = 1;
    run_build(&cfg, Some(&r), &lines, &pb, &ArtifactRenderer::default()).unwrap();

    for i in 0..3 {
        let x = std::fs::read(pa.section_artifact(i)).unwrap();
        let y = std::fs::read(pb.section_artifact(i)).unwrap();
        assert_eq!(x, y, "section {i}");
    }
}

#[test]
fn assembly_stacks_all_sections() {
    let dir = tempfile::tempdir().unwrap();
    let paths = OutputPaths::new(dir.path(), "PIP");
    let lines = gcode_lines(250);
    let mut cfg = config(0);
    cfg.produce_assembly = true;

    let summary = run_build(
        &cfg,
        Some(&reference()),
        &lines,
        &paths,
        &ArtifactRenderer::default(),
    )
    .unwrap();

    let out = summary.assembly.expect("assembly path");
    let a = assembly::read_file(&out).unwrap();
    assert_eq!(a.parts.len(), 3);
    assert_eq!(a.parts[2].offset, 0.0);
    assert!(a.parts[0].offset > a.parts[1].offset);
    assert_eq!(a.placement_count() as u64, summary.stats.placements);
    assert_eq!(a.reference_id, reference().id());
}
