use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn repo_path(rel: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..").join(rel)
}

fn run_ok(cmd: &mut Command) -> Output {
    let out = cmd.output().expect("spawn command");
    assert!(
        out.status.success(),
        "command failed: status={:?}\nstdout:\n{}\nstderr:\n{}",
        out.status.code(),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
    out
}

fn ggb(args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ggb-cli"));
    cmd.args(args);
    cmd
}

fn build_small(dir: &Path) -> PathBuf {
    let input = dir.join("SMALL.gcode");
    fs::write(
        &input,
        "; tiny\nG28\nG90\nG1 X10 ; first move\nG1 Y-5 F1200\nM73 P50\n",
    )
    .unwrap();
    run_ok(&mut ggb(&[
        "build",
        "--in",
        input.to_str().unwrap(),
        "--reference",
        repo_path("configs/progref.toml").to_str().unwrap(),
        "--no-fixtures",
        "--assemble",
    ]));
    input
}

#[test]
fn encode_line_prints_opcode_and_half_bits() {
    let o = run_ok(&mut ggb(&[
        "encode-line",
        "--reference",
        repo_path("configs/progref.toml").to_str().unwrap(),
        "--line",
        "G1 X10",
    ]));
    let stdout = String::from_utf8_lossy(&o.stdout);
    // G1 is opcode 2; 10.0 is 0x4900
    assert!(stdout.contains("ch0 opcode     2 00000010"), "{stdout}");
    assert!(stdout.contains("ch1 param  18688 0100100100000000"), "{stdout}");
}

#[test]
fn encode_line_without_reference_fails() {
    let dir = tempfile::tempdir().unwrap();
    let o = ggb(&[
        "encode-line",
        "--reference",
        dir.path().join("missing.toml").to_str().unwrap(),
        "--line",
        "G1 X10",
    ])
    .output()
    .unwrap();
    assert!(!o.status.success());
}

#[test]
fn inspect_section_rows_match_source_lines() {
    let dir = tempfile::tempdir().unwrap();
    build_small(dir.path());

    let section = dir.path().join("SMALL_SECTIONS/SMALLSection0.ggs");
    let o = run_ok(&mut ggb(&["inspect", "--artifact", section.to_str().unwrap(), "--rows"]));
    let stderr = String::from_utf8_lossy(&o.stderr);
    let stdout = String::from_utf8_lossy(&o.stdout);

    assert!(stderr.contains("crc_ok        = true"));
    assert!(stderr.contains("lines         = 0..5"));
    // rows 0..=3 encoded, row 4 (M73) dropped
    let rows: Vec<&str> = stdout.lines().collect();
    assert_eq!(rows.len(), 4, "{stdout}");
    assert!(rows[0].starts_with("row   0 ch0=00000111"));
    assert!(rows[2].contains("ch1=0100100100000000"));
    // -5.0 = 0xC500, 1200.0 = 0x64B0
    assert!(rows[3].contains("ch2=1100010100000000"));
    assert!(rows[3].contains("ch5=0110010010110000"));
}

#[test]
fn assemble_rebuilds_the_stacked_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let input = build_small(dir.path());

    let pip = dir.path().join("SMALL_PIP.gga");
    assert!(pip.exists());
    let first = fs::read(&pip).unwrap();
    fs::remove_file(&pip).unwrap();

    run_ok(&mut ggb(&["assemble", "--in", input.to_str().unwrap()]));
    assert_eq!(fs::read(&pip).unwrap(), first);

    let o = run_ok(&mut ggb(&["inspect", "--artifact", pip.to_str().unwrap()]));
    let stderr = String::from_utf8_lossy(&o.stderr);
    assert!(stderr.contains("parts         = 1"));
}

#[test]
fn inspect_rejects_foreign_files() {
    let dir = tempfile::tempdir().unwrap();
    let junk = dir.path().join("junk.ggs");
    fs::write(&junk, b"not an artifact").unwrap();
    let o = ggb(&["inspect", "--artifact", junk.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!o.status.success());
}
