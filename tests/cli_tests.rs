use regex::Regex;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
    passage_path: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let passage_path = dir.path().join("scale.csv");

        // C major scale, one octave, eighth notes at 120 bpm
        let mut f = File::create(&passage_path).unwrap();
        writeln!(f, "x,time,duration,measure,name").unwrap();
        let names = ["C4", "D4", "E4", "F4", "G4", "A4", "B4", "C5"];
        for (i, name) in names.iter().enumerate() {
            writeln!(f, "{},{},0.5,{},{}", i as f32 * 2.35, i as f32 * 0.25, 1 + i / 4, name)
                .unwrap();
        }

        Self { dir, passage_path }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fingerforge"))
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

fn fingers_in_csv(path: &PathBuf) -> Vec<u8> {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    let col = headers.iter().position(|h| h == "fingering").unwrap();
    rdr.records()
        .map(|r| r.unwrap()[col].parse().unwrap())
        .collect()
}

#[test]
fn test_cli_finger_writes_output() {
    let ctx = TestContext::new();
    let out_path = ctx.path("scale_fingered.csv");
    let report_path = ctx.path("report.json");

    let output = run(&[
        "finger",
        "-i",
        ctx.passage_path.to_str().unwrap(),
        "-o",
        out_path.to_str().unwrap(),
        "--report-json",
        report_path.to_str().unwrap(),
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stdout: {}", stdout);

    // Summary line below the table
    let re = Regex::new(r"Notes: 8 \| Mean v: \d+\.\d+ \| Infeasible windows: \d+ \| Filled: \d+")
        .unwrap();
    assert!(re.is_match(&stdout), "Summary missing:\n{}", stdout);
    assert!(stdout.contains("C5"));

    let fingers = fingers_in_csv(&out_path);
    assert_eq!(fingers.len(), 8);
    assert!(fingers.iter().all(|f| (1..=5).contains(f)), "{:?}", fingers);

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["steps"].as_array().unwrap().len(), 8);
}

#[test]
fn test_cli_quiet_suppresses_table() {
    let ctx = TestContext::new();
    let output = run(&["finger", "--quiet", "-i", ctx.passage_path.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Mean v:"), "{}", stdout);
}

#[test]
fn test_cli_config_file_and_override() {
    let ctx = TestContext::new();
    let cfg_path = ctx.path("cfg.json");
    fs::write(&cfg_path, r#"{ "hand": { "side": "left", "size": "XS" } }"#).unwrap();

    let output = run(&[
        "finger",
        "--config",
        cfg_path.to_str().unwrap(),
        "--size",
        "l",
        "--quiet",
        "-i",
        ctx.passage_path.to_str().unwrap(),
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "{}", stdout);
    assert!(stdout.contains("left hand (size L)"), "{}", stdout);
}

#[test]
fn test_cli_audit_roundtrip() {
    let ctx = TestContext::new();
    let out_path = ctx.path("fingered.json");

    let finger = run(&[
        "finger",
        "--quiet",
        "-i",
        ctx.passage_path.to_str().unwrap(),
        "-o",
        out_path.to_str().unwrap(),
    ]);
    assert!(finger.status.success());

    let audit = run(&["audit", "-i", out_path.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&audit.stdout);
    assert!(audit.status.success(), "{}", stdout);
    assert!(stdout.contains("FINGERING AUDIT"));
    assert!(stdout.contains("Violations: 0"), "{}", stdout);
}

#[test]
fn test_cli_audit_rejects_unfingered_passage() {
    let ctx = TestContext::new();
    let audit = run(&["audit", "-i", ctx.passage_path.to_str().unwrap()]);
    assert!(!audit.status.success());
}

#[test]
fn test_cli_sizes() {
    let output = run(&["sizes"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for label in ["XXS", "XS", "M", "XXL"] {
        assert!(stdout.contains(label), "{} missing", label);
    }
    assert!(stdout.contains("17.2")); // M: 21 * 0.82
}

#[test]
fn test_cli_bad_input_extension_fails() {
    let ctx = TestContext::new();
    let bad = ctx.path("scale.txt");
    fs::copy(&ctx.passage_path, &bad).unwrap();
    let output = run(&["finger", "-i", bad.to_str().unwrap()]);
    assert!(!output.status.success());
}
