//! Runs the binary against presets and scenario files and reads its reports.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tariff-lab"))
        .args(args)
        .output()
        .expect("tariff-lab process should run")
}

fn stdout_of(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout should be valid UTF-8")
}

/// Value after the `label` prefix on the first matching line, without currency.
fn metric(stdout: &str, label: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|l| l.starts_with(label))
        .unwrap_or_else(|| panic!("missing line {label:?} in:\n{stdout}"));
    let value = line[label.len()..]
        .trim()
        .trim_start_matches(['$', '₹'])
        .split_whitespace()
        .next()
        .unwrap_or_default();
    value
        .parse()
        .unwrap_or_else(|_| panic!("cannot parse {value:?} from {line:?}"))
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tariff-lab-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn presets_run_and_report_every_pipeline() {
    let generic = stdout_of(&["--preset", "generic"]);
    let maharashtra = stdout_of(&["--preset", "maharashtra"]);

    for out in [&generic, &maharashtra] {
        assert!(out.contains("--- Weekly Bill Comparison"));
        assert!(out.contains("--- Demand Response Impact ---"));
        assert!(out.contains("--- Privacy Risk: k-Anonymity ---"));
        assert!(out.contains("--- Recommended Window ---"));
    }
    assert!(generic.contains('$'));
    assert!(maharashtra.contains('₹'));

    let generic_bill = metric(&generic, "Original bill:");
    let maharashtra_bill = metric(&maharashtra, "Original bill:");
    assert!(
        maharashtra_bill > 10.0 * generic_bill,
        "rupee bill should dwarf the generic one: generic={generic_bill}, maharashtra={maharashtra_bill}"
    );
    assert!(metric(&generic, "After load shifting:") <= generic_bill);
}

#[test]
fn scenario_file_matches_equivalent_preset() {
    let from_file = stdout_of(&["--scenario", "scenarios/generic.toml"]);
    let from_preset = stdout_of(&["--preset", "generic"]);
    assert_eq!(from_file, from_preset);
}

#[test]
fn maharashtra_scenario_file_runs() {
    let out = stdout_of(&["--scenario", "scenarios/maharashtra.toml", "tariff"]);
    assert!(out.contains("Critical Peak"));
    assert!(metric(&out, "Original bill:") > 0.0);
}

#[test]
fn subcommand_limits_output() {
    let out = stdout_of(&["carbon"]);
    assert!(out.contains("Best: 15:00"));
    assert!(!out.contains("Demand Response Impact"));
    assert!(!out.contains("k-anonymity"));
}

#[test]
fn seed_override_changes_privacy_tables() {
    let a = stdout_of(&["--seed", "1", "privacy"]);
    let b = stdout_of(&["--seed", "1", "privacy"]);
    assert_eq!(a, b);
    assert!(metric(&a, "k-anonymity (real):") >= 0.0);
}

#[test]
fn invalid_scenario_exits_with_error() {
    let dir = scratch_dir("invalid");
    fs::create_dir_all(&dir).expect("create scratch dir");
    let path = dir.join("bad.toml");
    fs::write(&path, "[tariff]\nflex_pct = 33\n\n[carbon]\nduration = 9\n").expect("write toml");

    let output = run(&["--scenario", path.to_str().unwrap_or_default()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("tariff.flex_pct"), "stderr={stderr}");
    assert!(stderr.contains("carbon.duration"), "stderr={stderr}");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn export_dir_receives_all_series() {
    let dir = scratch_dir("export");
    stdout_of(&["--export-dir", dir.to_str().unwrap_or_default()]);

    for (name, rows) in [
        ("shifted_readings.csv", 169),
        ("real_records.csv", 51),
        ("synthetic_records.csv", 151),
        ("carbon_intensity.csv", 25),
    ] {
        let content = fs::read_to_string(dir.join(name)).expect("exported file");
        assert_eq!(content.lines().count(), rows, "{name}");
    }
    let _ = fs::remove_dir_all(&dir);
}
