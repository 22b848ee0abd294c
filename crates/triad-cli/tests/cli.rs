//! CLI command integration tests.
//! Each test clears TRIAD_CONFIG so a developer's environment cannot leak in.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn triad_cmd() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("triad").unwrap();
    cmd.env_remove("TRIAD_CONFIG");
    cmd
}

#[test]
fn simulate_default_jump() {
    triad_cmd()
        .args(["simulate"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Without catalytic nudge (sustained contemplative holding):",
        ))
        .stdout(predicate::str::contains("With gentle nudge (insight emerges):"))
        .stdout(predicate::str::contains("jump at t=25.000 (idx 249"))
        .stdout(predicate::str::contains("post-jump:"));
}

#[test]
fn simulate_json_report() {
    let output = triad_cmd()
        .args(["simulate", "--mode", "pulse", "--samples", "200", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["t"].as_array().unwrap().len(), 200);
    assert_eq!(report["without"].as_array().unwrap().len(), 200);
    assert_eq!(report["with"][0].as_array().unwrap().len(), 4);
    assert_eq!(report["nudge"]["mode"], "pulse");
    assert!(report["y_nudge"].is_null());

    let gain = report["summary"]["coherence_gain"].as_f64().unwrap();
    assert!(gain > 0.5, "pulse should lift coherence, gain = {gain}");
}

#[test]
fn simulate_rejects_unknown_mode() {
    triad_cmd()
        .args(["simulate", "--mode", "teleport"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("teleport"));
}

#[test]
fn simulate_rejects_out_of_range_time() {
    triad_cmd()
        .args(["simulate", "--intervention-time", "80"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid argument"));
}

#[test]
fn simulate_rejects_short_y0() {
    triad_cmd()
        .args(["simulate", "--y0", "0.2,0.1,0.15"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly 4 components"));
}

#[test]
fn config_file_overrides_and_nudge() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("triad.toml");
    std::fs::write(
        &path,
        "[model]\nsteepness = 4.0\n\n[nudge]\nmode = \"pulse\"\nwidth = 3.0\npeak = [0.9, 0.9, 0.9, 0.0]\n",
    )
    .unwrap();

    triad_cmd()
        .arg("params")
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("steepness = 4.0"))
        .stdout(predicate::str::contains("mode = \"pulse\""))
        .stdout(predicate::str::contains("width = 3.0"));

    // Same config picked up through the environment
    let mut cmd = triad_cmd();
    cmd.env("TRIAD_CONFIG", &path)
        .args(["simulate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pulse at t="));
}

#[test]
fn flag_overrides_config() {
    triad_cmd()
        .args(["params", "--gamma", "12.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gamma = 12.5"));
}

#[test]
fn invalid_override_rejected() {
    triad_cmd()
        .args(["params", "--threshold", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("threshold must be positive"));
}

#[test]
fn curve_table() {
    let output = triad_cmd()
        .args(["curve", "--points", "3"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows: Vec<&str> = stdout.lines().filter(|l| !l.starts_with('#')).collect();
    assert_eq!(rows, ["0.0000\t0.000000", "0.5000\t5.000000", "1.0000\t9.846154"]);
}

#[test]
fn missing_config_file_fails() {
    triad_cmd()
        .args(["params", "--config", "/nonexistent/triad.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}
