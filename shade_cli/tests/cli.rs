use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::path::PathBuf;
use assert_cmd::Command;
use tempfile::tempdir;

// Minimal valid TOML config paced fast enough for tests
fn write_valid_config(dir: &tempfile::TempDir) -> PathBuf {
    let toml = r#"
[sampling]
cadence_secs = 0.05
window_secs = 0.5
capacity = 20

[control]
angle_offset_deg = 30.0
gain = 0.75
reference_temp = 30.0

[timeouts]
sensor_ms = 50

[pacing]
tick_ms = 1
publish_secs = 1
"#;
    let path = dir.path().join("cfg.toml");
    fs::write(&path, toml).unwrap();
    path
}

#[rstest]
#[case(&["--help"], 0, "Usage:", "stdout")]
#[case(&["self-check"], 0, "self-check: ok", "stdout")]
#[case(&["run", "--ticks", "50", "--stats"], 0, "ticks=50", "stdout")]
fn cli_table_cases(
    #[case] args: &[&str],
    #[case] exit_code: i32,
    #[case] needle: &str,
    #[case] stream: &str,
) {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    let mut cmd = Command::cargo_bin("shade_cli").unwrap();
    cmd.arg("--config").arg(&cfg);
    cmd.args(args);

    let assert = cmd.assert().code(exit_code);
    match stream {
        "stdout" => assert.stdout(predicate::str::contains(needle)),
        _ => assert.stderr(predicate::str::contains(needle)),
    };
}

#[test]
fn missing_config_path_is_an_error() {
    let mut cmd = Command::cargo_bin("shade_cli").unwrap();
    cmd.args(["--config", "/nonexistent/shade.toml", "self-check"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("config"));
}

#[test]
fn invalid_config_is_rejected_with_a_hint() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[sampling]\ncadence_secs = -1.0\n").unwrap();

    let mut cmd = Command::cargo_bin("shade_cli").unwrap();
    cmd.arg("--config").arg(&path).arg("self-check");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("cadence_secs"));
}

#[test]
fn run_emits_json_stats_when_asked() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    let mut cmd = Command::cargo_bin("shade_cli").unwrap();
    cmd.arg("--config")
        .arg(&cfg)
        .args(["--json", "run", "--ticks", "30", "--stats"]);
    let out = cmd.assert().success().get_output().stdout.clone();

    let text = String::from_utf8(out).unwrap();
    let stats_line = text
        .lines()
        .find(|l| l.contains("\"event\":\"stats\""))
        .expect("stats line present");
    let v: serde_json::Value = serde_json::from_str(stats_line).unwrap();
    assert_eq!(v["ticks"], 30);
    assert!(v["last_angle"].as_u64().unwrap() <= 180);
}

#[test]
fn stdin_updates_are_accepted_while_running() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    let mut cmd = Command::cargo_bin("shade_cli").unwrap();
    cmd.arg("--config")
        .arg(&cfg)
        .args(["run", "--ticks", "50", "--stats", "--stdin-updates"])
        .write_stdin("gain 0.2\nnot-a-param 1\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ticks=50"));
}
