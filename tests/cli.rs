use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

/// Command with HOME pointed at an empty directory so a user's own config
/// file never leaks into the tests.
fn gd_calc(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gd-calc").unwrap();
    cmd.env("HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_english_worked_example() {
    let home = tempfile::tempdir().unwrap();
    gd_calc(&home)
        .args([
            "english",
            "--reading",
            "5",
            "--seven",
            "5",
            "--cloze",
            "4",
            "--grammar",
            "6",
            "--short-writing",
            "8",
            "--long-writing",
            "12",
            "--listening",
            "20",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Estimated score: 76.33"))
        .stdout(predicate::str::contains("52.0/120"))
        .stdout(predicate::str::contains("56.33/130"));
}

#[test]
fn test_english_rejects_impossible_counts() {
    let home = tempfile::tempdir().unwrap();
    gd_calc(&home)
        .args(["english", "--reading", "1000", "--listening", "31"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("reading: 1000 correct answers exceeds"))
        .stderr(predicate::str::contains("listening: must be between 0 and 30"));
}

#[test]
fn test_english_json() {
    let home = tempfile::tempdir().unwrap();
    let output = gd_calc(&home)
        .args(["english", "--listening", "30", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["score"]["final_score"], 30.0);
    assert_eq!(value["badge"], "struggling");
    assert_eq!(value["breakdown"].as_array().unwrap().len(), 7);
}

#[test]
fn test_scale_builtin_dataset() {
    let home = tempfile::tempdir().unwrap();
    gd_calc(&home)
        .args(["scale", "--chemistry", "80", "--biology", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("chemistry"))
        .stdout(predicate::str::contains("86"))
        .stdout(predicate::str::contains("biology"));
}

#[test]
fn test_scale_warns_on_sample_dataset() {
    let home = tempfile::tempdir().unwrap();
    gd_calc(&home)
        .args(["scale", "--chemistry", "80"])
        .assert()
        .success()
        .stderr(predicate::str::contains("illustrative sample data"));
}

#[test]
fn test_scale_rejects_bad_input() {
    let home = tempfile::tempdir().unwrap();
    gd_calc(&home)
        .args(["scale", "--chemistry", "abc"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a whole number"));

    gd_calc(&home)
        .args(["scale", "--chemistry", "101"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("outside the raw score range"));
}

#[test]
fn test_scale_unknown_dataset() {
    let home = tempfile::tempdir().unwrap();
    gd_calc(&home)
        .args(["scale", "--dataset", "nope", "--chemistry", "50"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown dataset 'nope'"));
}

#[test]
fn test_scale_with_custom_dataset() {
    let home = tempfile::tempdir().unwrap();
    let config = write_config(
        r#"
default_dataset: "tie"
datasets:
  - key: "tie"
    tables:
      geography: [[10, 50], [20, 90]]
"#,
    );

    let output = gd_calc(&home)
        .args(["--config"])
        .arg(config.path())
        .args(["scale", "--geography", "15", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["scaled"], 50.0);
    assert_eq!(value[0]["resolution"]["rule"], "nearest");
}

#[test]
fn test_chart_tsv_has_101_rows() {
    let home = tempfile::tempdir().unwrap();
    let output = gd_calc(&home)
        .args(["chart", "--subject", "chemistry", "--subject", "politics"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 102);
    assert_eq!(
        lines[0],
        "raw\tchemistry_scaled\tchemistry_percentile\tpolitics_scaled\tpolitics_percentile"
    );
}

#[test]
fn test_chart_json_without_subjects() {
    let home = tempfile::tempdir().unwrap();
    let output = gd_calc(&home)
        .args(["chart", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 101);
}

#[test]
fn test_datasets_lists_builtin_default() {
    let home = tempfile::tempdir().unwrap();
    gd_calc(&home)
        .arg("datasets")
        .assert()
        .success()
        .stdout(predicate::str::contains("* sample"));
}

#[test]
fn test_invalid_config_reports_all_errors() {
    let home = tempfile::tempdir().unwrap();
    let config = write_config(
        r#"
composite:
  grammar: -1
datasets:
  - key: "bad"
    tables:
      chemistry: [[50, 10]]
"#,
    );

    gd_calc(&home)
        .args(["--config"])
        .arg(config.path())
        .arg("datasets")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("composite.grammar"))
        .stderr(predicate::str::contains("datasets[0].tables.chemistry[0]"));
}

#[test]
fn test_missing_explicit_config() {
    let home = tempfile::tempdir().unwrap();
    gd_calc(&home)
        .args(["--config", "/nonexistent/gd-calc.yaml", "datasets"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_config_prints_effective_default() {
    let home = tempfile::tempdir().unwrap();
    gd_calc(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("default_dataset"))
        .stdout(predicate::str::contains("sample"))
        .stdout(predicate::str::contains("cloze"));
}
