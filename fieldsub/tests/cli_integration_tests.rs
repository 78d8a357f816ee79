// fieldsub/tests/cli_integration_tests.rs
//! Command-line integration tests for the `fieldsub` binary.
//!
//! Each test writes its rule file into a temporary directory, runs the binary with
//! `assert_cmd`, and asserts on stdout, stderr and the exit status.

use assert_cmd::Command;
use assert_cmd::assert::Assert;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

const EXPIRATION_RULES: &str = r#"
rules:
  - field: month
    pattern: "^(\\d\\d)$"
    template: "Exp: $1"
  - field: year
    pattern: "^(\\d\\d\\d\\d)$"
    template: " / $1"
"#;

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn fieldsub(args: &[&str], stdin: Option<&[u8]>) -> Assert {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("fieldsub"));
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    if let Some(input) = stdin {
        cmd.write_stdin(input.to_vec());
    }
    cmd.assert()
}

#[test]
fn test_apply_composes_expiration_date() {
    let dir = tempdir().unwrap();
    let rules = write_file(&dir, "rules.yaml", EXPIRATION_RULES);

    fieldsub(
        &["apply", "--rules", rules.to_str().unwrap(), "-f", "month=07", "-f", "year=2019"],
        None,
    )
    .success()
    .stdout("Exp: 07 / 2019\n");
}

#[test]
fn test_apply_reads_values_file() {
    let dir = tempdir().unwrap();
    let rules = write_file(
        &dir,
        "rules.yaml",
        r#"
rules:
  - field: cc_number
    pattern: "^.*(\\d\\d\\d\\d)$"
    template: "...$1"
"#,
    );
    let values = write_file(&dir, "values.json", r#"{"cc_number": "4111111111111234"}"#);

    fieldsub(
        &["apply", "--rules", rules.to_str().unwrap(), "--values", values.to_str().unwrap()],
        None,
    )
    .success()
    .stdout("...1234\n");
}

#[test]
fn test_apply_fails_when_a_field_is_missing() {
    let dir = tempdir().unwrap();
    let rules = write_file(&dir, "rules.yaml", EXPIRATION_RULES);

    fieldsub(&["apply", "--rules", rules.to_str().unwrap(), "-f", "month=07"], None)
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No value for field 'year'"));
}

#[test]
fn test_apply_report_lists_skipped_rule() {
    let dir = tempdir().unwrap();
    let rules = write_file(
        &dir,
        "rules.yaml",
        r#"
rules:
  - field: month
    pattern: "^(\\d\\d)$"
    template: "Exp: $2"
  - field: year
    pattern: "^(\\d\\d\\d\\d)$"
    template: "$1"
"#,
    );

    fieldsub(
        &[
            "apply", "--rules", rules.to_str().unwrap(),
            "-f", "month=07", "-f", "year=2019", "--report",
        ],
        None,
    )
    .success()
    .stdout("2019\n")
    .stderr(predicate::str::contains("field 'month'").and(predicate::str::contains("No group 2")))
    .stderr(predicate::str::contains("07").not());
}

#[test]
fn test_apply_json_output() {
    let dir = tempdir().unwrap();
    let rules = write_file(&dir, "rules.yaml", EXPIRATION_RULES);

    let output = fieldsub(
        &[
            "apply", "--rules", rules.to_str().unwrap(),
            "-f", "month=07", "-f", "year=2019", "--json",
        ],
        None,
    )
    .success()
    .get_output()
    .stdout
    .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["text"], "Exp: 07 / 2019");
    assert_eq!(value["skipped"], serde_json::json!([]));
}

#[test]
fn test_check_rejects_invalid_pattern() {
    let dir = tempdir().unwrap();
    let rules = write_file(
        &dir,
        "rules.yaml",
        r#"
rules:
  - field: broken
    pattern: "(["
    template: "$1"
"#,
    );

    fieldsub(&["check", "--rules", rules.to_str().unwrap()], None)
        .failure()
        .stderr(predicate::str::contains("broken"));
}

#[test]
fn test_check_warns_about_unsatisfiable_template() {
    let dir = tempdir().unwrap();
    let rules = write_file(
        &dir,
        "rules.yaml",
        r#"
rules:
  - field: month
    pattern: "^(\\d\\d)$"
    template: "$3"
"#,
    );

    fieldsub(&["check", "--rules", rules.to_str().unwrap()], None)
        .success()
        .stderr(predicate::str::contains("No group 3"))
        .stderr(predicate::str::contains("1 rule(s) built"));
}

#[test]
fn test_encode_then_decode_round_trip() {
    let dir = tempdir().unwrap();
    let rules = write_file(&dir, "rules.yaml", EXPIRATION_RULES);
    let record = dir.path().join("rules.bin");

    fieldsub(
        &[
            "-q", "encode", "--rules", rules.to_str().unwrap(),
            "--format", "bin", "-o", record.to_str().unwrap(),
        ],
        None,
    )
    .success();

    fieldsub(&["decode", "--format", "bin", "-i", record.to_str().unwrap()], None)
        .success()
        .stdout(predicate::str::contains("field: month"))
        .stdout(predicate::str::contains("field: year"));
}

#[test]
fn test_encode_json_to_stdout_has_parallel_arrays() {
    let dir = tempdir().unwrap();
    let rules = write_file(&dir, "rules.yaml", EXPIRATION_RULES);

    let output = fieldsub(&["encode", "--rules", rules.to_str().unwrap()], None)
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["field_ids"], serde_json::json!(["month", "year"]));
    assert_eq!(value["templates"], serde_json::json!(["Exp: $1", " / $1"]));
}

#[test]
fn test_decode_rejects_malformed_record_from_stdin() {
    let record = br#"{"field_ids":["a","b"],"patterns":["x"],"templates":["y","z"]}"#;
    fieldsub(&["decode", "--format", "json"], Some(record))
        .failure()
        .stderr(predicate::str::contains("Malformed rule set"));
}
