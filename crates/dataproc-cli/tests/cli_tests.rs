//! Integration tests for the `dataproc` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to run each subcommand through
//! the actual binary, covering stdin/stdout piping, file I/O, exit codes, and
//! error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};

/// Helper: absolute path to a file under `tests/fixtures/`.
macro_rules! fixture {
    ($name:literal) => {
        concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/", $name)
    };
}

fn dataproc() -> Command {
    let mut cmd = Command::cargo_bin("dataproc").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Run the command and parse its stdout as JSON.
fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout must be valid JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// flatten
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn flatten_stdin_to_stdout() {
    dataproc()
        .arg("flatten")
        .write_stdin(r#"{"user":{"name":"Alice","age":30}}"#)
        .assert()
        .success()
        .stdout("{\"user.name\": \"Alice\", \"user.age\": 30}\n");
}

#[test]
fn flatten_file_drops_empty_objects_and_keeps_arrays() {
    let value = stdout_json(dataproc().args(["flatten", "-i", fixture!("nested.json")]));
    assert_eq!(
        value,
        json!({
            "user.name": "Alice",
            "user.age": 30,
            "user.address.city": "Shanghai",
            "user.address.zip": "200000",
            "tags": ["admin", "dev"],
            "active": true
        })
    );
}

#[test]
fn flatten_custom_separator() {
    let value = stdout_json(
        dataproc()
            .args(["flatten", "--separator", "/"])
            .write_stdin(r#"{"a":{"b":{"c":1}}}"#),
    );
    assert_eq!(value, json!({"a/b/c": 1}));
}

#[test]
fn flatten_pretty_output() {
    dataproc()
        .args(["flatten", "--pretty"])
        .write_stdin(r#"{"a":{"b":1}}"#)
        .assert()
        .success()
        .stdout("{\n  \"a.b\": 1\n}\n");
}

#[test]
fn flatten_scalar_input_uses_empty_key() {
    let value = stdout_json(dataproc().arg("flatten").write_stdin("7"));
    assert_eq!(value, json!({"": 7}));
}

#[test]
fn flatten_writes_output_file() {
    let dir = std::env::temp_dir().join(format!("dataproc-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let out = dir.join("flat.json");

    dataproc()
        .args(["flatten", "-i", fixture!("nested.json"), "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written["user.address.city"], json!("Shanghai"));
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn flatten_invalid_json_fails() {
    dataproc()
        .arg("flatten")
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON in <stdin>"));
}

#[test]
fn flatten_missing_file_fails() {
    dataproc()
        .args(["flatten", "-i", "/nonexistent/input.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// merge
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn merge_files_later_wins_and_is_shallow() {
    let value = stdout_json(dataproc().args([
        "merge",
        fixture!("defaults.json"),
        fixture!("overrides.json"),
    ]));
    assert_eq!(
        value,
        json!({
            "host": "localhost",
            "port": 9090,
            "tls": {"cert": "/etc/cert.pem"},
            "debug": false,
            "name": "prod"
        })
    );
}

#[test]
fn merge_skips_null_documents() {
    let value = stdout_json(dataproc().args([
        "merge",
        fixture!("null.json"),
        fixture!("overrides.json"),
        fixture!("null.json"),
    ]));
    assert_eq!(value["port"], json!(9090));
    assert_eq!(value.as_object().unwrap().len(), 3);
}

#[test]
fn merge_reads_stdin_for_dash() {
    let value = stdout_json(
        dataproc()
            .args(["merge", fixture!("defaults.json"), "-"])
            .write_stdin(r#"{"host":"example.com"}"#),
    );
    assert_eq!(value["host"], json!("example.com"));
    assert_eq!(value["port"], json!(8080));
}

#[test]
fn merge_rejects_non_object_documents() {
    dataproc()
        .args(["merge", fixture!("defaults.json"), fixture!("array.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot merge input"))
        .stderr(predicate::str::contains("found an array"));
}

#[test]
fn merge_requires_at_least_one_input() {
    dataproc().arg("merge").assert().failure();
}

// ─────────────────────────────────────────────────────────────────────────────
// filter
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn filter_includes_listed_keys() {
    let value = stdout_json(
        dataproc()
            .args(["filter", "--keys", "a,b,z"])
            .write_stdin(r#"{"a":1,"b":2,"c":3}"#),
    );
    assert_eq!(value, json!({"a": 1, "b": 2}));
}

#[test]
fn filter_excludes_listed_keys() {
    let value = stdout_json(
        dataproc()
            .args(["filter", "--keys", "c", "--exclude"])
            .write_stdin(r#"{"a":1,"b":2,"c":3}"#),
    );
    assert_eq!(value, json!({"a": 1, "b": 2}));
}

#[test]
fn filter_after_flatten_pipeline() {
    let flat = dataproc()
        .args(["flatten", "-i", fixture!("nested.json")])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value = stdout_json(
        dataproc()
            .args(["filter", "--keys", "user.name, active"])
            .write_stdin(flat),
    );
    assert_eq!(value, json!({"user.name": "Alice", "active": true}));
}

#[test]
fn filter_rejects_non_object_input() {
    dataproc()
        .args(["filter", "--keys", "a"])
        .write_stdin("[1,2]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a JSON object"));
}

// ─────────────────────────────────────────────────────────────────────────────
// csv
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn csv_splits_and_trims() {
    dataproc()
        .args(["csv", "apple, banana ,cherry"])
        .assert()
        .success()
        .stdout("[\"apple\", \"banana\", \"cherry\"]\n");
}

#[test]
fn csv_custom_delimiter() {
    let value = stdout_json(dataproc().args(["csv", "a;b;;c", "--delimiter", ";"]));
    assert_eq!(value, json!(["a", "b", "", "c"]));
}

#[test]
fn csv_empty_delimiter_fails() {
    dataproc()
        .args(["csv", "a,b", "--delimiter", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("delimiter must not be empty"));
}

// ─────────────────────────────────────────────────────────────────────────────
// validate
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn validate_email_valid() {
    dataproc()
        .args(["validate", "email", "user@example.com"])
        .assert()
        .success()
        .stdout("valid\n");
}

#[test]
fn validate_email_invalid_exits_nonzero() {
    dataproc()
        .args(["validate", "email", "invalid-email"])
        .assert()
        .code(1)
        .stdout("invalid\n");
}

#[test]
fn validate_phone_defaults_to_cn() {
    dataproc()
        .args(["validate", "phone", "138 1234 5678"])
        .assert()
        .success()
        .stdout("valid\n");
}

#[test]
fn validate_phone_us() {
    dataproc()
        .args(["validate", "phone", "(555) 123-4567", "--country", "US"])
        .assert()
        .success();

    dataproc()
        .args(["validate", "phone", "13812345678", "--country", "US"])
        .assert()
        .code(1);
}

#[test]
fn validate_phone_unknown_country_falls_back_to_cn() {
    dataproc()
        .args(["validate", "phone", "13812345678", "--country", "FR"])
        .assert()
        .success();
}

// ─────────────────────────────────────────────────────────────────────────────
// json
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn json_reformats_compact_with_spaces() {
    dataproc()
        .arg("json")
        .write_stdin("{\"name\":\"Bob\",\"langs\":[\"rust\",\"中文\"]}")
        .assert()
        .success()
        .stdout("{\"name\": \"Bob\", \"langs\": [\"rust\", \"中文\"]}\n");
}

#[test]
fn json_pretty() {
    dataproc()
        .args(["json", "--pretty"])
        .write_stdin("[1,{\"a\":null}]")
        .assert()
        .success()
        .stdout("[\n  1,\n  {\n    \"a\": null\n  }\n]\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// logging and help
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn verbose_logs_to_stderr_only() {
    dataproc()
        .args(["-v", "flatten"])
        .write_stdin(r#"{"a":{"b":1}}"#)
        .assert()
        .success()
        .stdout("{\"a.b\": 1}\n")
        .stderr(predicate::str::contains("flattened input"));
}

#[test]
fn quiet_by_default() {
    dataproc()
        .arg("flatten")
        .write_stdin(r#"{"a":1}"#)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn help_lists_subcommands() {
    dataproc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("flatten"))
        .stdout(predicate::str::contains("merge"))
        .stdout(predicate::str::contains("filter"))
        .stdout(predicate::str::contains("validate"));
}
