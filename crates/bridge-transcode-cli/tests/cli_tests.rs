//! Integration tests for the `bridge-transcode` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to drive each subcommand through
//! the actual binary: stdin/stdout piping, file I/O, option loading, and
//! error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn bin() -> Command {
    Command::cargo_bin("bridge-transcode").unwrap()
}

/// Run the binary and parse its stdout as JSON.
fn run_json(args: &[&str], stdin: Option<&str>) -> Value {
    let mut cmd = bin();
    cmd.args(args);
    if let Some(input) = stdin {
        cmd.write_stdin(input);
    }
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// normalize
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn normalize_stdin_narrows_numbers() {
    let out = run_json(&["normalize"], Some(r#"{"count":2,"ok":true,"none":null}"#));
    assert!(out["count"].is_f64(), "count should come back as a float");
    assert_eq!(out["count"].as_f64(), Some(2.0));
    assert_eq!(out["ok"], Value::Bool(true));
    assert!(out["none"].is_null());
}

#[test]
fn normalize_file_keeps_nested_structure() {
    let span = fixture("span.json");
    let out = run_json(&["normalize", "-i", &span], None);
    assert_eq!(out["device"]["model"], "Pixel 8");
    assert_eq!(out["device"]["density"].as_f64(), Some(2.75));
    assert_eq!(out["checkpoints"][1]["name"], "pay");
    assert_eq!(out["checkpoints"][1]["ts"].as_f64(), Some(1_700_000_001_250.0));
    assert!(out["parent"].is_null());
}

#[test]
fn normalize_writes_output_file() {
    let output_path = std::env::temp_dir().join("bridge-transcode-test-normalize.json");
    let _ = std::fs::remove_file(&output_path);

    bin()
        .args(["normalize", "-i", &fixture("span.json"), "-o"])
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let value: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["name"], "checkout");
    let _ = std::fs::remove_file(&output_path);
}

// ─────────────────────────────────────────────────────────────────────────────
// generic
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn generic_keeps_integers() {
    let out = run_json(&["generic", "-i", &fixture("span.json")], None);
    assert!(out["status"].is_u64());
    assert_eq!(out["checkpoints"][0]["ts"].as_u64(), Some(1_700_000_000_000));
    assert_eq!(out["duration"].as_f64(), Some(1250.5));
}

// ─────────────────────────────────────────────────────────────────────────────
// stringify
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn stringify_keeps_null_marker() {
    let out = run_json(&["stringify"], Some(r#"{"x":"1","y":2,"z":null}"#));
    assert_eq!(out, serde_json::json!({"x": "1", "y": "2", "z": null}));
}

#[test]
fn stringify_renders_nested_json() {
    let out = run_json(&["stringify", "-i", &fixture("span.json")], None);
    assert_eq!(out["device"], r#"{"model":"Pixel 8","density":2.75,"foldable":false}"#);
    assert_eq!(out["sampled"], "true");
}

// ─────────────────────────────────────────────────────────────────────────────
// attributes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn attributes_reject_arrays_by_default() {
    bin()
        .args(["attributes", "-i", &fixture("attributes.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported value at `tags`"));
}

#[test]
fn attributes_skip_flag_drops_arrays() {
    let out = run_json(
        &["--skip-unsupported", "attributes", "-i", &fixture("attributes.json")],
        None,
    );
    let object = out.as_object().unwrap();
    assert!(!object.contains_key("tags"));
    assert_eq!(out["seats"].as_i64(), Some(12));
    assert_eq!(out["epoch_ms"].as_i64(), Some(1_700_000_000_000));
    assert_eq!(out["ratio"].as_f64(), Some(0.75));
    assert_eq!(out["plan"], "pro");
}

#[test]
fn attributes_skip_policy_from_config_file() {
    let out = run_json(
        &[
            "--config",
            &fixture("skip.json"),
            "attributes",
            "-i",
            &fixture("attributes.json"),
        ],
        None,
    );
    assert!(out.get("tags").is_none());
    assert_eq!(out["beta"], Value::Bool(true));
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn max_depth_flag_limits_nesting() {
    bin()
        .args(["normalize", "--max-depth", "1", "-i", &fixture("span.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("maximum depth of 1"));
}

#[test]
fn non_object_input_is_rejected() {
    bin()
        .arg("generic")
        .write_stdin("[1, 2, 3]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input must be a JSON object"))
        .stderr(predicate::str::contains("found array"));
}

#[test]
fn invalid_json_is_rejected() {
    bin()
        .arg("stringify")
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON parse error"));
}

#[test]
fn missing_input_file_is_reported() {
    bin()
        .args(["generic", "-i", "/nonexistent/bridge-transcode-input.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}
