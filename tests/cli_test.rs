//! Command-line behavior of the `threemf-settings` binary

mod common;

use assert_cmd::prelude::*;
use common::*;
use predicates::prelude::*;
use serde_json::Value;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("threemf-settings").expect("binary built");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_report_output() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg(sample_3mf(dir.path()))
        .assert()
        .success()
        .stdout(predicate::str::contains("3MF SETTINGS ANALYZER"))
        .stdout(predicate::str::contains("TestObject"))
        .stdout(predicate::str::contains("CUSTOM GLOBAL SETTINGS"))
        .stdout(predicate::str::contains("* = custom value"));
}

#[test]
fn test_json_output() {
    let dir = TempDir::new().unwrap();
    let output = cmd()
        .arg(sample_3mf(dir.path()))
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["file"], "test.3mf");
    assert_eq!(value["profile"]["printer"], "Bambu Lab A1 mini 0.4 nozzle");
    assert_eq!(value["rows"].as_array().unwrap().len(), 2);
}

#[test]
fn test_diff_mode() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg(sample_3mf(dir.path()))
        .args(["--diff", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("*4 ←3"));
}

#[test]
fn test_no_color_has_no_escape_codes() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg(sample_3mf(dir.path()))
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn test_verbose_logs_to_stderr() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg(sample_3mf(dir.path()))
        .args(["--verbose", "--json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"));
}

#[test]
fn test_empty_archive_reports_no_objects() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg(empty_3mf(dir.path()))
        .assert()
        .success()
        .stdout(predicate::str::contains("No objects found"))
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_missing_argument_is_usage_error() {
    cmd().assert().code(2);
}

#[test]
fn test_nonexistent_file_exits() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg(dir.path().join("nonexistent.3mf"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_bad_zip_exits() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.3mf");
    std::fs::write(&path, "not a zip").unwrap();

    cmd()
        .arg(&path)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("E1002"));
}

#[test]
fn test_malicious_archive_exits() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg(malicious_traversal_3mf(dir.path()))
        .assert()
        .code(7)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_non_3mf_extension_warns() {
    let dir = TempDir::new().unwrap();
    let settings = serde_json::to_string(&sample_project_settings()).unwrap();
    let path = write_3mf(
        dir.path(),
        "project.zip",
        &[
            (PROJECT_SETTINGS, settings.as_bytes()),
            (MODEL_SETTINGS, SAMPLE_MODEL_SETTINGS.as_bytes()),
        ],
    );

    cmd()
        .arg(&path)
        .arg("--json")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "File does not have .3mf extension",
        ));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
