//! Archive extraction safety
//!
//! Members whose paths would land outside the scratch directory must be
//! rejected before anything is written, and the scratch directory must be
//! gone afterwards.

mod common;

use common::*;
use tempfile::TempDir;
use threemf_settings::opc::Package;
use threemf_settings::{Analyzer, AnalyzerConfig, Error};

fn analyze_in(path: &std::path::Path, scratch: &TempDir) -> threemf_settings::Result<()> {
    let config = AnalyzerConfig::new().with_scratch_root(scratch.path());
    Analyzer::with_config(path, config).analyze().map(|_| ())
}

#[test]
fn test_rejects_absolute_path() {
    let dir = TempDir::new().unwrap();
    let scratch = TempDir::new().unwrap();

    let err = analyze_in(&malicious_absolute_3mf(dir.path()), &scratch).unwrap_err();
    assert!(matches!(err, Error::UnsafePath { .. }));
    assert!(err.to_string().contains("/etc/passwd"));
    assert_eq!(err.exit_code(), 7);
    assert!(is_empty_dir(scratch.path()));
}

#[test]
fn test_rejects_path_traversal() {
    let dir = TempDir::new().unwrap();
    let scratch = TempDir::new().unwrap();

    let err = analyze_in(&malicious_traversal_3mf(dir.path()), &scratch).unwrap_err();
    assert!(matches!(err, Error::UnsafePath { .. }));
    assert!(err.to_string().contains("../../../etc/passwd"));
}

#[test]
fn test_cleans_up_on_security_error() {
    let dir = TempDir::new().unwrap();
    let scratch = TempDir::new().unwrap();
    let path = write_3mf(
        dir.path(),
        "mixed.3mf",
        &[
            (PROJECT_SETTINGS, "{}".as_bytes()),
            ("Metadata/../../outside.txt", "escaped".as_bytes()),
        ],
    );

    assert!(analyze_in(&path, &scratch).is_err());
    assert!(is_empty_dir(scratch.path()));
    assert!(!scratch.path().join("../outside.txt").exists());
    assert!(!scratch.path().join("outside.txt").exists());
}

#[test]
fn test_parent_components_inside_root_allowed() {
    let dir = TempDir::new().unwrap();
    let scratch = TempDir::new().unwrap();
    let path = write_3mf(
        dir.path(),
        "dotted.3mf",
        &[("Metadata/sub/../project_settings.config", "{}".as_bytes())],
    );

    let package = Package::extract_in(&path, scratch.path()).unwrap();
    assert!(package.root().join("Metadata/project_settings.config").is_file());
    drop(package);
    assert!(is_empty_dir(scratch.path()));
}

#[test]
fn test_windows_style_absolute_path_rejected() {
    let dir = TempDir::new().unwrap();
    let scratch = TempDir::new().unwrap();
    let path = write_3mf(
        dir.path(),
        "backslash.3mf",
        &[("\\evil\\payload.txt", "x".as_bytes())],
    );

    let err = Package::extract_in(&path, scratch.path()).unwrap_err();
    assert!(matches!(err, Error::UnsafePath { .. }));
    assert!(is_empty_dir(scratch.path()));
}
