//! Integration tests for ziptrack-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

fn ziptrack_cmd() -> Command {
    cargo_bin_cmd!("ziptrack")
}

fn write_file(dir: &Path, name: &str, data: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, data).expect("failed to write source");
    path
}

#[test]
fn test_version_flag() {
    ziptrack_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ziptrack"));
}

#[test]
fn test_help_flag() {
    ziptrack_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Build or update a ZIP archive"));
}

#[test]
fn test_extract_help() {
    ziptrack_cmd()
        .arg("extract")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--respect-dirs"));
}

#[test]
fn test_build_creates_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let a = write_file(temp.path(), "a.txt", "alpha");
    let archive = temp.path().join("out.zip");

    ziptrack_cmd()
        .arg("build")
        .arg(&archive)
        .arg(&a)
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive created"));

    assert!(archive.exists());
}

#[test]
fn test_build_twice_updates_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let a = write_file(temp.path(), "a.txt", "alpha");
    let b = write_file(temp.path(), "b.txt", "beta");
    let archive = temp.path().join("out.zip");

    ziptrack_cmd().arg("build").arg(&archive).arg(&a).assert().success();

    ziptrack_cmd()
        .arg("build")
        .arg(&archive)
        .arg(&b)
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive updated"));
}

#[test]
fn test_build_json_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let a = write_file(temp.path(), "a.txt", "alpha");
    let b = write_file(temp.path(), "b.txt", "beta!");
    let archive = temp.path().join("out.zip");

    let output = ziptrack_cmd()
        .arg("build")
        .arg("--json")
        .arg(&archive)
        .arg(&a)
        .arg(&b)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    assert_eq!(json["status"], "success");
    assert_eq!(json["operation"], "build");
    assert_eq!(json["data"]["mode"], "create");
    assert_eq!(json["data"]["files_added"], 2);
    assert_eq!(json["data"]["bytes_read"], 10);
}

#[test]
fn test_build_missing_source_fails() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("out.zip");

    ziptrack_cmd()
        .arg("build")
        .arg(&archive)
        .arg(temp.path().join("missing.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("HINT"));

    assert!(!archive.exists());
}

#[test]
fn test_build_missing_source_json_error() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("out.zip");

    let output = ziptrack_cmd()
        .arg("build")
        .arg("--json")
        .arg(&archive)
        .arg(temp.path().join("missing.txt"))
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    assert_eq!(json["status"], "error");
    assert_eq!(json["operation"], "build");
}

#[test]
fn test_build_then_extract_round_trip() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let a = write_file(temp.path(), "a.txt", "alpha");
    let archive = temp.path().join("out.zip");
    let dest = temp.path().join("dest");

    ziptrack_cmd().arg("build").arg(&archive).arg(&a).assert().success();

    ziptrack_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Extraction complete"));

    assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "alpha");
}

#[test]
fn test_extract_json_output_counts() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let a = write_file(temp.path(), "a.txt", "alpha");
    let archive = temp.path().join("out.zip");

    ziptrack_cmd()
        .arg("build")
        .arg("-l")
        .arg("0")
        .arg(&archive)
        .arg(&a)
        .assert()
        .success();

    let output = ziptrack_cmd()
        .arg("extract")
        .arg("--json")
        .arg(&archive)
        .arg(temp.path().join("dest"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    assert_eq!(json["operation"], "extract");
    assert_eq!(json["data"]["files_extracted"], 1);
    assert_eq!(json["data"]["bytes_written"], 5);
}

#[test]
fn test_extract_nonexistent_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");

    ziptrack_cmd()
        .arg("extract")
        .arg(temp.path().join("nonexistent.zip"))
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_quiet_build_prints_nothing() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let a = write_file(temp.path(), "a.txt", "alpha");

    ziptrack_cmd()
        .arg("build")
        .arg("--quiet")
        .arg(temp.path().join("out.zip"))
        .arg(&a)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_quiet_and_verbose_conflict() {
    ziptrack_cmd()
        .args(["build", "-q", "-v", "out.zip", "a.txt"])
        .assert()
        .failure();
}
