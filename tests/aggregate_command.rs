//! End-to-end tests for `sdkcat aggregate`.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn sdkcat() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("sdkcat"))
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write input file");
    path
}

fn aggregate_cmd(output_dir: &Path, files: &[PathBuf]) -> Command {
    let mut cmd = sdkcat();
    cmd.arg("aggregate").arg("--output-dir").arg(output_dir);
    for file in files {
        cmd.arg(file);
    }
    cmd
}

fn read_json(path: &Path) -> serde_json::Value {
    let content = std::fs::read_to_string(path).expect("read manifest");
    serde_json::from_str(&content).expect("parse manifest")
}

#[test]
fn merges_fragments_in_ordering_key_order() {
    let dir = TempDir::new().expect("tempdir");
    let out = dir.path().join("out");
    let beta = write_file(
        dir.path(),
        "0860001_iOS-SDKs.json",
        r#"{"ios": [{"label": "16.0 (beta)"}]}"#,
    );
    let stable = write_file(
        dir.path(),
        "0860000_iOS-SDKs.json",
        r#"{"ios": [{"label": "16.0"}]}"#,
    );

    // Passed beta-first on the command line; basename order must win.
    aggregate_cmd(&out, &[beta, stable])
        .assert()
        .success()
        .stdout(predicate::str::contains("iOS-SDKs.json"));

    let manifest = read_json(&out.join("iOS-SDKs.json"));
    let labels: Vec<&str> = manifest["ios"]
        .as_array()
        .expect("ios array")
        .iter()
        .map(|e| e["label"].as_str().expect("label"))
        .collect();
    assert_eq!(labels, ["16.0", "16.0 (beta)"]);
}

#[test]
fn writes_one_manifest_per_manifest_name() {
    let dir = TempDir::new().expect("tempdir");
    let out = dir.path().join("out");
    let ios = write_file(
        dir.path(),
        "0848000_iOS-SDKs.json",
        r#"{"ios": [{"label": "15.2"}]}"#,
    );
    let tvos = write_file(
        dir.path(),
        "0848000_tvOS-SDKs.json",
        r#"{"tvos": [{"label": "15.2"}]}"#,
    );

    aggregate_cmd(&out, &[ios, tvos]).assert().success();

    assert_eq!(read_json(&out.join("iOS-SDKs.json"))["ios"][0]["label"], "15.2");
    assert_eq!(read_json(&out.join("tvOS-SDKs.json"))["tvos"][0]["label"], "15.2");
}

#[test]
fn supports_multiple_platform_keys_in_one_fragment() {
    let dir = TempDir::new().expect("tempdir");
    let out = dir.path().join("out");
    let combined = write_file(
        dir.path(),
        "0848000_iOS-SDKs.json",
        r#"{"ios": [{"label": "15.2"}], "tvos": [{"label": "15.2"}]}"#,
    );
    let ios_only = write_file(
        dir.path(),
        "0863000_iOS-SDKs.json",
        r#"{"ios": [{"label": "13.7 (Legacy)"}]}"#,
    );

    aggregate_cmd(&out, &[combined, ios_only]).assert().success();

    let manifest = read_json(&out.join("iOS-SDKs.json"));
    let ios: Vec<&str> = manifest["ios"]
        .as_array()
        .expect("ios array")
        .iter()
        .map(|e| e["label"].as_str().expect("label"))
        .collect();
    assert_eq!(ios, ["15.2", "13.7 (Legacy)"]);
    assert_eq!(manifest["tvos"].as_array().expect("tvos array").len(), 1);
}

#[test]
fn skips_files_that_are_not_descriptor_fragments() {
    let dir = TempDir::new().expect("tempdir");
    let out = dir.path().join("out");
    let fragment = write_file(
        dir.path(),
        "0848000_iOS-SDKs.json",
        r#"{"ios": [{"label": "15.2"}]}"#,
    );
    // Valid JSON but no underscore, two underscores, and not JSON at all:
    // none of these may contribute or abort the run.
    let readme = write_file(dir.path(), "readme.json", r#"{"ios": [{"label": "bogus"}]}"#);
    let double = write_file(dir.path(), "0848000_iOS_SDKs.json", "not even json");
    let note = write_file(dir.path(), "note.txt", "agent scratch file");

    aggregate_cmd(&out, &[fragment, readme, double, note])
        .assert()
        .success();

    let manifest = read_json(&out.join("iOS-SDKs.json"));
    assert_eq!(manifest["ios"].as_array().expect("ios array").len(), 1);
    assert_eq!(std::fs::read_dir(&out).expect("read out dir").count(), 1);
}

#[test]
fn malformed_fragment_aborts_with_no_output() {
    let dir = TempDir::new().expect("tempdir");
    let out = dir.path().join("out");
    let good = write_file(
        dir.path(),
        "0848000_iOS-SDKs.json",
        r#"{"ios": [{"label": "15.2"}]}"#,
    );
    let bad = write_file(dir.path(), "0863000_iOS-SDKs.json", "{truncated");

    aggregate_cmd(&out, &[good, bad])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"))
        .stderr(predicate::str::contains("0863000_iOS-SDKs.json"));

    assert!(!out.exists());
}

#[test]
fn missing_input_file_aborts() {
    let dir = TempDir::new().expect("tempdir");
    let out = dir.path().join("out");
    let gone = dir.path().join("0848000_iOS-SDKs.json");

    aggregate_cmd(&out, &[gone])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn reaggregating_with_an_extra_fragment_appends_its_entries() {
    let dir = TempDir::new().expect("tempdir");
    let a = write_file(
        dir.path(),
        "0840000_iOS-SDKs.json",
        r#"{"ios": [{"label": "16.0"}]}"#,
    );
    let b = write_file(
        dir.path(),
        "0848000_iOS-SDKs.json",
        r#"{"ios": [{"label": "15.2"}]}"#,
    );
    let c = write_file(
        dir.path(),
        "0863000_iOS-SDKs.json",
        r#"{"ios": [{"label": "13.7 (Legacy)"}]}"#,
    );

    let partial_out = dir.path().join("partial");
    aggregate_cmd(&partial_out, &[a.clone(), b.clone()])
        .assert()
        .success();
    let partial = read_json(&partial_out.join("iOS-SDKs.json"));

    let full_out = dir.path().join("full");
    aggregate_cmd(&full_out, &[a, b, c]).assert().success();
    let full = read_json(&full_out.join("iOS-SDKs.json"));

    let partial_entries = partial["ios"].as_array().expect("partial array");
    let full_entries = full["ios"].as_array().expect("full array");
    assert_eq!(&full_entries[..partial_entries.len()], &partial_entries[..]);
    assert_eq!(full_entries.len(), partial_entries.len() + 1);
    assert_eq!(full_entries[2]["label"], "13.7 (Legacy)");
}

#[test]
fn empty_input_set_writes_no_manifests() {
    let dir = TempDir::new().expect("tempdir");
    let out = dir.path().join("out");

    aggregate_cmd(&out, &[]).assert().success().stdout("");

    assert_eq!(std::fs::read_dir(&out).expect("read out dir").count(), 0);
}
