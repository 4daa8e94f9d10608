//! End-to-end tests driving the built `glyph` binary as a subprocess.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn check_accepts_a_clean_script() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"<?php $a = 1;").unwrap();

    Command::cargo_bin("glyph").unwrap().arg("check").arg(file.path()).assert().success();
}

#[test]
fn check_rejects_a_malformed_script() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"<?php 1 = 2;").unwrap();

    Command::cargo_bin("glyph")
        .unwrap()
        .arg("check")
        .arg(file.path())
        .assert()
        .failure();
}

#[test]
fn check_with_no_files_reports_validation_error() {
    Command::cargo_bin("glyph").unwrap().arg("check").assert().failure();
}

#[test]
fn init_scaffolds_a_project_directory() {
    let dir = TempDir::new().unwrap();

    Command::cargo_bin("glyph").unwrap().arg("init").arg("--path").arg(dir.path()).assert().success();

    assert!(dir.path().join("glyph.toml").exists());
    assert!(dir.path().join("scripts").is_dir());
}

#[test]
fn info_prints_a_built_in_constant() {
    Command::cargo_bin("glyph")
        .unwrap()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("PHP_INT_MAX"));
}
