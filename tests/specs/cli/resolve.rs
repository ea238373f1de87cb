// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `hookcheck resolve`.

#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn hookcheck() -> Command {
    cargo_bin_cmd!("hookcheck")
}

/// Project PRJ has pre.fail.sh enabled; PRJ/repo disables it explicitly.
const BINDINGS: &str = r#"{
  "clock": 3,
  "bindings": [
    {
      "scope": {"level": "project", "project": "PRJ"},
      "kind": "pre-receive",
      "settings": {"exe": "pre.fail.sh", "safe_path": true},
      "state": "enabled",
      "updated_at": 2,
      "enabled_at": 2
    },
    {
      "scope": {"level": "repository", "project": "PRJ", "slug": "repo"},
      "kind": "pre-receive",
      "state": "disabled",
      "updated_at": 3
    }
  ],
  "repositories": [
    {"project": "PRJ", "slug": "repo", "created_at": 1}
  ]
}"#;

fn write_bindings() -> (TempDir, std::path::PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bindings.json");
    std::fs::write(&path, BINDINGS).unwrap();
    (temp, path)
}

#[test]
fn resolve_disabled_repository_suppresses_project() {
    let (_temp, path) = write_bindings();
    hookcheck()
        .arg("resolve")
        .arg("--bindings")
        .arg(&path)
        .args(["--repository", "PRJ/repo", "--kind", "pre-receive"])
        .assert()
        .success()
        .stdout("does not run (disabled at repository:PRJ/repo)\n");
}

#[test]
fn resolve_with_ignored_disables_runs_project_script() {
    let (_temp, path) = write_bindings();
    hookcheck()
        .arg("resolve")
        .arg("--bindings")
        .arg(&path)
        .args([
            "--repository",
            "PRJ/repo",
            "--kind",
            "pre-receive",
            "--override",
            "ignored",
        ])
        .assert()
        .success()
        .stdout("runs pre.fail.sh (bound at project:PRJ)\n");
}

#[test]
fn resolve_json_output() {
    let (_temp, path) = write_bindings();
    let output = hookcheck()
        .arg("resolve")
        .arg("--bindings")
        .arg(&path)
        .args(["--repository", "PRJ/other", "--kind", "pre-receive", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["outcome"], "runs");
    assert_eq!(json["executable"], "pre.fail.sh");
}

#[test]
fn resolve_invalid_kind() {
    let (_temp, path) = write_bindings();
    hookcheck()
        .arg("resolve")
        .arg("--bindings")
        .arg(&path)
        .args(["--repository", "PRJ/repo", "--kind", "pre-commit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid hook kind: 'pre-commit'"));
}

#[test]
fn resolve_missing_bindings_file() {
    hookcheck()
        .args([
            "resolve",
            "--bindings",
            "/nonexistent/bindings.json",
            "--repository",
            "PRJ/repo",
            "--kind",
            "pre-receive",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}
