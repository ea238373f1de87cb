// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `hookcheck scenarios`.

#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn hookcheck() -> Command {
    cargo_bin_cmd!("hookcheck")
}

#[test]
fn scenarios_lists_catalogue() {
    hookcheck()
        .arg("scenarios")
        .assert()
        .success()
        .stdout(predicate::str::contains("project-enabled-repository-disabled"))
        .stdout(predicate::str::contains("project-hook-before-repository"))
        .stdout(predicate::str::contains("script-leak-on-disable"))
        .stdout(predicate::str::contains("idempotent-configuration"))
        .stdout(predicate::str::contains("merge-check-veto"));
}

#[test]
fn scenarios_json_is_parseable() {
    let output = hookcheck()
        .args(["scenarios", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 5);
    assert_eq!(json[0]["phases"], serde_json::json!(["reproduce", "fix"]));
}

#[test]
fn help_lists_commands() {
    hookcheck()
        .arg("--help")
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("scripts"));
}

#[test]
fn completion_generates_bash_script() {
    hookcheck()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hookcheck"));
}
