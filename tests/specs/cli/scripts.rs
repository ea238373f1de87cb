// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `hookcheck scripts snapshot` and `hookcheck scripts leaks`.

#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn hookcheck() -> Command {
    cargo_bin_cmd!("hookcheck")
}

const WRAPPER: &str = "#!/bin/bash\n\n'/var/atlassian/application-data/bitbucket/shared/external-hooks/pre.fail.sh'\n";

struct Hooks {
    temp: TempDir,
}

impl Hooks {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("hook-scripts")).unwrap();
        Hooks { temp }
    }

    fn dir(&self) -> std::path::PathBuf {
        self.temp.path().join("hook-scripts")
    }

    fn baseline(&self) -> std::path::PathBuf {
        self.temp.path().join("baseline.json")
    }

    fn write(&self, name: &str) {
        std::fs::write(self.dir().join(name), WRAPPER).unwrap();
    }

    fn record(&self) {
        let output = hookcheck()
            .args(["scripts", "snapshot", "--dir"])
            .arg(self.dir())
            .output()
            .unwrap();
        assert!(output.status.success());
        std::fs::write(self.baseline(), output.stdout).unwrap();
    }

    fn leaks(&self) -> Command {
        let mut cmd = hookcheck();
        cmd.args(["scripts", "leaks", "--baseline"])
            .arg(self.baseline())
            .arg("--dir")
            .arg(self.dir());
        cmd
    }
}

#[test]
fn snapshot_prints_digest_and_executable() {
    let hooks = Hooks::new();
    hooks.write("1.sh");
    let output = hookcheck()
        .args(["scripts", "snapshot", "--dir"])
        .arg(hooks.dir())
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["1.sh"]["digest"].as_str().unwrap().len(), 64);
    assert!(json["1.sh"]["executable"]
        .as_str()
        .unwrap()
        .ends_with("/external-hooks/pre.fail.sh"));
}

#[test]
fn snapshot_missing_directory_fails() {
    hookcheck()
        .args(["scripts", "snapshot", "--dir", "/nonexistent/hook-scripts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn leaks_clean_after_script_removed() {
    let hooks = Hooks::new();
    hooks.write("1.sh");
    hooks.record();
    std::fs::remove_file(hooks.dir().join("1.sh")).unwrap();

    hooks
        .leaks()
        .args(["--disabled", "pre.fail.sh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no orphaned hook scripts"))
        .stdout(predicate::str::contains("removed: 1.sh"));
}

#[test]
fn leaks_reports_script_left_behind() {
    let hooks = Hooks::new();
    hooks.write("1.sh");
    hooks.record();

    hooks
        .leaks()
        .args(["--disabled", "pre.fail.sh"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("orphaned: 1.sh"))
        .stderr(predicate::str::contains("hook scripts leaked after disable: 1.sh"));
}

#[test]
fn leaks_ignores_untouched_scripts() {
    let hooks = Hooks::new();
    hooks.write("1.sh");
    hooks.record();

    hooks.leaks().assert().success();
}

#[test]
fn leaks_new_unreferenced_script_is_orphan() {
    let hooks = Hooks::new();
    hooks.record();
    hooks.write("2.sh");

    hooks
        .leaks()
        .args(["-o", "json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"orphans\""))
        .stdout(predicate::str::contains("2.sh"));
}
