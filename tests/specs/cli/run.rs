// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `hookcheck run` failures that happen before any server is reached.

#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command isolated from the caller's config and environment.
fn hookcheck(temp: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("hookcheck");
    cmd.current_dir(temp.path())
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join(".config"))
        .env_remove("HOOKCHECK_CONFIG")
        .env_remove("HOOKCHECK_BITBUCKET_URL")
        .env_remove("HOOKCHECK_BITBUCKET_USER")
        .env_remove("HOOKCHECK_BITBUCKET_PASSWORD")
        .env_remove("HOOKCHECK_HOME_DIR");
    cmd
}

fn write_config(temp: &TempDir, text: &str) {
    std::fs::write(temp.path().join("hookcheck.toml"), text).unwrap();
}

#[test]
fn run_unknown_scenario() {
    let temp = TempDir::new().unwrap();
    hookcheck(&temp)
        .args(["run", "-s", "not-a-scenario"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown scenario: 'not-a-scenario'"))
        .stderr(predicate::str::contains("hookcheck scenarios"));
}

#[test]
fn run_without_url() {
    let temp = TempDir::new().unwrap();
    hookcheck(&temp)
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("bitbucket.url is required"));
}

#[test]
fn run_explicit_config_must_exist() {
    let temp = TempDir::new().unwrap();
    hookcheck(&temp)
        .args(["run", "--config", "missing.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn run_rejects_non_http_url() {
    let temp = TempDir::new().unwrap();
    write_config(
        &temp,
        "[bitbucket]\nurl = \"ftp://bitbucket\"\nhome_dir = \"/srv/bitbucket\"\n",
    );
    hookcheck(&temp)
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must start with http://"));
}

#[test]
fn run_requires_both_addons() {
    let temp = TempDir::new().unwrap();
    write_config(
        &temp,
        "[bitbucket]\nurl = \"http://localhost:7990\"\nhome_dir = \"/srv/bitbucket\"\n\n\
         [addons.fixed]\nversion = \"10.0.0\"\nartifact = \"external-hooks-10.0.0.jar\"\n",
    );
    hookcheck(&temp)
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("addons.reproduced is required"));
}

#[test]
fn run_env_overrides_url() {
    let temp = TempDir::new().unwrap();
    hookcheck(&temp)
        .arg("run")
        .env("HOOKCHECK_BITBUCKET_URL", "localhost:7990")
        .env("HOOKCHECK_HOME_DIR", "/srv/bitbucket")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid bitbucket.url 'localhost:7990'"));
}
