// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::test_helpers::FakeServer;
use hc_core::{BindingState, ErrorCategory};
use std::os::unix::fs::PermissionsExt;

const FIXED: &str = "10.0.0";
const LEGACY: &str = "9.1.0";

#[test]
fn test_configure_hook_writes_script_and_enables() {
    let server = FakeServer::new();
    server.install_version(FIXED);
    let volume = server.volume();
    let mut suite = Suite::new(server.collaborators(&volume), server.layout(), "ns");

    let project = suite.create_random_project().unwrap();
    let scope = Scope::project(project.key.clone());
    let hook = suite
        .configure_sample_hook_fail_with_message(HookKind::PreReceive, &scope, "XXX")
        .unwrap();

    assert_eq!(hook.executable, "ns.pre.fail.sh");
    let path = volume
        .root()
        .join("shared/external-hooks/ns.pre.fail.sh");
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "#!/bin/bash\necho XXX\nexit 1\n"
    );
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o777);

    let binding = suite.bindings().get(&scope, HookKind::PreReceive).unwrap();
    assert_eq!(binding.state, BindingState::Enabled);
    assert_eq!(suite.owned_scripts().unwrap().len(), 1);
}

#[test]
fn test_configure_rejected_scope_is_configuration_error() {
    let server = FakeServer::new();
    server.install_version(FIXED);
    let volume = server.volume();
    let mut suite = Suite::new(server.collaborators(&volume), server.layout(), "ns");

    let err = suite
        .configure_sample_hook_fail_with_message(HookKind::PreReceive, &Scope::Addon, "XXX")
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Configuration);
    assert!(suite.bindings().is_empty());
}

#[test]
fn test_repositories_are_recorded_in_order() {
    let server = FakeServer::new();
    let volume = server.volume();
    let mut suite = Suite::new(server.collaborators(&volume), server.layout(), "ns");

    let project = suite.create_random_project().unwrap();
    let first = suite.create_random_repository(&project).unwrap();
    let second = suite.create_random_repository(&project).unwrap();
    let bindings = suite.bindings();
    assert!(
        bindings.repository_created_at(&first.reference())
            < bindings.repository_created_at(&second.reference())
    );
}

#[test]
fn test_owned_scripts_ignore_other_suites() {
    let server = FakeServer::new();
    server.install_version(FIXED);
    let volume = server.volume();
    let mut mine = Suite::new(server.collaborators(&volume), server.layout(), "mine");
    let mut theirs = Suite::new(server.collaborators(&volume), server.layout(), "theirs");

    let project = mine.create_random_project().unwrap();
    let other = theirs.create_random_project().unwrap();

    mine.record_hook_scripts().unwrap();
    theirs
        .configure_sample_hook_fail_with_message(
            HookKind::PreReceive,
            &Scope::project(other.key.clone()),
            "YYY",
        )
        .unwrap();
    mine.configure_sample_hook_fail_with_message(
        HookKind::PreReceive,
        &Scope::project(project.key.clone()),
        "XXX",
    )
    .unwrap();

    assert_eq!(server.wrapper_files().len(), 2);
    assert_eq!(mine.owned_scripts().unwrap().len(), 1);
    mine.disable(&Scope::project(project.key), HookKind::PreReceive)
        .unwrap();
    assert!(mine.detect_hook_scripts_leak().unwrap().is_clean());
}

#[test]
fn test_detect_without_record_is_usage_error() {
    let server = FakeServer::new();
    let volume = server.volume();
    let mut suite = Suite::new(server.collaborators(&volume), server.layout(), "ns");
    let err = suite.detect_hook_scripts_leak().unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Usage);
}

#[test]
fn test_legacy_build_leaks_on_disable() {
    let server = FakeServer::new();
    server.install_version(LEGACY);
    let volume = server.volume();
    let mut suite = Suite::new(server.collaborators(&volume), server.layout(), "ns");

    let project = suite.create_random_project().unwrap();
    let repository = suite.create_random_repository(&project).unwrap();
    let hook = suite
        .configure_sample_hook_fail_with_message(HookKind::PreReceive, &repository.scope(), "XXX")
        .unwrap();
    suite.record_hook_scripts().unwrap();
    suite.disable_hook(&hook).unwrap();

    let err = suite.detect_hook_scripts_leak().unwrap_err();
    assert!(matches!(
        err,
        Error::Core(hc_core::Error::LeakDetected { ref files }) if files.len() == 1
    ));
}

#[test]
fn test_push_runs_pre_receive_script() {
    let server = FakeServer::new();
    server.install_version(FIXED);
    let volume = server.volume();
    let mut suite = Suite::new(server.collaborators(&volume), server.layout(), "ns");

    let project = suite.create_random_project().unwrap();
    let repository = suite.create_random_repository(&project).unwrap();
    suite
        .configure_sample_hook_fail_with_message(
            HookKind::PreReceive,
            &Scope::project(project.key.clone()),
            "XXX",
        )
        .unwrap();

    let push = suite.push(&repository).unwrap();
    assert!(!push.accepted);
    assert!(push.output.contains("remote: XXX"));
    assert!(suite
        .predict(&repository, HookKind::PreReceive, ResolutionRules::most_specific())
        .runs());
}

#[test]
fn test_pull_request_needs_accepted_pushes() {
    let server = FakeServer::new();
    server.install_version(FIXED);
    let volume = server.volume();
    let mut suite = Suite::new(server.collaborators(&volume), server.layout(), "ns");

    let project = suite.create_random_project().unwrap();
    let repository = suite.create_random_repository(&project).unwrap();
    suite
        .configure_sample_hook_fail_with_message(HookKind::PreReceive, &repository.scope(), "XXX")
        .unwrap();

    let err = suite.create_random_pull_request(&repository).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Environment);
    assert!(err.to_string().contains("unable to git push into master"));
}
