// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project hook enabled before the repository it should guard exists.
//!
//! The pre-fix build never binds the hook to the new repository.

use hc_core::{HookKind, Phase};

use super::{configure_project_pre_receive, expect_resolution, Fixtures};
use crate::error::Result;
use crate::suite::Suite;

const KIND: HookKind = HookKind::PreReceive;

fn run(suite: &mut Suite<'_>, fixtures: &Fixtures, phase: Phase) -> Result<()> {
    suite.record_hook_scripts()?;
    configure_project_pre_receive(suite, fixtures)?;

    let repository = suite.create_random_repository(&fixtures.project)?;
    expect_resolution(suite, phase, &repository, KIND)?;

    suite.disable(&fixtures.project_scope(), KIND)?;
    suite.detect_hook_scripts_leak()?;
    Ok(())
}

pub(super) fn reproduce(suite: &mut Suite<'_>, fixtures: &Fixtures) -> Result<()> {
    run(suite, fixtures, Phase::Reproduce)
}

pub(super) fn fix(suite: &mut Suite<'_>, fixtures: &Fixtures) -> Result<()> {
    run(suite, fixtures, Phase::Fix)
}
