// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project hook enabled, repository hook explicitly disabled.
//!
//! The pre-fix build keeps running the project script on the repository.

use hc_core::{HookKind, Phase};

use super::{configure_project_pre_receive, expect_resolution, Fixtures};
use crate::error::Result;
use crate::suite::Suite;

const KIND: HookKind = HookKind::PreReceive;

pub(super) fn reproduce(suite: &mut Suite<'_>, fixtures: &Fixtures) -> Result<()> {
    let repository = fixtures.repository()?;

    configure_project_pre_receive(suite, fixtures)?;
    expect_resolution(suite, Phase::Reproduce, repository, KIND)?;

    suite.disable(&repository.scope(), KIND)?;
    expect_resolution(suite, Phase::Reproduce, repository, KIND)?;
    Ok(())
}

pub(super) fn fix(suite: &mut Suite<'_>, fixtures: &Fixtures) -> Result<()> {
    let repository = fixtures.repository()?;

    suite.record_hook_scripts()?;
    expect_resolution(suite, Phase::Fix, repository, KIND)?;

    suite.disable(&fixtures.project_scope(), KIND)?;
    suite.detect_hook_scripts_leak()?;
    Ok(())
}
