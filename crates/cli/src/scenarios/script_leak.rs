// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Disabling a repository hook must delete the script the add-on installed.

use hc_core::{HookKind, Phase};

use super::{expect_resolution, Fixtures, MESSAGE};
use crate::assertions::assert_leak_present;
use crate::error::Result;
use crate::suite::{HookHandle, Suite};

fn configure_and_push(
    suite: &mut Suite<'_>,
    fixtures: &Fixtures,
    phase: Phase,
) -> Result<HookHandle> {
    let repository = fixtures.repository()?;
    let hook = suite.configure_sample_hook_fail_with_message(
        HookKind::PreReceive,
        &repository.scope(),
        MESSAGE,
    )?;
    expect_resolution(suite, phase, repository, HookKind::PreReceive)?;
    Ok(hook)
}

pub(super) fn reproduce(suite: &mut Suite<'_>, fixtures: &Fixtures) -> Result<()> {
    let hook = configure_and_push(suite, fixtures, Phase::Reproduce)?;

    suite.record_hook_scripts()?;
    suite.disable_hook(&hook)?;

    let report = suite.inspect_hook_scripts()?;
    tracing::info!("orphaned hook scripts: {:?}", report.orphans);
    assert_leak_present(&report)
}

pub(super) fn fix(suite: &mut Suite<'_>, fixtures: &Fixtures) -> Result<()> {
    let hook = configure_and_push(suite, fixtures, Phase::Fix)?;

    suite.record_hook_scripts()?;
    suite.disable_hook(&hook)?;
    suite.detect_hook_scripts_leak()?;
    Ok(())
}
