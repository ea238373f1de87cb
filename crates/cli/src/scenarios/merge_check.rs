// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use hc_core::{HookKind, Phase};

use super::{expect_resolution, Fixtures, MESSAGE};
use crate::error::Result;
use crate::suite::Suite;

/// Each expectation opens a fresh pull request and attempts its merge.
pub(super) fn fix(suite: &mut Suite<'_>, fixtures: &Fixtures) -> Result<()> {
    let repository = fixtures.repository()?;

    suite.record_hook_scripts()?;
    let hook = suite.configure_sample_hook_fail_with_message(
        HookKind::MergeCheck,
        &repository.scope(),
        MESSAGE,
    )?;
    expect_resolution(suite, Phase::Fix, repository, HookKind::MergeCheck)?;

    suite.disable_hook(&hook)?;
    expect_resolution(suite, Phase::Fix, repository, HookKind::MergeCheck)?;
    suite.detect_hook_scripts_leak()?;
    Ok(())
}
