// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use hc_core::{HookKind, Phase};

use super::{expect_resolution, Fixtures, MESSAGE};
use crate::error::Result;
use crate::suite::Suite;

/// Configures the same post-receive hook twice on one repository.
pub(super) fn fix(suite: &mut Suite<'_>, fixtures: &Fixtures) -> Result<()> {
    let repository = fixtures.repository()?;
    let scope = repository.scope();

    suite.record_hook_scripts()?;
    suite.configure_sample_hook_fail_with_message(HookKind::PostReceive, &scope, MESSAGE)?;
    let hook =
        suite.configure_sample_hook_fail_with_message(HookKind::PostReceive, &scope, MESSAGE)?;

    let installed = suite.owned_scripts()?;
    let wrappers = installed.referencing(&hook.executable);
    if wrappers.len() != 1 {
        return Err(hc_core::Error::assertion(
            format!("second configure of {} should replace the first", hook.executable),
            "1 installed script".to_string(),
            format!("installed scripts: {:?}", wrappers),
        )
        .into());
    }

    expect_resolution(suite, Phase::Fix, repository, HookKind::PostReceive)?;

    suite.disable_hook(&hook)?;
    suite.detect_hook_scripts_leak()?;
    Ok(())
}
