// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Observable checks a scenario makes against the server.
//!
//! Each check returns [`hc_core::Error::Assertion`] carrying the expected
//! and actual signatures (push output, merge result, leak list) when the
//! server behaves differently.

use hc_core::{HookKind, LeakReport, Resolution};

use crate::bitbucket::{MergeOutcome, PullRequest, Repository};
use crate::error::Result;
use crate::git::PushResult;
use crate::suite::Suite;

fn fail<T>(message: String, expected: String, actual: String) -> Result<T> {
    Err(hc_core::Error::assertion(message, expected, actual).into())
}

fn describe_push(push: &PushResult) -> String {
    format!(
        "{}; output: {:?}",
        if push.accepted { "accepted" } else { "rejected" },
        push.output.trim()
    )
}

pub fn assert_push_rejected(
    suite: &Suite<'_>,
    repository: &Repository,
    message: &str,
) -> Result<PushResult> {
    let push = suite.push(repository)?;
    if !push.accepted && push.output.contains(message) {
        return Ok(push);
    }
    fail(
        format!(
            "push to {}/{} should be rejected by hook",
            repository.project, repository.slug
        ),
        format!("rejected; output containing {message:?}"),
        describe_push(&push),
    )
}

pub fn assert_push_does_not_output_messages(
    suite: &Suite<'_>,
    repository: &Repository,
    message: &str,
) -> Result<PushResult> {
    let push = suite.push(repository)?;
    if push.accepted && !push.output.contains(message) {
        return Ok(push);
    }
    fail(
        format!(
            "push to {}/{} should not run the hook",
            repository.project, repository.slug
        ),
        format!("accepted; output without {message:?}"),
        describe_push(&push),
    )
}

/// Push succeeds and a post-receive script's output shows up.
pub fn assert_push_accepted_with_output(
    suite: &Suite<'_>,
    repository: &Repository,
    message: &str,
) -> Result<PushResult> {
    let push = suite.push(repository)?;
    if push.accepted && push.output.contains(message) {
        return Ok(push);
    }
    fail(
        format!(
            "push to {}/{} should be accepted and run the hook",
            repository.project, repository.slug
        ),
        format!("accepted; output containing {message:?}"),
        describe_push(&push),
    )
}

pub fn assert_merge_vetoed(
    suite: &Suite<'_>,
    repository: &Repository,
    pull_request: &PullRequest,
    message: &str,
) -> Result<()> {
    let outcome = suite.merge(repository, pull_request)?;
    if let MergeOutcome::Vetoed { summary, detail } = &outcome {
        if summary.contains(message) || detail.contains(message) {
            return Ok(());
        }
    }
    fail(
        format!("merge of pull request #{} should be vetoed", pull_request.id),
        format!("vetoed with {message:?}"),
        format!("{outcome:?}"),
    )
}

pub fn assert_merge_allowed(
    suite: &Suite<'_>,
    repository: &Repository,
    pull_request: &PullRequest,
) -> Result<()> {
    match suite.merge(repository, pull_request)? {
        MergeOutcome::Merged => Ok(()),
        outcome => fail(
            format!("merge of pull request #{} should succeed", pull_request.id),
            "merged".to_string(),
            format!("{outcome:?}"),
        ),
    }
}

/// Checks the server against a predicted resolution for `kind`.
///
/// `message` is what the bound script prints.
pub fn assert_outcome(
    suite: &mut Suite<'_>,
    repository: &Repository,
    kind: HookKind,
    expected: &Resolution,
    message: &str,
) -> Result<()> {
    match (kind, expected.runs()) {
        (HookKind::PreReceive, true) => assert_push_rejected(suite, repository, message).map(drop),
        (HookKind::PostReceive, true) => {
            assert_push_accepted_with_output(suite, repository, message).map(drop)
        }
        (HookKind::PreReceive | HookKind::PostReceive, false) => {
            assert_push_does_not_output_messages(suite, repository, message).map(drop)
        }
        (HookKind::MergeCheck, runs) => {
            let pull_request = suite.create_random_pull_request(repository)?;
            if runs {
                assert_merge_vetoed(suite, repository, &pull_request, message)
            } else {
                assert_merge_allowed(suite, repository, &pull_request)
            }
        }
    }
}

/// The defect leaves at least one orphaned script.
pub fn assert_leak_present(report: &LeakReport) -> Result<()> {
    if report.is_clean() {
        return fail(
            "disabled hook should leave its script behind".to_string(),
            "at least one orphaned hook script".to_string(),
            format!("no orphans; removed: {:?}", report.removed),
        );
    }
    Ok(())
}

#[cfg(test)]
#[path = "assertions_tests.rs"]
mod tests;
