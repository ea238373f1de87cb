// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario catalogue.
//!
//! Each [`Scenario`] declares the phases it takes part in and runs one phase
//! at a time against a [`Suite`]. Fixtures are created once, before the
//! first phase, and shared by every later phase of the same scenario.

mod idempotent;
mod merge_check;
mod project_before_repository;
mod project_override;
mod script_leak;

use std::fmt;
use std::str::FromStr;

use hc_core::{HookKind, Phase, Resolution, ResolutionRules, Scope};

use crate::assertions::assert_outcome;
use crate::bitbucket::{Project, Repository};
use crate::error::{Error, Result};
use crate::suite::Suite;

/// Message printed by every sample script the scenarios configure.
pub const MESSAGE: &str = "XXX";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scenario {
    ProjectEnabledRepositoryDisabled,
    ProjectHookBeforeRepository,
    ScriptLeakOnDisable,
    IdempotentConfiguration,
    MergeCheckVeto,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::ProjectEnabledRepositoryDisabled,
        Scenario::ProjectHookBeforeRepository,
        Scenario::ScriptLeakOnDisable,
        Scenario::IdempotentConfiguration,
        Scenario::MergeCheckVeto,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::ProjectEnabledRepositoryDisabled => "project-enabled-repository-disabled",
            Scenario::ProjectHookBeforeRepository => "project-hook-before-repository",
            Scenario::ScriptLeakOnDisable => "script-leak-on-disable",
            Scenario::IdempotentConfiguration => "idempotent-configuration",
            Scenario::MergeCheckVeto => "merge-check-veto",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Scenario::ProjectEnabledRepositoryDisabled => {
                "repository disable suppresses an enabled project pre-receive hook"
            }
            Scenario::ProjectHookBeforeRepository => {
                "project hook applies to repositories created after it was enabled"
            }
            Scenario::ScriptLeakOnDisable => "disabling a hook removes its installed script",
            Scenario::IdempotentConfiguration => {
                "configuring the same hook twice leaves one binding and one script"
            }
            Scenario::MergeCheckVeto => "merge check vetoes a pull request until disabled",
        }
    }

    pub fn phases(&self) -> &'static [Phase] {
        match self {
            Scenario::ProjectEnabledRepositoryDisabled
            | Scenario::ProjectHookBeforeRepository
            | Scenario::ScriptLeakOnDisable => &Phase::ALL,
            Scenario::IdempotentConfiguration | Scenario::MergeCheckVeto => &[Phase::Fix],
        }
    }

    pub fn takes_part_in(&self, phase: Phase) -> bool {
        self.phases().contains(&phase)
    }

    /// Creates the fixtures shared by all phases.
    pub fn setup(&self, suite: &mut Suite<'_>) -> Result<Fixtures> {
        let project = suite.create_random_project()?;
        let repository = match self {
            Scenario::ProjectHookBeforeRepository => None,
            _ => Some(suite.create_random_repository(&project)?),
        };
        Ok(Fixtures {
            project,
            repository,
        })
    }

    pub fn run_phase(
        &self,
        phase: Phase,
        suite: &mut Suite<'_>,
        fixtures: &Fixtures,
    ) -> Result<()> {
        if !self.takes_part_in(phase) {
            return Err(hc_core::Error::Usage(format!(
                "scenario {} has no {} phase",
                self, phase
            ))
            .into());
        }
        match (self, phase) {
            (Scenario::ProjectEnabledRepositoryDisabled, Phase::Reproduce) => {
                project_override::reproduce(suite, fixtures)
            }
            (Scenario::ProjectEnabledRepositoryDisabled, Phase::Fix) => {
                project_override::fix(suite, fixtures)
            }
            (Scenario::ProjectHookBeforeRepository, Phase::Reproduce) => {
                project_before_repository::reproduce(suite, fixtures)
            }
            (Scenario::ProjectHookBeforeRepository, Phase::Fix) => {
                project_before_repository::fix(suite, fixtures)
            }
            (Scenario::ScriptLeakOnDisable, Phase::Reproduce) => {
                script_leak::reproduce(suite, fixtures)
            }
            (Scenario::ScriptLeakOnDisable, Phase::Fix) => script_leak::fix(suite, fixtures),
            (Scenario::IdempotentConfiguration, _) => idempotent::fix(suite, fixtures),
            (Scenario::MergeCheckVeto, _) => merge_check::fix(suite, fixtures),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.name() == s)
            .ok_or_else(|| Error::UnknownScenario(s.to_string()))
    }
}

/// Parses scenario names, defaulting to the whole catalogue.
pub fn select(names: &[String]) -> Result<Vec<Scenario>> {
    if names.is_empty() {
        return Ok(Scenario::ALL.to_vec());
    }
    let mut selected = Vec::new();
    for name in names {
        let scenario: Scenario = name.parse()?;
        if !selected.contains(&scenario) {
            selected.push(scenario);
        }
    }
    Ok(selected)
}

/// Project and repository shared by a scenario's phases.
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub project: Project,
    pub repository: Option<Repository>,
}

impl Fixtures {
    pub fn project_scope(&self) -> Scope {
        Scope::project(self.project.key.clone())
    }

    pub fn repository(&self) -> Result<&Repository> {
        self.repository.as_ref().ok_or_else(|| {
            hc_core::Error::Usage(format!(
                "no repository fixture in project {}",
                self.project.key
            ))
            .into()
        })
    }
}

/// Rules the installed build is expected to resolve bindings with.
///
/// The reproduced build carries both known defects; the fixed build lets
/// the most specific explicit binding win.
pub fn expected_rules(phase: Phase) -> ResolutionRules {
    match phase {
        Phase::Reproduce => ResolutionRules::legacy(),
        Phase::Fix => ResolutionRules::most_specific(),
    }
}

/// Predicts `kind` on `repository` from the recorded bindings and checks
/// that the server behaves accordingly.
pub fn expect_resolution(
    suite: &mut Suite<'_>,
    phase: Phase,
    repository: &Repository,
    kind: HookKind,
) -> Result<Resolution> {
    let expected = suite.predict(repository, kind, expected_rules(phase));
    tracing::info!(
        "{} on {}/{} {}",
        kind,
        repository.project,
        repository.slug,
        expected
    );
    assert_outcome(suite, repository, kind, &expected, MESSAGE)?;
    Ok(expected)
}

/// Pre-receive sample hook bound to the project.
fn configure_project_pre_receive(suite: &mut Suite<'_>, fixtures: &Fixtures) -> Result<()> {
    suite
        .configure_sample_hook_fail_with_message(
            HookKind::PreReceive,
            &fixtures.project_scope(),
            MESSAGE,
        )
        .map(drop)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
