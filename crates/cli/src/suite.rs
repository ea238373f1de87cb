// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-scenario harness state.
//!
//! A [`Suite`] builds fixtures, configures hooks through the add-on and
//! mirrors every binding change into a local [`BindingSet`], so the leak
//! detector and resolution predictions work from an explicit record rather
//! than from live server state.
//!
//! Every executable a suite writes is prefixed with its namespace, and hook
//! script snapshots only keep files that run one of those executables.
//! Suites running side by side therefore never see each other's scripts.

use std::collections::BTreeSet;

use hc_core::{
    resolve, BindingSet, HookKind, HookSettings, LeakDetector, LeakReport, Resolution,
    ResolutionRules, Scope, ScriptSnapshot,
};

use crate::bitbucket::{MergeOutcome, Project, PullRequest, Repository, SourceControl};
use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::git::{Checkout, GitClient, PushResult, DEFAULT_BRANCH};
use crate::hooks::{HookScript, SCRIPT_MODE};
use crate::id::{random_id, random_key};
use crate::volume::SharedVolume;

/// Collaborators a suite drives. All calls are blocking.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub server: &'a dyn SourceControl,
    pub volume: &'a dyn SharedVolume,
    pub git: &'a dyn GitClient,
}

/// A binding configured and enabled by the suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookHandle {
    pub scope: Scope,
    pub kind: HookKind,
    pub executable: String,
}

pub struct Suite<'a> {
    env: Collaborators<'a>,
    layout: LayoutConfig,
    namespace: String,
    bindings: BindingSet,
    leaks: LeakDetector,
    owned: BTreeSet<String>,
}

impl<'a> Suite<'a> {
    pub fn new(env: Collaborators<'a>, layout: LayoutConfig, namespace: impl Into<String>) -> Self {
        Suite {
            env,
            layout,
            namespace: namespace.into(),
            bindings: BindingSet::new(),
            leaks: LeakDetector::new(),
            owned: BTreeSet::new(),
        }
    }

    /// Suite with a random namespace.
    pub fn random(env: Collaborators<'a>, layout: LayoutConfig) -> Self {
        Self::new(env, layout, random_id(6))
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Bindings as recorded by this suite.
    pub fn bindings(&self) -> &BindingSet {
        &self.bindings
    }

    // Fixtures

    pub fn create_random_project(&mut self) -> Result<Project> {
        let project = self.env.server.create_project(&random_key(4))?;
        tracing::info!("created project {}", project.key);
        Ok(project)
    }

    pub fn create_random_repository(&mut self, project: &Project) -> Result<Repository> {
        let repository = self
            .env
            .server
            .create_repository(&project.key, &random_id(4))?;
        self.bindings.record_repository(repository.reference());
        tracing::info!("created repository {}/{}", repository.project, repository.slug);
        Ok(repository)
    }

    /// Pushes a commit to the default branch and one to a new branch, then
    /// opens a pull request between them.
    pub fn create_random_pull_request(&mut self, repository: &Repository) -> Result<PullRequest> {
        let mut checkout = self.env.git.clone_repository(repository)?;
        checkout.commit_random_file()?;
        expect_pushed(checkout.push(Some(DEFAULT_BRANCH))?, DEFAULT_BRANCH)?;

        let branch = checkout.create_random_branch()?;
        checkout.commit_random_file()?;
        expect_pushed(checkout.push(Some(&branch))?, &branch)?;

        let pull_request = self.env.server.create_pull_request(
            repository,
            &format!("pr.{}", random_id(8)),
            &random_id(20),
            &branch,
            DEFAULT_BRANCH,
        )?;
        tracing::info!(
            "created pull request #{} in {}/{}",
            pull_request.id,
            repository.project,
            repository.slug
        );
        Ok(pull_request)
    }

    // Hook configuration

    /// Writes `script`, configures safe-path settings running it at `scope`
    /// and enables the hook.
    pub fn configure_hook(
        &mut self,
        kind: HookKind,
        scope: &Scope,
        script: &HookScript,
    ) -> Result<HookHandle> {
        self.env.volume.write_file(
            &self.layout.executables_dir.join(&script.name),
            &script.body,
            SCRIPT_MODE,
        )?;
        self.owned.insert(script.name.clone());

        let settings = HookSettings::new()
            .use_safe_path(true)
            .with_executable(script.name.clone());

        self.env.server.configure_hook(scope, kind, &settings)?;
        self.bindings.configure(scope.clone(), kind, settings)?;

        self.env.server.enable_hook(scope, kind)?;
        self.bindings.enable(scope, kind)?;

        tracing::info!("enabled {} hook {} on {}", kind, script.name, scope);
        Ok(HookHandle {
            scope: scope.clone(),
            kind,
            executable: script.name.clone(),
        })
    }

    /// Configures the kind's sample script printing `message` and failing.
    pub fn configure_sample_hook_fail_with_message(
        &mut self,
        kind: HookKind,
        scope: &Scope,
        message: &str,
    ) -> Result<HookHandle> {
        let script = HookScript::fail_with_message(kind, &self.namespace, message);
        self.configure_hook(kind, scope, &script)
    }

    /// Disables `kind` at `scope`, creating an explicit override if nothing
    /// was bound there.
    pub fn disable(&mut self, scope: &Scope, kind: HookKind) -> Result<()> {
        self.env.server.disable_hook(scope, kind)?;
        let binding = self.bindings.disable(scope, kind);
        self.leaks.note_disabled(binding);
        tracing::info!("disabled {} hook on {}", kind, scope);
        Ok(())
    }

    pub fn disable_hook(&mut self, hook: &HookHandle) -> Result<()> {
        self.disable(&hook.scope, hook.kind)
    }

    // Leak detection

    /// Hook scripts on the volume that run one of this suite's executables.
    pub fn owned_scripts(&self) -> Result<ScriptSnapshot> {
        let mut snapshot = self.env.volume.snapshot(&self.layout.hook_scripts_dir)?;
        snapshot.retain(|name, entry| self.owned.iter().any(|exe| entry.references(name, exe)));
        Ok(snapshot)
    }

    pub fn record_hook_scripts(&mut self) -> Result<()> {
        let snapshot = self.owned_scripts()?;
        tracing::debug!("recorded {} hook scripts", snapshot.len());
        self.leaks.record(snapshot);
        Ok(())
    }

    /// Leak report without failing on orphans.
    pub fn inspect_hook_scripts(&self) -> Result<LeakReport> {
        let current = self.owned_scripts()?;
        Ok(self.leaks.inspect(&current, &self.bindings)?)
    }

    pub fn detect_hook_scripts_leak(&mut self) -> Result<LeakReport> {
        let current = self.owned_scripts()?;
        let report = self.leaks.detect(&current, &self.bindings)?;
        tracing::debug!("no hook scripts leaked ({} removed)", report.removed.len());
        Ok(report)
    }

    // Operations that trigger hooks

    /// Expected outcome for `kind` on `repository` under `rules`.
    pub fn predict(
        &self,
        repository: &Repository,
        kind: HookKind,
        rules: ResolutionRules,
    ) -> Resolution {
        resolve(&self.bindings, &repository.reference(), kind, rules)
    }

    /// Clones `repository`, commits a random file and pushes it.
    pub fn push(&self, repository: &Repository) -> Result<PushResult> {
        let mut checkout: Box<dyn Checkout> = self.env.git.clone_repository(repository)?;
        checkout.commit_random_file()?;
        checkout.push(Some(DEFAULT_BRANCH))
    }

    pub fn merge(
        &self,
        repository: &Repository,
        pull_request: &PullRequest,
    ) -> Result<MergeOutcome> {
        self.env.server.merge_pull_request(repository, pull_request)
    }
}

fn expect_pushed(result: PushResult, branch: &str) -> Result<()> {
    if result.accepted {
        return Ok(());
    }
    Err(Error::environment(format!(
        "unable to git push into {}: {}",
        branch,
        result.output.trim()
    )))
}

#[cfg(test)]
#[path = "suite_tests.rs"]
mod tests;
