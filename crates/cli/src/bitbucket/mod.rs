// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Source-control server collaborators.
//!
//! The harness talks to the server under test through two traits:
//! [`SourceControl`] for fixtures and hook bindings, and [`AddonDeployer`]
//! for swapping add-on builds. Real implementations use the Bitbucket REST
//! API; tests substitute an in-memory server.

mod client;
mod upm;

use serde::{Deserialize, Serialize};

use hc_core::{Addon, HookKind, HookSettings, RepositoryRef, Scope};

use crate::error::Result;

pub use client::BitbucketClient;
pub use upm::PluginManager;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub project: String,
    pub slug: String,
    /// HTTP clone URL without credentials.
    pub clone_url: String,
}

impl Repository {
    pub fn reference(&self) -> RepositoryRef {
        RepositoryRef::new(self.project.clone(), self.slug.clone())
    }

    pub fn scope(&self) -> Scope {
        Scope::repository(self.project.clone(), self.slug.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub id: u64,
    pub version: u64,
    pub from_branch: String,
    pub to_branch: String,
}

/// What happened when a merge was attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum MergeOutcome {
    Merged,
    Vetoed { summary: String, detail: String },
}

impl MergeOutcome {
    pub fn is_vetoed(&self) -> bool {
        matches!(self, MergeOutcome::Vetoed { .. })
    }
}

/// Fixture and hook-binding operations of the server under test.
pub trait SourceControl: Send + Sync {
    fn create_project(&self, key: &str) -> Result<Project>;

    fn create_repository(&self, project: &str, slug: &str) -> Result<Repository>;

    fn create_pull_request(
        &self,
        repository: &Repository,
        title: &str,
        description: &str,
        from_branch: &str,
        to_branch: &str,
    ) -> Result<PullRequest>;

    fn merge_pull_request(
        &self,
        repository: &Repository,
        pull_request: &PullRequest,
    ) -> Result<MergeOutcome>;

    /// Store hook settings at a scope; a rejection is a configuration error.
    fn configure_hook(&self, scope: &Scope, kind: HookKind, settings: &HookSettings)
        -> Result<()>;

    fn enable_hook(&self, scope: &Scope, kind: HookKind) -> Result<()>;

    fn disable_hook(&self, scope: &Scope, kind: HookKind) -> Result<()>;
}

/// Deploys an add-on build to the server under test.
pub trait AddonDeployer: Send + Sync {
    /// Upload `addon` and wait until the server reports it enabled.
    fn install(&self, addon: &Addon) -> Result<()>;
}
