// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Hook bindings and the ordered set they are recorded in.
//!
//! A binding associates a (scope, kind) pair with settings and an
//! enabled/disabled decision. Its lifecycle is
//! absent → configured → enabled → disabled → (re-enabled).
//!
//! [`BindingSet`] stamps every change, and every repository creation, with a
//! logical clock so resolution can reason about ordering without consulting
//! live server state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::kind::HookKind;
use crate::scope::{RepositoryRef, Scope};
use crate::settings::HookSettings;

/// Lifecycle state of a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BindingState {
    /// Settings stored, no enable/disable decision at this scope yet.
    Configured,
    /// Explicitly enabled at this scope.
    Enabled,
    /// Explicitly disabled at this scope. Settings, if any, are retained.
    Disabled,
}

impl BindingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BindingState::Configured => "configured",
            BindingState::Enabled => "enabled",
            BindingState::Disabled => "disabled",
        }
    }
}

/// A (scope, kind) → settings/enabled association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookBinding {
    pub scope: Scope,
    pub kind: HookKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<HookSettings>,
    pub state: BindingState,
    /// Clock value of the last change.
    #[serde(default)]
    pub updated_at: u64,
    /// Clock value of the transition into [`BindingState::Enabled`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_at: Option<u64>,
}

impl HookBinding {
    pub fn is_enabled(&self) -> bool {
        self.state == BindingState::Enabled
    }

    /// An explicit binding is one carrying an enable or disable decision.
    /// Stored settings alone do not make a binding explicit.
    pub fn is_explicit(&self) -> bool {
        matches!(self.state, BindingState::Enabled | BindingState::Disabled)
    }

    /// Normalized executable this binding runs, if it has settings.
    pub fn executable(&self) -> Option<String> {
        self.settings.as_ref()?.normalized_executable()
    }
}

/// When a repository came into existence, on the set's clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    #[serde(flatten)]
    pub repository: RepositoryRef,
    pub created_at: u64,
}

/// Ordered record of hook bindings across scopes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingSet {
    #[serde(default)]
    clock: u64,
    #[serde(default)]
    bindings: Vec<HookBinding>,
    #[serde(default)]
    repositories: Vec<RepositoryRecord>,
}

impl BindingSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn tick(&mut self) -> u64 {
        let latest = self
            .bindings
            .iter()
            .map(|b| b.updated_at)
            .chain(self.repositories.iter().map(|r| r.created_at))
            .max()
            .unwrap_or(0);
        self.clock = self.clock.max(latest) + 1;
        self.clock
    }

    fn position(&self, scope: &Scope, kind: HookKind) -> Option<usize> {
        self.bindings
            .iter()
            .position(|b| &b.scope == scope && b.kind == kind)
    }

    pub fn get(&self, scope: &Scope, kind: HookKind) -> Option<&HookBinding> {
        self.position(scope, kind).map(|i| &self.bindings[i])
    }

    pub fn bindings(&self) -> &[HookBinding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Stores settings for (scope, kind).
    ///
    /// Reconfiguring with identical settings changes nothing, so configuring
    /// the same hook twice still yields a single binding.
    pub fn configure(
        &mut self,
        scope: Scope,
        kind: HookKind,
        settings: HookSettings,
    ) -> Result<&HookBinding> {
        settings.validate()?;
        let index = match self.position(&scope, kind) {
            Some(i) if self.bindings[i].settings.as_ref() == Some(&settings) => i,
            Some(i) => {
                let now = self.tick();
                let binding = &mut self.bindings[i];
                binding.settings = Some(settings);
                binding.updated_at = now;
                i
            }
            None => {
                let now = self.tick();
                self.bindings.push(HookBinding {
                    scope,
                    kind,
                    settings: Some(settings),
                    state: BindingState::Configured,
                    updated_at: now,
                    enabled_at: None,
                });
                self.bindings.len() - 1
            }
        };
        Ok(&self.bindings[index])
    }

    /// Marks (scope, kind) enabled. Requires prior settings at that scope.
    pub fn enable(&mut self, scope: &Scope, kind: HookKind) -> Result<&HookBinding> {
        let index = self
            .position(scope, kind)
            .filter(|&i| self.bindings[i].settings.is_some())
            .ok_or_else(|| {
                Error::Usage(format!(
                    "cannot enable {} hook on {}: not configured",
                    kind, scope
                ))
            })?;
        if !self.bindings[index].is_enabled() {
            let now = self.tick();
            let binding = &mut self.bindings[index];
            binding.state = BindingState::Enabled;
            binding.updated_at = now;
            binding.enabled_at = Some(now);
        }
        Ok(&self.bindings[index])
    }

    /// Marks (scope, kind) disabled, creating an explicit override when
    /// nothing was recorded at that scope.
    pub fn disable(&mut self, scope: &Scope, kind: HookKind) -> &HookBinding {
        let now = self.tick();
        let index = match self.position(scope, kind) {
            Some(i) => {
                let binding = &mut self.bindings[i];
                binding.state = BindingState::Disabled;
                binding.updated_at = now;
                binding.enabled_at = None;
                i
            }
            None => {
                self.bindings.push(HookBinding {
                    scope: scope.clone(),
                    kind,
                    settings: None,
                    state: BindingState::Disabled,
                    updated_at: now,
                    enabled_at: None,
                });
                self.bindings.len() - 1
            }
        };
        &self.bindings[index]
    }

    /// Drops whatever is recorded at (scope, kind) so the scope inherits again.
    pub fn clear(&mut self, scope: &Scope, kind: HookKind) -> Option<HookBinding> {
        self.position(scope, kind).map(|i| self.bindings.remove(i))
    }

    /// Records that a repository was created now. Returns its creation stamp.
    pub fn record_repository(&mut self, repository: RepositoryRef) -> u64 {
        if let Some(existing) = self
            .repositories
            .iter()
            .find(|r| r.repository == repository)
        {
            return existing.created_at;
        }
        let now = self.tick();
        self.repositories.push(RepositoryRecord {
            repository,
            created_at: now,
        });
        now
    }

    /// Creation stamp of a repository; repositories never recorded count as
    /// pre-existing (stamp 0).
    pub fn repository_created_at(&self, repository: &RepositoryRef) -> u64 {
        self.repositories
            .iter()
            .find(|r| &r.repository == repository)
            .map(|r| r.created_at)
            .unwrap_or(0)
    }

    pub fn enabled(&self) -> impl Iterator<Item = &HookBinding> {
        self.bindings.iter().filter(|b| b.is_enabled())
    }

    /// Executables referenced by at least one enabled binding.
    pub fn referenced_executables(&self) -> BTreeSet<String> {
        self.enabled().filter_map(|b| b.executable()).collect()
    }
}

#[cfg(test)]
#[path = "binding_tests.rs"]
mod tests;
