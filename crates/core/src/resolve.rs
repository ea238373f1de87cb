// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Effective hook resolution for an operation against a repository.
//!
//! Resolution walks the repository's scope chain from most to least specific
//! and stops at the first explicit binding. How that walk treats explicit
//! disables and repositories created after a parent binding was enabled is
//! controlled by [`ResolutionRules`], so the same binding set can be evaluated
//! under several add-on behaviors and compared with what the server did.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::binding::{BindingSet, BindingState};
use crate::kind::HookKind;
use crate::scope::{RepositoryRef, Scope};

/// Does an explicit disable at a more specific scope stop the walk?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverrideRule {
    /// An explicit disable ends the walk: the hook does not run.
    Suppresses,
    /// An explicit disable is skipped and a less specific enabled binding still runs.
    Ignored,
}

/// Do repositories created after a parent binding was enabled see it?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InheritanceRule {
    /// Parent bindings reach every repository beneath them.
    Inherited,
    /// Parent bindings only reach repositories that existed when they were enabled.
    EnabledRepositoriesOnly,
}

/// The two independent dimensions resolution can vary along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionRules {
    pub disabled_override: OverrideRule,
    pub inheritance: InheritanceRule,
}

impl ResolutionRules {
    pub const fn new(disabled_override: OverrideRule, inheritance: InheritanceRule) -> Self {
        ResolutionRules {
            disabled_override,
            inheritance,
        }
    }

    /// Most specific explicit binding wins; parents reach later repositories.
    pub const fn most_specific() -> Self {
        Self::new(OverrideRule::Suppresses, InheritanceRule::Inherited)
    }

    /// Repository disables ignored; parents only reach repositories that
    /// existed when they were enabled.
    pub const fn legacy() -> Self {
        Self::new(OverrideRule::Ignored, InheritanceRule::EnabledRepositoriesOnly)
    }

    pub fn with_override(mut self, rule: OverrideRule) -> Self {
        self.disabled_override = rule;
        self
    }

    pub fn with_inheritance(mut self, rule: InheritanceRule) -> Self {
        self.inheritance = rule;
        self
    }
}

impl Default for ResolutionRules {
    fn default() -> Self {
        Self::most_specific()
    }
}

/// Outcome of resolving a hook kind for a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum Resolution {
    /// The executable of the binding at `scope` runs.
    Runs { scope: Scope, executable: String },
    /// Nothing runs. `decided_by` names the disabling scope, if one ended the walk.
    DoesNotRun { decided_by: Option<Scope> },
}

impl Resolution {
    pub fn runs(&self) -> bool {
        matches!(self, Resolution::Runs { .. })
    }

    pub fn executable(&self) -> Option<&str> {
        match self {
            Resolution::Runs { executable, .. } => Some(executable),
            Resolution::DoesNotRun { .. } => None,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Runs { scope, executable } => {
                write!(f, "runs {} (bound at {})", executable, scope)
            }
            Resolution::DoesNotRun {
                decided_by: Some(scope),
            } => write!(f, "does not run (disabled at {})", scope),
            Resolution::DoesNotRun { decided_by: None } => {
                write!(f, "does not run (no binding)")
            }
        }
    }
}

/// Resolves which script, if any, runs for `kind` on `repository`.
pub fn resolve(
    bindings: &BindingSet,
    repository: &RepositoryRef,
    kind: HookKind,
    rules: ResolutionRules,
) -> Resolution {
    let target = repository.scope();
    let created_at = bindings.repository_created_at(repository);

    for scope in target.chain() {
        let Some(binding) = bindings.get(&scope, kind) else {
            continue;
        };
        if !binding.is_explicit() {
            continue;
        }
        match binding.state {
            BindingState::Enabled => {
                let reaches = scope == target
                    || rules.inheritance == InheritanceRule::Inherited
                    || binding.enabled_at.is_some_and(|at| at > created_at);
                if !reaches {
                    continue;
                }
                if let Some(executable) = binding.executable() {
                    return Resolution::Runs { scope, executable };
                }
            }
            BindingState::Disabled => {
                if rules.disabled_override == OverrideRule::Suppresses {
                    return Resolution::DoesNotRun {
                        decided_by: Some(scope),
                    };
                }
            }
            BindingState::Configured => {}
        }
    }

    Resolution::DoesNotRun { decided_by: None }
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
