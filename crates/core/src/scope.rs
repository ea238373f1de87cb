// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scope levels at which a hook binding can be declared.
//!
//! Scopes nest: a repository lives in a project, and every project sees the
//! add-on wide defaults. More specific scopes override less specific ones.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Level at which a hook binding is declared.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "kebab-case")]
pub enum Scope {
    /// Add-on wide default.
    Addon,
    /// Every repository of a project.
    Project { project: String },
    /// A single repository.
    Repository { project: String, slug: String },
}

impl Scope {
    pub fn project(key: impl Into<String>) -> Self {
        Scope::Project {
            project: key.into(),
        }
    }

    pub fn repository(project: impl Into<String>, slug: impl Into<String>) -> Self {
        Scope::Repository {
            project: project.into(),
            slug: slug.into(),
        }
    }

    /// Higher is more specific.
    pub fn specificity(&self) -> u8 {
        match self {
            Scope::Addon => 0,
            Scope::Project { .. } => 1,
            Scope::Repository { .. } => 2,
        }
    }

    /// The next less specific scope, if any.
    pub fn parent(&self) -> Option<Scope> {
        match self {
            Scope::Addon => None,
            Scope::Project { .. } => Some(Scope::Addon),
            Scope::Repository { project, .. } => Some(Scope::project(project.clone())),
        }
    }

    /// This scope followed by all of its ancestors, most specific first.
    pub fn chain(&self) -> Vec<Scope> {
        let mut chain = vec![self.clone()];
        let mut current = self.parent();
        while let Some(scope) = current {
            current = scope.parent();
            chain.push(scope);
        }
        chain
    }

    /// True if a binding at `self` is visible from `other`.
    pub fn covers(&self, other: &Scope) -> bool {
        other.chain().contains(self)
    }

    /// Project key, if the scope belongs to a project.
    pub fn project_key(&self) -> Option<&str> {
        match self {
            Scope::Addon => None,
            Scope::Project { project } | Scope::Repository { project, .. } => Some(project),
        }
    }

    /// Human-readable level name.
    pub fn level(&self) -> &'static str {
        match self {
            Scope::Addon => "add-on",
            Scope::Project { .. } => "project",
            Scope::Repository { .. } => "repository",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Addon => write!(f, "add-on"),
            Scope::Project { project } => write!(f, "project:{}", project),
            Scope::Repository { project, slug } => write!(f, "repository:{}/{}", project, slug),
        }
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidScope(s.to_string());
        if s == "add-on" || s == "addon" {
            return Ok(Scope::Addon);
        }
        if let Some(key) = s.strip_prefix("project:") {
            if key.is_empty() || key.contains('/') {
                return Err(invalid());
            }
            return Ok(Scope::project(key));
        }
        if let Some(rest) = s.strip_prefix("repository:") {
            return RepositoryRef::from_str(rest)
                .map(|r| r.scope())
                .map_err(|_| invalid());
        }
        Err(invalid())
    }
}

/// Identifies a repository by project key and slug.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub project: String,
    pub slug: String,
}

impl RepositoryRef {
    pub fn new(project: impl Into<String>, slug: impl Into<String>) -> Self {
        RepositoryRef {
            project: project.into(),
            slug: slug.into(),
        }
    }

    pub fn scope(&self) -> Scope {
        Scope::repository(self.project.clone(), self.slug.clone())
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.project, self.slug)
    }
}

/// Parses `KEY/slug`.
impl FromStr for RepositoryRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('/') {
            Some((project, slug))
                if !project.is_empty() && !slug.is_empty() && !slug.contains('/') =>
            {
                Ok(RepositoryRef::new(project, slug))
            }
            _ => Err(Error::InvalidScope(s.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
