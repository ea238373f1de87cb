// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Add-on builds and which one is deployed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::phase::Phase;

/// A deployable add-on build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addon {
    pub version: String,
    pub artifact: PathBuf,
}

impl Addon {
    pub fn new(version: impl Into<String>, artifact: impl Into<PathBuf>) -> Self {
        Addon {
            version: version.into(),
            artifact: artifact.into(),
        }
    }

    /// File name used when uploading the artifact.
    pub fn file_name(&self) -> String {
        self.artifact
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("external-hooks-{}.jar", self.version))
    }

    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(Error::Usage("add-on version must not be empty".into()));
        }
        if self.artifact.as_os_str().is_empty() {
            return Err(Error::Usage(format!(
                "add-on {} has no artifact path",
                self.version
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Addon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}

/// The pre-fix and post-fix builds a run compares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonPair {
    pub reproduced: Addon,
    pub fixed: Addon,
}

impl AddonPair {
    pub fn new(reproduced: Addon, fixed: Addon) -> Result<Self> {
        reproduced.validate()?;
        fixed.validate()?;
        if reproduced.version == fixed.version {
            return Err(Error::Usage(format!(
                "reproduced and fixed add-on share version {}",
                fixed.version
            )));
        }
        Ok(AddonPair { reproduced, fixed })
    }

    /// Build a phase runs against.
    pub fn for_phase(&self, phase: Phase) -> &Addon {
        match phase {
            Phase::Reproduce => &self.reproduced,
            Phase::Fix => &self.fixed,
        }
    }
}

/// Tracks which build is on the server so installs are idempotent per version.
#[derive(Debug, Clone, Default)]
pub struct AddonInstallation {
    current: Option<Addon>,
    installs: usize,
}

impl AddonInstallation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Addon> {
        self.current.as_ref()
    }

    /// Number of installs actually performed.
    pub fn installs(&self) -> usize {
        self.installs
    }

    pub fn is_deployed(&self, addon: &Addon) -> bool {
        self.current
            .as_ref()
            .is_some_and(|current| current.version == addon.version)
    }

    /// Runs `deploy` unless `addon` is already the deployed build.
    ///
    /// Returns whether a deploy happened. A failed deploy leaves the
    /// installation unknown.
    pub fn ensure<E, F>(&mut self, addon: &Addon, deploy: F) -> std::result::Result<bool, E>
    where
        F: FnOnce(&Addon) -> std::result::Result<(), E>,
    {
        if self.is_deployed(addon) {
            return Ok(false);
        }
        self.current = None;
        deploy(addon)?;
        self.current = Some(addon.clone());
        self.installs += 1;
        Ok(true)
    }
}

/// Where an artifact path from configuration points, relative to `base`.
pub fn resolve_artifact(base: &Path, artifact: &Path) -> PathBuf {
    if artifact.is_absolute() {
        artifact.to_path_buf()
    } else {
        base.join(artifact)
    }
}

#[cfg(test)]
#[path = "addon_tests.rs"]
mod tests;
