// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Detection of hook script files left behind after a hook is disabled.
//!
//! Disabling a binding through the add-on and removing its script file are
//! separate effects, so they are checked separately: record the installed
//! scripts while the state is clean, disable, then detect.
//!
//! A file is an orphan when no enabled binding references it and either it
//! appeared after the recording or it belongs to an executable disabled since
//! the recording.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::binding::{BindingSet, HookBinding};
use crate::error::{Error, Result};
use crate::snapshot::ScriptSnapshot;

/// Result of comparing the current scripts with the recorded baseline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeakReport {
    /// Files that should have been removed but are still installed.
    pub orphans: Vec<String>,
    /// Files present at recording time and gone now.
    pub removed: Vec<String>,
    /// Files that appeared after the recording.
    pub added: Vec<String>,
}

impl LeakReport {
    pub fn is_clean(&self) -> bool {
        self.orphans.is_empty()
    }

    /// Turns a report with orphans into [`Error::LeakDetected`].
    pub fn ensure_clean(self) -> Result<Self> {
        if self.is_clean() {
            Ok(self)
        } else {
            Err(Error::LeakDetected {
                files: self.orphans,
            })
        }
    }
}

/// Record/detect pair guarding script cleanup on disable.
#[derive(Debug, Clone, Default)]
pub struct LeakDetector {
    baseline: Option<ScriptSnapshot>,
    disabled: BTreeSet<String>,
}

impl LeakDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes `snapshot` as the clean state and forgets earlier disables.
    pub fn record(&mut self, snapshot: ScriptSnapshot) {
        self.baseline = Some(snapshot);
        self.disabled.clear();
    }

    pub fn baseline(&self) -> Option<&ScriptSnapshot> {
        self.baseline.as_ref()
    }

    /// Notes that `binding` was disabled, so files of its executable are
    /// expected to be gone at the next detection.
    pub fn note_disabled(&mut self, binding: &HookBinding) {
        if let Some(executable) = binding.executable() {
            self.disabled.insert(executable);
        }
    }

    /// Like [`note_disabled`](Self::note_disabled) for a bare executable name.
    pub fn note_disabled_executable(&mut self, executable: impl Into<String>) {
        self.disabled.insert(executable.into());
    }

    pub fn disabled_executables(&self) -> impl Iterator<Item = &str> {
        self.disabled.iter().map(String::as_str)
    }

    /// Compares `current` with the baseline without judging it.
    pub fn inspect(&self, current: &ScriptSnapshot, bindings: &BindingSet) -> Result<LeakReport> {
        let baseline = self.baseline.as_ref().ok_or_else(|| {
            Error::Usage("hook script leak check requested before scripts were recorded".into())
        })?;

        let live = bindings.referenced_executables();
        let orphans = current
            .iter()
            .filter(|(name, entry)| !live.iter().any(|exe| entry.references(name, exe)))
            .filter(|(name, entry)| {
                !baseline.contains(name)
                    || self.disabled.iter().any(|exe| entry.references(name, exe))
            })
            .map(|(name, _)| name.to_string())
            .collect();

        Ok(LeakReport {
            orphans,
            removed: current
                .removed_since(baseline)
                .into_iter()
                .map(str::to_string)
                .collect(),
            added: current
                .added_since(baseline)
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
    }

    /// Fails with [`Error::LeakDetected`] if `current` holds orphans.
    ///
    /// Disables noted so far are consumed; the baseline is kept.
    pub fn detect(&mut self, current: &ScriptSnapshot, bindings: &BindingSet) -> Result<LeakReport> {
        let report = self.inspect(current, bindings)?;
        self.disabled.clear();
        report.ensure_clean()
    }
}

#[cfg(test)]
#[path = "leak_tests.rs"]
mod tests;
