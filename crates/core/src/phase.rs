// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! REPRODUCE→FIX phase sequencing.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::addon::Addon;
use crate::error::{Error, Result};

/// One half of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Show the defect on the pre-fix build.
    Reproduce,
    /// Show the defect is gone on the post-fix build.
    Fix,
}

impl Phase {
    pub const ALL: [Phase; 2] = [Phase::Reproduce, Phase::Fix];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Reproduce => "reproduce",
            Phase::Fix => "fix",
        }
    }

    /// Log line announcing the phase.
    pub fn banner(&self, addon: &Addon) -> String {
        match self {
            Phase::Reproduce => format!("> reproducing bug on add-on version {}", addon.version),
            Phase::Fix => format!("> validating fix on add-on version {}", addon.version),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The phase being run and the build it runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseContext {
    pub phase: Phase,
    pub addon: Addon,
}

impl PhaseContext {
    pub fn new(phase: Phase, addon: Addon) -> Self {
        PhaseContext { phase, addon }
    }

    pub fn banner(&self) -> String {
        self.phase.banner(&self.addon)
    }
}

/// Enforces that a scenario's phases run once each, in order.
#[derive(Debug, Clone, Default)]
pub struct PhaseTracker {
    started: Vec<Phase>,
    running: Option<Phase>,
}

impl PhaseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn running(&self) -> Option<Phase> {
        self.running
    }

    pub fn started(&self) -> &[Phase] {
        &self.started
    }

    pub fn begin(&mut self, phase: Phase) -> Result<()> {
        if let Some(running) = self.running {
            return Err(Error::Usage(format!(
                "{phase} phase started while {running} phase is running"
            )));
        }
        if self.started.contains(&phase) {
            return Err(Error::Usage(format!("{phase} phase already ran")));
        }
        if let Some(last) = self.started.last() {
            if *last > phase {
                return Err(Error::Usage(format!("{phase} phase cannot follow {last}")));
            }
        }
        self.started.push(phase);
        self.running = Some(phase);
        Ok(())
    }

    pub fn finish(&mut self, phase: Phase) -> Result<()> {
        match self.running {
            Some(running) if running == phase => {
                self.running = None;
                Ok(())
            }
            _ => Err(Error::Usage(format!("{phase} phase is not running"))),
        }
    }
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;
