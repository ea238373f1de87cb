// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run results, rendered as text or JSON.

use std::fmt::Write as _;

use hc_core::{ErrorCategory, Phase};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::scenarios::Scenario;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    Passed,
    Failed,
    Skipped,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Passed => "passed",
            Outcome::Failed => "failed",
            Outcome::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseReport {
    pub phase: Phase,
    pub addon_version: String,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ErrorCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PhaseReport {
    pub fn passed(phase: Phase, addon_version: impl Into<String>) -> Self {
        PhaseReport {
            phase,
            addon_version: addon_version.into(),
            outcome: Outcome::Passed,
            category: None,
            message: None,
        }
    }

    pub fn failed(phase: Phase, addon_version: impl Into<String>, error: &Error) -> Self {
        Self::failed_with(phase, addon_version, error.category(), error.to_string())
    }

    pub fn failed_with(
        phase: Phase,
        addon_version: impl Into<String>,
        category: ErrorCategory,
        message: String,
    ) -> Self {
        PhaseReport {
            phase,
            addon_version: addon_version.into(),
            outcome: Outcome::Failed,
            category: Some(category),
            message: Some(message),
        }
    }

    /// An earlier phase of the same scenario failed.
    pub fn skipped(phase: Phase, addon_version: impl Into<String>) -> Self {
        PhaseReport {
            phase,
            addon_version: addon_version.into(),
            outcome: Outcome::Skipped,
            category: None,
            message: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
    pub scenario: String,
    pub phases: Vec<PhaseReport>,
}

impl ScenarioReport {
    pub fn new(scenario: Scenario) -> Self {
        ScenarioReport {
            scenario: scenario.name().to_string(),
            phases: Vec::new(),
        }
    }

    pub fn failed(&self) -> bool {
        self.phases.iter().any(|p| p.outcome == Outcome::Failed)
    }

    pub fn phase(&self, phase: Phase) -> Option<&PhaseReport> {
        self.phases.iter().find(|p| p.phase == phase)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub scenarios: Vec<ScenarioReport>,
}

impl RunReport {
    pub fn failed_count(&self) -> usize {
        self.scenarios.iter().filter(|s| s.failed()).count()
    }

    pub fn scenario(&self, name: &str) -> Option<&ScenarioReport> {
        self.scenarios.iter().find(|s| s.scenario == name)
    }

    /// Fails with [`Error::ScenariosFailed`] if any scenario failed.
    pub fn ensure_passed(&self) -> Result<()> {
        match self.failed_count() {
            0 => Ok(()),
            failed => Err(Error::ScenariosFailed {
                failed,
                total: self.scenarios.len(),
            }),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for scenario in &self.scenarios {
            let status = if scenario.failed() { "FAIL" } else { "PASS" };
            let _ = writeln!(out, "{} {}", status, scenario.scenario);
            for phase in &scenario.phases {
                let _ = write!(
                    out,
                    "  {} ({}): {}",
                    phase.phase,
                    phase.addon_version,
                    phase.outcome.as_str()
                );
                if let Some(category) = phase.category {
                    let _ = write!(out, " [{}]", category.as_str());
                }
                out.push('\n');
                if let Some(message) = &phase.message {
                    for line in message.lines() {
                        let _ = writeln!(out, "    {}", line);
                    }
                }
            }
        }
        let _ = writeln!(
            out,
            "\n{} scenarios, {} failed",
            self.scenarios.len(),
            self.failed_count()
        );
        out
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
