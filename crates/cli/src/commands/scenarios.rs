// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt::Write as _;

use hc_core::Phase;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::scenarios::Scenario;

use super::to_json;

#[derive(Serialize)]
struct ScenarioJson {
    name: &'static str,
    phases: &'static [Phase],
    description: &'static str,
}

pub fn run(output: OutputFormat) -> Result<()> {
    print!("{}", render(output)?);
    Ok(())
}

pub(crate) fn render(output: OutputFormat) -> Result<String> {
    match output {
        OutputFormat::Json => {
            let list: Vec<ScenarioJson> = Scenario::ALL
                .iter()
                .map(|s| ScenarioJson {
                    name: s.name(),
                    phases: s.phases(),
                    description: s.description(),
                })
                .collect();
            to_json(&list)
        }
        OutputFormat::Text => {
            let width = Scenario::ALL
                .iter()
                .map(|s| s.name().len())
                .max()
                .unwrap_or(0);
            let mut out = String::new();
            for scenario in Scenario::ALL {
                let phases: Vec<&str> = scenario.phases().iter().map(Phase::as_str).collect();
                let _ = writeln!(
                    out,
                    "{:width$}  {:<14}  {}",
                    scenario.name(),
                    phases.join(","),
                    scenario.description(),
                );
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
#[path = "scenarios_tests.rs"]
mod tests;
