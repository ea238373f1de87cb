// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! hcrs - black-box verification harness for the external hooks add-on.
//!
//! This crate drives a running source-control server through its REST API,
//! git, and the shared home volume to reproduce hook scope and script leak
//! bugs on one add-on build and validate their fixes on another.
//!
//! # Main Components
//!
//! - [`Suite`] - fixtures, hook configuration and leak checks for one scenario
//! - [`Scenario`] - the catalogue of REPRODUCE→FIX scenarios
//! - [`Runner`] - installs builds and runs scenario phases, in parallel by default
//! - [`Config`] - `hookcheck.toml` plus `HOOKCHECK_*` overrides
//! - [`Error`] - error types for all operations
//!
//! ```rust,ignore
//! use hcrs::{Collaborators, Runner, Scenario};
//!
//! let env = Collaborators { server: &client, volume: &volume, git: &git };
//! let report = Runner::new(env, &plugins, config.layout.clone(), addons)
//!     .run(&Scenario::ALL);
//! report.ensure_passed()?;
//! ```

mod cli;
pub mod colors;
mod commands;
pub mod help;

pub mod assertions;
pub mod bitbucket;
pub mod config;
pub mod env;
pub mod error;
pub mod git;
pub mod hooks;
pub mod id;
pub mod report;
pub mod runner;
pub mod scenarios;
pub mod suite;
pub mod volume;

#[cfg(test)]
mod test_helpers;

pub use cli::{Cli, Command, InheritanceArg, OutputFormat, OverrideArg, ScriptsCommand};
pub use config::Config;
pub use error::{Error, Result};
pub use report::RunReport;
pub use runner::Runner;
pub use scenarios::Scenario;
pub use suite::{Collaborators, Suite};

use clap::CommandFactory;
use clap_complete::generate;
use hc_core::ResolutionRules;

/// Run a CLI command.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Run {
            config,
            scenarios,
            sequential,
            output,
        } => commands::run::run(config.as_deref(), &scenarios, sequential, output),
        Command::Scenarios { output } => commands::scenarios::run(output),
        Command::Resolve {
            bindings,
            repository,
            kind,
            override_rule,
            inheritance,
            output,
        } => {
            let rules = ResolutionRules::new(override_rule.into(), inheritance.into());
            commands::resolve::run(&bindings, &repository, &kind, rules, output)
        }
        Command::Scripts(cmd) => match cmd {
            ScriptsCommand::Snapshot { dir, output } => commands::scripts::snapshot(&dir, output),
            ScriptsCommand::Leaks {
                baseline,
                dir,
                bindings,
                disabled,
                output,
            } => commands::scripts::leaks(&baseline, &dir, bindings.as_deref(), &disabled, output),
        },
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "hookcheck", &mut std::io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
