// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use crate::colors;
use crate::help;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use hc_core::{InheritanceRule, OverrideRule};

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Whether an explicit disable at a nested scope stops a parent binding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OverrideArg {
    #[default]
    Suppresses,
    Ignored,
}

impl From<OverrideArg> for OverrideRule {
    fn from(arg: OverrideArg) -> Self {
        match arg {
            OverrideArg::Suppresses => OverrideRule::Suppresses,
            OverrideArg::Ignored => OverrideRule::Ignored,
        }
    }
}

/// Whether repositories created after a parent binding see it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum InheritanceArg {
    #[default]
    Inherited,
    EnabledRepositoriesOnly,
}

impl From<InheritanceArg> for InheritanceRule {
    fn from(arg: InheritanceArg) -> Self {
        match arg {
            InheritanceArg::Inherited => InheritanceRule::Inherited,
            InheritanceArg::EnabledRepositoriesOnly => InheritanceRule::EnabledRepositoriesOnly,
        }
    }
}

#[derive(Parser)]
#[command(name = "hookcheck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Black-box verification of the external hooks add-on")]
#[command(
    long_about = "Black-box verification of the external hooks add-on.\n\n\
    Reproduces known hook scope and script leak bugs on one add-on build and \
    validates their fixes on another, against a running server."
)]
#[command(help_template = help::template())]
#[command(before_help = help::commands())]
#[command(after_help = help::quickstart())]
#[command(styles = help::styles())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run scenarios against a server
    #[command(after_help = colors::examples("\
Examples:
  hookcheck run                                Run every scenario
  hookcheck run -c ci.toml                     Use a specific config file
  hookcheck run -s script-leak-on-disable      Run a single scenario
  hookcheck run --sequential -o json           One scenario at a time, JSON report"))]
    Run {
        /// Config file (default: $HOOKCHECK_CONFIG, ./hookcheck.toml)
        #[arg(long, short = 'c', value_name = "path")]
        config: Option<PathBuf>,

        /// Scenario to run (repeatable, default: all)
        #[arg(long = "scenario", short = 's', value_name = "name")]
        scenarios: Vec<String>,

        /// Run scenarios one at a time
        #[arg(long)]
        sequential: bool,

        /// Report format
        #[arg(long, short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// List available scenarios
    Scenarios {
        #[arg(long, short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Resolve which script runs for a repository from recorded bindings
    #[command(after_help = colors::examples("\
Examples:
  hookcheck resolve --bindings b.json --repository PRJ/repo --kind pre-receive
  hookcheck resolve --bindings b.json --repository PRJ/repo --kind merge-check --override ignored"))]
    Resolve {
        /// JSON binding set
        #[arg(long, value_name = "file")]
        bindings: PathBuf,

        /// Repository as KEY/slug
        #[arg(long, value_name = "KEY/slug")]
        repository: String,

        /// Hook kind (pre-receive, post-receive, merge-check)
        #[arg(long)]
        kind: String,

        /// How explicit disables at nested scopes are treated
        #[arg(long = "override", value_enum, default_value = "suppresses")]
        override_rule: OverrideArg,

        /// How parent bindings reach repositories created later
        #[arg(long, value_enum, default_value = "inherited")]
        inheritance: InheritanceArg,

        #[arg(long, short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Inspect installed hook scripts
    #[command(subcommand)]
    Scripts(ScriptsCommand),

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ScriptsCommand {
    /// Snapshot a hook script directory as JSON
    Snapshot {
        /// Directory to snapshot
        #[arg(long, value_name = "dir")]
        dir: PathBuf,

        #[arg(long, short = 'o', value_enum, default_value = "json")]
        output: OutputFormat,
    },

    /// Compare a directory against a recorded snapshot and report orphans
    #[command(after_help = colors::examples("\
Examples:
  hookcheck scripts snapshot --dir hooks > before.json
  hookcheck scripts leaks --baseline before.json --dir hooks --disabled pre.fail.sh"))]
    Leaks {
        /// Snapshot taken before the disable
        #[arg(long, value_name = "file")]
        baseline: PathBuf,

        /// Directory to inspect
        #[arg(long, value_name = "dir")]
        dir: PathBuf,

        /// JSON binding set in effect (default: none enabled)
        #[arg(long, value_name = "file")]
        bindings: Option<PathBuf>,

        /// Executable disabled since the baseline (repeatable)
        #[arg(long, value_name = "exe")]
        disabled: Vec<String>,

        #[arg(long, short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
