// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use crate::bitbucket::{BitbucketClient, PluginManager};
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::Result;
use crate::git::GitCli;
use crate::report::RunReport;
use crate::runner::Runner;
use crate::scenarios::{self, Scenario};
use crate::suite::Collaborators;
use crate::volume::LocalVolume;

pub fn run(
    config: Option<&Path>,
    scenarios: &[String],
    sequential: bool,
    output: OutputFormat,
) -> Result<()> {
    let selected = scenarios::select(scenarios)?;
    let config = Config::discover(config)?;
    config.validate()?;

    let report = run_against_server(&config, &selected, !sequential && config.run.parallel)?;
    print!("{}", render(&report, output)?);
    report.ensure_passed()
}

fn run_against_server(config: &Config, selected: &[Scenario], parallel: bool) -> Result<RunReport> {
    let addons = config.addon_pair()?;
    let bitbucket = &config.bitbucket;
    let client = BitbucketClient::new(&bitbucket.url, &bitbucket.user, &bitbucket.password)?;
    let plugins = PluginManager::new(
        client.clone(),
        config.addon.poll_interval(),
        config.addon.install_poll_attempts,
    );
    let volume = LocalVolume::new(&bitbucket.home_dir);
    let git = GitCli::new(&bitbucket.user, &bitbucket.password, config.git.clone());

    tracing::info!(
        "running {} scenarios against {} ({} -> {})",
        selected.len(),
        client.base_url(),
        addons.reproduced,
        addons.fixed
    );

    let env = Collaborators {
        server: &client,
        volume: &volume,
        git: &git,
    };
    let runner = Runner::new(env, &plugins, config.layout.clone(), addons).parallel(parallel);
    Ok(runner.run(selected))
}

pub(crate) fn render(report: &RunReport, output: OutputFormat) -> Result<String> {
    match output {
        OutputFormat::Text => Ok(report.render_text()),
        OutputFormat::Json => Ok(report.to_json()? + "\n"),
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
