// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use hc_core::{resolve, BindingSet, HookKind, RepositoryRef, Resolution, ResolutionRules};

use crate::cli::OutputFormat;
use crate::error::Result;

use super::{read_json, to_json};

pub fn run(
    bindings: &Path,
    repository: &str,
    kind: &str,
    rules: ResolutionRules,
    output: OutputFormat,
) -> Result<()> {
    let bindings: BindingSet = read_json(bindings)?;
    let resolution = evaluate(&bindings, repository, kind, rules)?;
    print!("{}", render(&resolution, output)?);
    Ok(())
}

pub(crate) fn evaluate(
    bindings: &BindingSet,
    repository: &str,
    kind: &str,
    rules: ResolutionRules,
) -> Result<Resolution> {
    let repository: RepositoryRef = repository.parse()?;
    let kind: HookKind = kind.parse()?;
    Ok(resolve(bindings, &repository, kind, rules))
}

pub(crate) fn render(resolution: &Resolution, output: OutputFormat) -> Result<String> {
    match output {
        OutputFormat::Text => Ok(format!("{}\n", resolution)),
        OutputFormat::Json => to_json(resolution),
    }
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
