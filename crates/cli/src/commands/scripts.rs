// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline hook script snapshots and leak checks.

use std::fmt::Write as _;
use std::path::Path;

use hc_core::{BindingSet, LeakDetector, LeakReport, ScriptSnapshot};

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use crate::volume::{LocalVolume, SharedVolume};

use super::{read_json, to_json};

pub fn snapshot(dir: &Path, output: OutputFormat) -> Result<()> {
    let snapshot = take_snapshot(dir)?;
    print!("{}", render_snapshot(&snapshot, output)?);
    Ok(())
}

pub fn leaks(
    baseline: &Path,
    dir: &Path,
    bindings: Option<&Path>,
    disabled: &[String],
    output: OutputFormat,
) -> Result<()> {
    let baseline: ScriptSnapshot = read_json(baseline)?;
    let bindings: BindingSet = match bindings {
        Some(path) => read_json(path)?,
        None => BindingSet::new(),
    };
    let current = take_snapshot(dir)?;
    let report = check(baseline, &current, &bindings, disabled)?;
    print!("{}", render_report(&report, output)?);
    report.ensure_clean()?;
    Ok(())
}

pub(crate) fn take_snapshot(dir: &Path) -> Result<ScriptSnapshot> {
    if !dir.is_dir() {
        return Err(Error::Config(format!("not a directory: {}", dir.display())));
    }
    LocalVolume::new(dir).snapshot(Path::new(""))
}

/// Leak report for `current` against a recorded `baseline`.
pub(crate) fn check(
    baseline: ScriptSnapshot,
    current: &ScriptSnapshot,
    bindings: &BindingSet,
    disabled: &[String],
) -> Result<LeakReport> {
    let mut detector = LeakDetector::new();
    detector.record(baseline);
    for executable in disabled {
        detector.note_disabled_executable(executable.clone());
    }
    Ok(detector.inspect(current, bindings)?)
}

pub(crate) fn render_snapshot(snapshot: &ScriptSnapshot, output: OutputFormat) -> Result<String> {
    match output {
        OutputFormat::Json => to_json(snapshot),
        OutputFormat::Text => {
            let mut out = String::new();
            for (name, entry) in snapshot.iter() {
                let _ = write!(out, "{}  {}", &entry.digest[..12.min(entry.digest.len())], name);
                if let Some(executable) = &entry.executable {
                    let _ = write!(out, " -> {}", executable);
                }
                out.push('\n');
            }
            Ok(out)
        }
    }
}

pub(crate) fn render_report(report: &LeakReport, output: OutputFormat) -> Result<String> {
    match output {
        OutputFormat::Json => to_json(report),
        OutputFormat::Text => {
            let mut out = String::new();
            if report.is_clean() {
                out.push_str("no orphaned hook scripts\n");
            }
            for name in &report.orphans {
                let _ = writeln!(out, "orphaned: {}", name);
            }
            for name in &report.removed {
                let _ = writeln!(out, "removed: {}", name);
            }
            for name in &report.added {
                let _ = writeln!(out, "added: {}", name);
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
#[path = "scripts_tests.rs"]
mod tests;
