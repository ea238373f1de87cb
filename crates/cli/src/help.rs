// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Help text generation with colorization support.

use crate::colors;
use clap::builder::styling::Styles;

pub fn styles() -> Styles {
    if !colors::should_colorize() {
        return Styles::plain();
    }

    use anstyle::{Ansi256Color, Color, Style};

    let color = |code| Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))));
    let header = color(colors::codes::HEADER);

    Styles::styled()
        .header(header)
        .usage(header)
        .literal(color(colors::codes::LITERAL))
        .placeholder(color(colors::codes::CONTEXT))
        .valid(color(colors::codes::CONTEXT))
}

/// Main help template with colorized Options header.
pub fn template() -> String {
    format!(
        "{{about-with-newline}}
{{usage-heading}} {{usage}}

{{before-help}}{}
{{options}}{{after-help}}",
        colors::header("Options:")
    )
}

/// Commands list shown before options in main help.
pub fn commands() -> String {
    format!(
        "\
{header_scenarios}
  {run}         Reproduce bugs and validate fixes against a server
  {scenarios}   List available scenarios

{header_offline}
  {resolve}     Resolve a hook for a repository from recorded bindings
  {scripts}     Snapshot hook scripts and check them for leaks
  {completion}  Generate shell completions
",
        header_scenarios = colors::header("Scenarios:"),
        header_offline = colors::header("Offline Checks:"),
        run = colors::literal("run"),
        scenarios = colors::literal("scenarios"),
        resolve = colors::literal("resolve"),
        scripts = colors::literal("scripts"),
        completion = colors::literal("completion"),
    )
}

/// Quickstart help shown after options in main help.
pub fn quickstart() -> String {
    colors::examples(
        "\
Get started:
  hookcheck scenarios                  List scenarios
  hookcheck run --config <file>        Run every scenario
  hookcheck run -s merge-check-veto    Run one scenario",
    )
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
