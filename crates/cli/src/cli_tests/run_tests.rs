// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn test_run_defaults() {
    let cli = Cli::try_parse_from(["hookcheck", "run"]).unwrap();
    match cli.command {
        Command::Run {
            config,
            scenarios,
            sequential,
            output,
        } => {
            assert!(config.is_none());
            assert!(scenarios.is_empty());
            assert!(!sequential);
            assert_eq!(output, OutputFormat::Text);
        }
        _ => panic!("Expected Run command"),
    }
}

#[test]
fn test_run_repeated_scenarios() {
    let cli = Cli::try_parse_from([
        "hookcheck",
        "run",
        "-c",
        "ci.toml",
        "-s",
        "merge-check-veto",
        "--scenario",
        "script-leak-on-disable",
        "--sequential",
        "-o",
        "json",
    ])
    .unwrap();
    match cli.command {
        Command::Run {
            config,
            scenarios,
            sequential,
            output,
        } => {
            assert_eq!(config.unwrap(), PathBuf::from("ci.toml"));
            assert_eq!(scenarios, vec!["merge-check-veto", "script-leak-on-disable"]);
            assert!(sequential);
            assert_eq!(output, OutputFormat::Json);
        }
        _ => panic!("Expected Run command"),
    }
}

#[test]
fn test_invalid_output_format_rejected() {
    assert!(Cli::try_parse_from(["hookcheck", "scenarios", "-o", "yaml"]).is_err());
}

#[test]
fn test_completion_requires_shell() {
    assert!(Cli::try_parse_from(["hookcheck", "completion"]).is_err());
    assert!(Cli::try_parse_from(["hookcheck", "completion", "bash"]).is_ok());
}
