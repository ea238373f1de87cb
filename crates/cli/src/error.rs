// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use hc_core::ErrorCategory;
use thiserror::Error;

/// All possible errors that can occur in the hcrs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] hc_core::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unknown scenario: '{0}'\n  hint: run 'hookcheck scenarios' to list them")]
    UnknownScenario(String),

    #[error("{failed} of {total} scenarios failed")]
    ScenariosFailed { failed: usize, total: usize },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{method} {path} returned {status}: {body}")]
    HttpStatus {
        method: &'static str,
        path: String,
        status: u16,
        body: String,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for an environment failure reported by a collaborator.
    pub fn environment(message: impl Into<String>) -> Self {
        Error::Core(hc_core::Error::Environment(message.into()))
    }

    /// Classification used in scenario reports.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Core(e) => e.category(),
            Error::Http(_) | Error::HttpStatus { .. } | Error::Io(_) => {
                ErrorCategory::Environment
            }
            Error::Config(_)
            | Error::Toml(_)
            | Error::UnknownScenario(_)
            | Error::ScenariosFailed { .. }
            | Error::Json(_) => ErrorCategory::Usage,
        }
    }

    /// True for failures that are the scenario's verdict on the add-on.
    pub fn is_verdict(&self) -> bool {
        matches!(self, Error::Core(e) if e.is_verdict())
    }
}

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
