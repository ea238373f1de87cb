// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for hc-core operations.
//!
//! Variants follow the harness error taxonomy: environment failures,
//! configuration rejections, assertion failures (the scenario's verdict),
//! and harness misuse. See [`Error::category`].

use thiserror::Error;

use crate::kind::HookKind;
use crate::scope::Scope;

/// All possible errors that can occur in hc-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("environment error: {0}")]
    Environment(String),

    #[error("add-on rejected {action} of {kind} hook on {scope}: {reason}")]
    Configuration {
        action: &'static str,
        scope: Scope,
        kind: HookKind,
        reason: String,
    },

    #[error("assertion failed: {message}\n  expected: {expected}\n  actual: {actual}")]
    Assertion {
        message: String,
        expected: String,
        actual: String,
    },

    #[error("hook scripts leaked after disable: {}", files.join(", "))]
    LeakDetected { files: Vec<String> },

    #[error("usage error: {0}")]
    Usage(String),

    #[error(
        "invalid hook kind: '{0}'\n  hint: valid kinds are: pre-receive, post-receive, merge-check"
    )]
    InvalidHookKind(String),

    #[error("invalid scope: '{0}'\n  hint: use 'add-on', 'project:KEY' or 'repository:KEY/slug'")]
    InvalidScope(String),

    #[error("invalid hook settings: {0}")]
    InvalidSettings(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification used when reporting a failed scenario phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCategory {
    /// A collaborator was unreachable or misbehaved; the run environment is broken.
    Environment,
    /// The add-on refused a configure/enable/disable request.
    Configuration,
    /// Observed behavior differed from the expectation.
    Assertion,
    /// The harness itself was driven out of order.
    Usage,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Environment => "environment",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Assertion => "assertion",
            ErrorCategory::Usage => "usage",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Builds an [`Error::Assertion`] from anything printable.
    pub fn assertion(
        message: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Error::Assertion {
            message: message.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Environment(_) | Error::Io(_) => ErrorCategory::Environment,
            Error::Configuration { .. } => ErrorCategory::Configuration,
            Error::Assertion { .. } | Error::LeakDetected { .. } => ErrorCategory::Assertion,
            Error::Usage(_)
            | Error::InvalidHookKind(_)
            | Error::InvalidScope(_)
            | Error::InvalidSettings(_)
            | Error::Json(_) => ErrorCategory::Usage,
        }
    }

    /// True when the error is the scenario's verdict rather than a broken run.
    pub fn is_verdict(&self) -> bool {
        self.category() == ErrorCategory::Assertion
    }
}

/// A specialized Result type for hc-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
