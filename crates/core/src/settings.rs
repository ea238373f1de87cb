// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Hook settings as understood by the external hooks add-on.
//!
//! Serializes to the settings object the add-on stores per scope:
//!
//! ```json
//! { "exe": "pre.fail.sh", "safe_path": true, "params": "a\r\nb", "async": false }
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Directory, relative to the server's shared home, that safe-path executables live in.
pub const SAFE_DIR_NAME: &str = "external-hooks";

/// Settings object bound to a hook at some scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookSettings {
    /// Executable to run; relative to the safe directory when `safe_path` is set.
    #[serde(rename = "exe")]
    pub executable: String,
    #[serde(default)]
    pub safe_path: bool,
    /// Extra arguments, one per line.
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_params",
        deserialize_with = "deserialize_params"
    )]
    pub params: Vec<String>,
    /// Run detached from the triggering operation.
    #[serde(rename = "async", default, skip_serializing_if = "std::ops::Not::not")]
    pub asynchronous: bool,
    /// Merge checks only: comment on the pull request with the script output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_comments: Option<bool>,
    /// Merge checks only: decline the pull request when the check rejects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decline_pull_request_on_rejection: Option<bool>,
}

fn serialize_params<S: Serializer>(params: &[String], s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(&params.join("\r\n"))
}

fn deserialize_params<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Vec<String>, D::Error> {
    let raw = Option::<String>::deserialize(d)?.unwrap_or_default();
    Ok(raw
        .split("\r\n")
        .filter(|arg| !arg.is_empty())
        .map(str::to_string)
        .collect())
}

impl HookSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn use_safe_path(mut self, safe_path: bool) -> Self {
        self.safe_path = safe_path;
        self
    }

    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn asynchronous(mut self, asynchronous: bool) -> Self {
        self.asynchronous = asynchronous;
        self
    }

    pub fn with_comments(mut self, add_comments: bool) -> Self {
        self.add_comments = Some(add_comments);
        self
    }

    pub fn decline_on_rejection(mut self, decline: bool) -> Self {
        self.decline_pull_request_on_rejection = Some(decline);
        self
    }

    /// Checks the settings the way the add-on validates them on save.
    pub fn validate(&self) -> Result<()> {
        if self.executable.trim().is_empty() {
            return Err(Error::InvalidSettings(
                "executable is blank, please specify something".to_string(),
            ));
        }
        if self.safe_path && normalize_relative(&self.executable).is_none() {
            return Err(Error::InvalidSettings(format!(
                "executable '{}' escapes the {} directory",
                self.executable, SAFE_DIR_NAME
            )));
        }
        if self.params.iter().any(|p| p.contains('\n')) {
            return Err(Error::InvalidSettings(
                "params must not contain line breaks".to_string(),
            ));
        }
        Ok(())
    }

    /// Executable path as seen from the safe directory, or the raw path when
    /// safe path is off. `None` if the path cannot be normalized.
    pub fn normalized_executable(&self) -> Option<String> {
        if self.safe_path {
            normalize_relative(&self.executable)
        } else {
            Some(self.executable.clone())
        }
    }

    /// Absolute location of the executable on a server whose shared home is `shared_home`.
    pub fn resolved_executable(&self, shared_home: &Path) -> Option<PathBuf> {
        let normalized = self.normalized_executable()?;
        if self.safe_path {
            Some(shared_home.join(SAFE_DIR_NAME).join(normalized))
        } else {
            Some(PathBuf::from(normalized))
        }
    }

    /// Settings object in the form the add-on's REST resource accepts.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Collapses `.` and `..` segments; `None` when the path climbs above its root.
fn normalize_relative(path: &str) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            s => parts.push(s),
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
