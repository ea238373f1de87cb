// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The fixed set of git-server events an external hook can be bound to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Plugin key of the external hooks add-on.
pub const PLUGIN_KEY: &str = "com.ngs.stash.externalhooks.external-hooks";

/// Git-server event an external hook runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookKind {
    /// Runs before refs are updated; a non-zero exit rejects the push.
    PreReceive,
    /// Runs after refs are updated; cannot reject.
    PostReceive,
    /// Runs when a pull request merge is attempted; a non-zero exit vetoes the merge.
    MergeCheck,
}

impl HookKind {
    pub const ALL: [HookKind; 3] = [
        HookKind::PreReceive,
        HookKind::PostReceive,
        HookKind::MergeCheck,
    ];

    /// Returns the string representation used in arguments and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            HookKind::PreReceive => "pre-receive",
            HookKind::PostReceive => "post-receive",
            HookKind::MergeCheck => "merge-check",
        }
    }

    /// Module id of the hook inside the add-on descriptor.
    pub fn component_id(&self) -> &'static str {
        match self {
            HookKind::PreReceive => "external-pre-receive-hook",
            HookKind::PostReceive => "external-post-receive-hook",
            HookKind::MergeCheck => "external-merge-check-hook",
        }
    }

    /// Fully qualified hook key used by the server's hook settings API.
    pub fn hook_key(&self) -> String {
        format!("{}:{}", PLUGIN_KEY, self.component_id())
    }

    /// File name used for the kind's "fail with message" sample script.
    pub fn sample_script_name(&self) -> &'static str {
        match self {
            HookKind::PreReceive => "pre.fail.sh",
            HookKind::PostReceive => "post.fail.sh",
            HookKind::MergeCheck => "merge.fail.sh",
        }
    }

    /// Whether a failing script at this kind blocks the triggering operation.
    pub fn can_reject(&self) -> bool {
        !matches!(self, HookKind::PostReceive)
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HookKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "pre-receive" => Ok(HookKind::PreReceive),
            "post-receive" => Ok(HookKind::PostReceive),
            "merge-check" => Ok(HookKind::MergeCheck),
            _ => Err(Error::InvalidHookKind(s.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "kind_tests.rs"]
mod tests;
