// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Point-in-time listings of installed hook script files.
//!
//! Each file is recorded with a SHA-256 digest of its content and, when the
//! file is a wrapper generated by the add-on, the executable it invokes. The
//! wrapper's command line is the single-quoted executable path, with single
//! quotes escaped as `'"'"'`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static WRAPPED_COMMAND_RE: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r#"(?m)^\s*'((?:[^']|'"'"')+)'"#) {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    });

/// Hex SHA-256 of a script's content.
pub fn digest(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

/// Executable invoked by an add-on generated wrapper script, if recognizable.
pub fn wrapped_executable(content: &str) -> Option<String> {
    WRAPPED_COMMAND_RE
        .captures_iter(content)
        .last()
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().replace(r#"'"'"'"#, "'"))
}

/// One file in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptEntry {
    pub digest: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,
}

impl ScriptEntry {
    pub fn from_content(content: &[u8]) -> Self {
        ScriptEntry {
            digest: digest(content),
            executable: wrapped_executable(&String::from_utf8_lossy(content)),
        }
    }

    /// True if the file named `name` with this entry belongs to `executable`:
    /// either the file is the executable itself, or a wrapper that runs it.
    pub fn references(&self, name: &str, executable: &str) -> bool {
        let executable = executable.trim_start_matches('/');
        if executable.is_empty() {
            return false;
        }
        let base = executable.rsplit('/').next().unwrap_or(executable);
        if name == executable || name == base {
            return true;
        }
        match &self.executable {
            Some(path) => path == executable || path.ends_with(&format!("/{}", executable)),
            None => false,
        }
    }
}

/// Installed script files by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScriptSnapshot {
    entries: BTreeMap<String, ScriptEntry>,
}

impl ScriptSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_files<I, N>(files: I) -> Self
    where
        I: IntoIterator<Item = (N, Vec<u8>)>,
        N: Into<String>,
    {
        let mut snapshot = Self::new();
        for (name, content) in files {
            snapshot.insert(name, &content);
        }
        snapshot
    }

    pub fn insert(&mut self, name: impl Into<String>, content: &[u8]) {
        self.entries
            .insert(name.into(), ScriptEntry::from_content(content));
    }

    pub fn get(&self, name: &str) -> Option<&ScriptEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScriptEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Files present now but absent from `baseline`.
    pub fn added_since(&self, baseline: &ScriptSnapshot) -> Vec<&str> {
        self.iter()
            .filter(|(name, _)| !baseline.contains(name))
            .map(|(name, _)| name)
            .collect()
    }

    /// Files present in `baseline` but gone now.
    pub fn removed_since<'a>(&self, baseline: &'a ScriptSnapshot) -> Vec<&'a str> {
        baseline
            .iter()
            .filter(|(name, _)| !self.contains(name))
            .map(|(name, _)| name)
            .collect()
    }

    /// Files whose content changed relative to `baseline`.
    pub fn modified_since(&self, baseline: &ScriptSnapshot) -> Vec<&str> {
        self.iter()
            .filter(|(name, entry)| {
                baseline
                    .get(name)
                    .is_some_and(|before| before.digest != entry.digest)
            })
            .map(|(name, _)| name)
            .collect()
    }

    /// Keeps only the files for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &ScriptEntry) -> bool) {
        self.entries.retain(|name, entry| keep(name, entry));
    }

    /// Files belonging to `executable`.
    pub fn referencing(&self, executable: &str) -> Vec<&str> {
        self.iter()
            .filter(|(name, entry)| entry.references(name, executable))
            .map(|(name, _)| name)
            .collect()
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
