// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Access to the server's home directory shared with the harness.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use hc_core::ScriptSnapshot;

use crate::error::{Error, Result};

/// Files the harness writes and reads under the server home.
///
/// Paths are relative to the volume root. Failures are environment errors.
pub trait SharedVolume: Send + Sync {
    /// Write `content` to `path`, creating parent directories, with `mode`.
    fn write_file(&self, path: &Path, content: &[u8], mode: u32) -> Result<()>;

    /// Regular files directly inside `dir`; a missing directory is empty.
    fn read_files(&self, dir: &Path) -> Result<Vec<(String, Vec<u8>)>>;

    /// Snapshot of the files directly inside `dir`.
    fn snapshot(&self, dir: &Path) -> Result<ScriptSnapshot> {
        Ok(ScriptSnapshot::from_files(self.read_files(dir)?))
    }
}

/// The server home mounted on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalVolume {
    root: PathBuf,
}

impl LocalVolume {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LocalVolume { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl SharedVolume for LocalVolume {
    fn write_file(&self, path: &Path, content: &[u8], mode: u32) -> Result<()> {
        let target = self.resolve(path);
        let write = || -> std::io::Result<()> {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, content)?;
            let mut perms = fs::metadata(&target)?.permissions();
            perms.set_mode(mode);
            fs::set_permissions(&target, perms)
        };
        write().map_err(|e| {
            Error::environment(format!(
                "cannot write {} to shared volume: {}",
                target.display(),
                e
            ))
        })?;
        tracing::debug!("wrote {} ({} bytes)", target.display(), content.len());
        Ok(())
    }

    fn read_files(&self, dir: &Path) -> Result<Vec<(String, Vec<u8>)>> {
        let dir = self.resolve(dir);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(Error::environment(format!(
                    "cannot list {}: {}",
                    dir.display(),
                    e
                )))
            }
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let content = fs::read(entry.path()).map_err(|e| {
                Error::environment(format!("cannot read {}: {}", entry.path().display(), e))
            })?;
            files.push((name, content));
        }
        files.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(files)
    }
}

#[cfg(test)]
#[path = "volume_tests.rs"]
mod tests;
