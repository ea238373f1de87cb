// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Git operations against repositories of the server under test.
//!
//! Pushes are how pre-receive and post-receive hooks get triggered, so the
//! push result keeps the full output for assertions.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

use crate::bitbucket::Repository;
use crate::config::GitConfig;
use crate::error::{Error, Result};
use crate::id::random_id;

/// Branch new repositories are pushed to.
pub const DEFAULT_BRANCH: &str = "master";

/// What the server said about a push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushResult {
    pub accepted: bool,
    /// Combined stdout and stderr of the push.
    pub output: String,
}

/// A working copy of a repository.
pub trait Checkout: Send {
    /// Commit a new file with random name and content; returns the file name.
    fn commit_random_file(&mut self) -> Result<String>;

    /// Create and switch to a new branch with a random name.
    fn create_random_branch(&mut self) -> Result<String>;

    /// Push `branch` (the current branch when `None`) to origin.
    fn push(&mut self, branch: Option<&str>) -> Result<PushResult>;
}

pub trait GitClient: Send + Sync {
    fn clone_repository(&self, repository: &Repository) -> Result<Box<dyn Checkout>>;
}

/// [`GitClient`] driving the `git` executable over HTTP with basic auth.
#[derive(Debug, Clone)]
pub struct GitCli {
    user: String,
    password: String,
    identity: GitConfig,
}

impl GitCli {
    pub fn new(user: &str, password: &str, identity: GitConfig) -> Self {
        GitCli {
            user: user.to_string(),
            password: password.to_string(),
            identity,
        }
    }
}

/// Clone URL with credentials embedded; non-HTTP URLs are returned unchanged.
pub fn authenticated_url(clone_url: &str, user: &str, password: &str) -> Result<String> {
    let mut url = reqwest::Url::parse(clone_url)
        .map_err(|e| Error::environment(format!("invalid clone url '{}': {}", clone_url, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Ok(clone_url.to_string());
    }
    let cannot_carry =
        |()| Error::environment(format!("clone url '{}' cannot carry credentials", clone_url));
    url.set_username(user).map_err(cannot_carry)?;
    url.set_password(Some(password)).map_err(cannot_carry)?;
    Ok(url.to_string())
}

fn run_git(dir: Option<&Path>, args: &[&str]) -> Result<Output> {
    let mut cmd = Command::new("git");
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }
    cmd.args(args)
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .map_err(|e| Error::environment(format!("failed to run git: {}", e)))
}

fn expect_git(dir: Option<&Path>, args: &[&str]) -> Result<Output> {
    let output = run_git(dir, args)?;
    if output.status.success() {
        return Ok(output);
    }
    Err(Error::environment(format!(
        "git {} failed: {}",
        args.first().copied().unwrap_or_default(),
        String::from_utf8_lossy(&output.stderr).trim()
    )))
}

/// Whether failed push output shows the server refusing the update.
pub fn is_hook_rejection(output: &str) -> bool {
    output.contains("[remote rejected]") || output.contains("hook declined")
}

impl GitClient for GitCli {
    fn clone_repository(&self, repository: &Repository) -> Result<Box<dyn Checkout>> {
        let dir = TempDir::with_prefix("hookcheck-")?;
        let url = authenticated_url(&repository.clone_url, &self.user, &self.password)?;
        let target = dir.path().to_string_lossy().into_owned();
        expect_git(None, &["clone", "--quiet", &url, &target])?;

        // Empty repositories come back with an unborn HEAD on the client's default.
        if !run_git(Some(dir.path()), &["rev-parse", "--verify", "HEAD"])?
            .status
            .success()
        {
            let head = format!("refs/heads/{DEFAULT_BRANCH}");
            expect_git(Some(dir.path()), &["symbolic-ref", "HEAD", &head])?;
        }

        tracing::debug!("cloned {}/{} into {}", repository.project, repository.slug, target);
        Ok(Box::new(LocalClone {
            dir,
            branch: DEFAULT_BRANCH.to_string(),
            identity: self.identity.clone(),
        }))
    }
}

struct LocalClone {
    dir: TempDir,
    branch: String,
    identity: GitConfig,
}

impl Checkout for LocalClone {
    fn commit_random_file(&mut self) -> Result<String> {
        let name = random_id(8);
        fs::write(self.dir.path().join(&name), random_id(20))?;
        let user = format!("user.name={}", self.identity.user_name);
        let email = format!("user.email={}", self.identity.user_email);
        let message = format!("add {name}");
        expect_git(Some(self.dir.path()), &["add", &name])?;
        expect_git(
            Some(self.dir.path()),
            &["-c", &user, "-c", &email, "commit", "--quiet", "-m", &message],
        )?;
        Ok(name)
    }

    fn create_random_branch(&mut self) -> Result<String> {
        let branch = random_id(8);
        expect_git(Some(self.dir.path()), &["checkout", "--quiet", "-b", &branch])?;
        self.branch = branch.clone();
        Ok(branch)
    }

    fn push(&mut self, branch: Option<&str>) -> Result<PushResult> {
        let branch = branch.unwrap_or(&self.branch).to_string();
        let output = run_git(Some(self.dir.path()), &["push", "origin", &branch])?;
        let text = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        tracing::debug!("push of {} exited with {}: {}", branch, output.status, text.trim());

        if !output.status.success() && !is_hook_rejection(&text) {
            return Err(Error::environment(format!(
                "git push of {} failed: {}",
                branch,
                text.trim()
            )));
        }
        Ok(PushResult {
            accepted: output.status.success(),
            output: text,
        })
    }
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
