// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the CLI are defined here
//! with typed accessor functions. The variable name constants are generated
//! by `build.rs` and live in the [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Returns the value of `HOOKCHECK_CONFIG` if set.
pub fn config_path() -> Option<PathBuf> {
    non_empty(vars::HOOKCHECK_CONFIG).map(PathBuf::from)
}

/// Returns the value of `HOOKCHECK_BITBUCKET_URL` if set.
pub fn bitbucket_url() -> Option<String> {
    non_empty(vars::HOOKCHECK_BITBUCKET_URL)
}

/// Returns the value of `HOOKCHECK_BITBUCKET_USER` if set.
pub fn bitbucket_user() -> Option<String> {
    non_empty(vars::HOOKCHECK_BITBUCKET_USER)
}

/// Returns the value of `HOOKCHECK_BITBUCKET_PASSWORD` if set.
pub fn bitbucket_password() -> Option<String> {
    std::env::var(vars::HOOKCHECK_BITBUCKET_PASSWORD).ok()
}

/// Returns the value of `HOOKCHECK_HOME_DIR` if set.
pub fn home_dir() -> Option<PathBuf> {
    non_empty(vars::HOOKCHECK_HOME_DIR).map(PathBuf::from)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
