// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Harness configuration.
//!
//! Configuration is read from `hookcheck.toml` and includes:
//! - `bitbucket`: server URL, credentials and the host path of its home directory
//! - `layout`: where executables and generated hook scripts live under that home
//! - `addons`: the reproduced and fixed add-on builds
//! - `addon`, `git`, `run`: install polling, commit identity and parallelism
//!
//! Values from `HOOKCHECK_*` environment variables override the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use hc_core::addon::resolve_artifact;
use hc_core::{Addon, AddonPair};

use crate::env;
use crate::error::{Error, Result};

const CONFIG_FILE_NAME: &str = "hookcheck.toml";
const USER_CONFIG_DIR: &str = "hookcheck";
const USER_CONFIG_FILE: &str = "config.toml";

/// Harness configuration stored in `hookcheck.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bitbucket: BitbucketConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub addons: AddonsConfig,
    #[serde(default)]
    pub addon: InstallConfig,
    #[serde(default)]
    pub git: GitConfig,
    #[serde(default)]
    pub run: RunConfig,
    /// Directory relative artifact paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Server under test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BitbucketConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default = "default_password")]
    pub password: String,
    /// Host path of the server's mounted home directory.
    #[serde(default)]
    pub home_dir: PathBuf,
}

impl Default for BitbucketConfig {
    fn default() -> Self {
        BitbucketConfig {
            url: String::new(),
            user: default_user(),
            password: default_password(),
            home_dir: PathBuf::new(),
        }
    }
}

/// Paths relative to the server home.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_executables_dir")]
    pub executables_dir: PathBuf,
    #[serde(default = "default_hook_scripts_dir")]
    pub hook_scripts_dir: PathBuf,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            executables_dir: default_executables_dir(),
            hook_scripts_dir: default_hook_scripts_dir(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddonsConfig {
    pub reproduced: Option<Addon>,
    pub fixed: Option<Addon>,
}

/// Polling of the plugin manager after an upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallConfig {
    #[serde(default = "default_install_poll_interval_ms")]
    pub install_poll_interval_ms: u64,
    #[serde(default = "default_install_poll_attempts")]
    pub install_poll_attempts: u32,
}

impl Default for InstallConfig {
    fn default() -> Self {
        InstallConfig {
            install_poll_interval_ms: default_install_poll_interval_ms(),
            install_poll_attempts: default_install_poll_attempts(),
        }
    }
}

impl InstallConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.install_poll_interval_ms)
    }
}

/// Identity used for commits pushed by the harness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    #[serde(default = "default_git_user_name")]
    pub user_name: String,
    #[serde(default = "default_git_user_email")]
    pub user_email: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            user_name: default_git_user_name(),
            user_email: default_git_user_email(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            parallel: default_parallel(),
        }
    }
}

fn default_user() -> String {
    "admin".to_string()
}

fn default_password() -> String {
    "admin".to_string()
}

fn default_executables_dir() -> PathBuf {
    PathBuf::from("shared/external-hooks")
}

fn default_hook_scripts_dir() -> PathBuf {
    PathBuf::from("shared/config/hook-scripts")
}

fn default_install_poll_interval_ms() -> u64 {
    1000
}

fn default_install_poll_attempts() -> u32 {
    120
}

fn default_git_user_name() -> String {
    "hookcheck".to_string()
}

fn default_git_user_email() -> String {
    "hookcheck@localhost".to_string()
}

fn default_parallel() -> bool {
    true
}

impl Config {
    /// Parses configuration text; relative artifacts resolve against `base_dir`.
    pub fn parse(text: &str, base_dir: &Path) -> Result<Self> {
        let mut config: Config = toml::from_str(text)?;
        config.base_dir = base_dir.to_path_buf();
        Ok(config)
    }

    /// Loads configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::parse(&text, &base_dir)
    }

    /// Finds, loads and completes the configuration from the environment.
    ///
    /// Without any file the configuration comes from the environment alone.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match find_config(explicit)? {
            Some(path) => {
                tracing::debug!("loading config from {}", path.display());
                Self::load(&path)?
            }
            None => Config {
                base_dir: PathBuf::from("."),
                ..Config::default()
            },
        };
        config.apply_env();
        Ok(config)
    }

    /// Applies `HOOKCHECK_*` overrides.
    pub fn apply_env(&mut self) {
        if let Some(url) = env::bitbucket_url() {
            self.bitbucket.url = url;
        }
        if let Some(user) = env::bitbucket_user() {
            self.bitbucket.user = user;
        }
        if let Some(password) = env::bitbucket_password() {
            self.bitbucket.password = password;
        }
        if let Some(home_dir) = env::home_dir() {
            self.bitbucket.home_dir = home_dir;
        }
    }

    /// Checks what a run against a live server needs.
    pub fn validate(&self) -> Result<()> {
        if self.bitbucket.url.trim().is_empty() {
            return Err(Error::Config(
                "bitbucket.url is required\n  hint: set it in hookcheck.toml or HOOKCHECK_BITBUCKET_URL"
                    .to_string(),
            ));
        }
        if !self.bitbucket.url.starts_with("http://") && !self.bitbucket.url.starts_with("https://")
        {
            return Err(Error::Config(format!(
                "invalid bitbucket.url '{}': must start with http:// or https://",
                self.bitbucket.url
            )));
        }
        if self.bitbucket.home_dir.as_os_str().is_empty() {
            return Err(Error::Config(
                "bitbucket.home_dir is required\n  hint: set it in hookcheck.toml or HOOKCHECK_HOME_DIR"
                    .to_string(),
            ));
        }
        if self.addon.install_poll_attempts == 0 {
            return Err(Error::Config(
                "addon.install_poll_attempts must be at least 1".to_string(),
            ));
        }
        self.addon_pair().map(|_| ())
    }

    /// The two builds a run compares, with artifact paths resolved.
    pub fn addon_pair(&self) -> Result<AddonPair> {
        let resolve = |addon: &Option<Addon>, name: &str| {
            addon
                .as_ref()
                .map(|a| Addon::new(a.version.clone(), resolve_artifact(&self.base_dir, &a.artifact)))
                .ok_or_else(|| Error::Config(format!("addons.{name} is required")))
        };
        let reproduced = resolve(&self.addons.reproduced, "reproduced")?;
        let fixed = resolve(&self.addons.fixed, "fixed")?;
        Ok(AddonPair::new(reproduced, fixed)?)
    }

    /// The server's shared home, the root safe paths resolve under.
    pub fn shared_home(&self) -> PathBuf {
        self.bitbucket.home_dir.join("shared")
    }

    pub fn executables_dir(&self) -> PathBuf {
        self.bitbucket.home_dir.join(&self.layout.executables_dir)
    }

    pub fn hook_scripts_dir(&self) -> PathBuf {
        self.bitbucket.home_dir.join(&self.layout.hook_scripts_dir)
    }
}

/// Locates the configuration file.
///
/// Order: explicit path, `HOOKCHECK_CONFIG`, `./hookcheck.toml`, then the
/// user config directory. An explicit or environment path must exist.
pub fn find_config(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit.map(Path::to_path_buf).or_else(env::config_path) {
        if !path.is_file() {
            return Err(Error::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        return Ok(Some(path));
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Ok(Some(local));
    }

    Ok(dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE))
        .filter(|path| path.is_file()))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
