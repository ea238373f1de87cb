// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Add-on installation through the Universal Plugin Manager REST API.

use reqwest::blocking::multipart::{Form, Part};
use serde::Deserialize;
use std::fs;
use std::time::Duration;

use hc_core::{Addon, PLUGIN_KEY};

use super::client::expect_success;
use super::{AddonDeployer, BitbucketClient};
use crate::error::{Error, Result};

const UPM: &str = "rest/plugins/1.0";
const TOKEN_HEADER: &str = "upm-token";

/// Uploads add-on artifacts and waits for them to come up enabled.
#[derive(Debug, Clone)]
pub struct PluginManager {
    client: BitbucketClient,
    poll_interval: Duration,
    poll_attempts: u32,
}

/// State of an installed plugin as reported by the plugin manager.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PluginState {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub version: String,
}

impl PluginState {
    pub fn is_ready(&self, addon: &Addon) -> bool {
        self.enabled && self.version == addon.version
    }
}

impl PluginManager {
    pub fn new(client: BitbucketClient, poll_interval: Duration, poll_attempts: u32) -> Self {
        PluginManager {
            client,
            poll_interval,
            poll_attempts,
        }
    }

    fn upload_token(&self) -> Result<String> {
        let path = format!("{UPM}/?os_authType=basic");
        let response = self
            .client
            .authed(self.client.http().get(self.client.url(&path)))
            .header("Accept", "application/vnd.atl.plugins.installed+json")
            .send()?;
        let response = expect_success("GET", &path, response)?;
        response
            .headers()
            .get(TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| Error::environment("plugin manager did not return an upload token"))
    }

    fn upload(&self, addon: &Addon, token: &str) -> Result<()> {
        let artifact = fs::read(&addon.artifact).map_err(|e| {
            Error::environment(format!(
                "cannot read add-on artifact {}: {}",
                addon.artifact.display(),
                e
            ))
        })?;
        let part = Part::bytes(artifact)
            .file_name(addon.file_name())
            .mime_str("application/java-archive")?;
        let form = Form::new().part("plugin", part);

        let path = format!("{UPM}/?token={token}");
        let response = self
            .client
            .authed(self.client.http().post(self.client.url(&path)))
            .multipart(form)
            .send()?;
        expect_success("POST", &path, response)?;
        Ok(())
    }

    fn state(&self) -> Result<Option<PluginState>> {
        let path = format!("{UPM}/{PLUGIN_KEY}-key");
        let response = self
            .client
            .authed(self.client.http().get(self.client.url(&path)))
            .send()?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(expect_success("GET", &path, response)?.json()?))
    }
}

impl AddonDeployer for PluginManager {
    fn install(&self, addon: &Addon) -> Result<()> {
        tracing::info!("installing add-on {} from {}", addon.version, addon.artifact.display());
        let token = self.upload_token()?;
        self.upload(addon, &token)?;

        for attempt in 1..=self.poll_attempts {
            match self.state()? {
                Some(state) if state.is_ready(addon) => {
                    tracing::info!("add-on {} enabled", addon.version);
                    return Ok(());
                }
                state => tracing::debug!(
                    "waiting for add-on {} (attempt {}): {:?}",
                    addon.version,
                    attempt,
                    state
                ),
            }
            std::thread::sleep(self.poll_interval);
        }

        Err(Error::environment(format!(
            "add-on {} was not enabled after {} checks",
            addon.version, self.poll_attempts
        )))
    }
}

#[cfg(test)]
#[path = "upm_tests.rs"]
mod tests;
