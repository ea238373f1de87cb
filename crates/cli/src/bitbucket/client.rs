// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Bitbucket Server REST 1.0 client.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use hc_core::{HookKind, HookSettings, Scope};

use super::{MergeOutcome, Project, PullRequest, Repository, SourceControl};
use crate::error::{Error, Result};

const API: &str = "rest/api/1.0";
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Blocking client authenticated with basic auth.
#[derive(Debug, Clone)]
pub struct BitbucketClient {
    base_url: String,
    user: String,
    password: String,
    http: Client,
}

impl BitbucketClient {
    pub fn new(base_url: &str, user: &str, password: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(BitbucketClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            user: user.to_string(),
            password: password.to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(super) fn http(&self) -> &Client {
        &self.http
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(super) fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .basic_auth(&self.user, Some(&self.password))
            .header("X-Atlassian-Token", "no-check")
    }

    fn send(&self, method: &'static str, path: &str, request: RequestBuilder) -> Result<Response> {
        tracing::debug!("{} {}", method, path);
        let response = self.authed(request).send()?;
        expect_success(method, path, response)
    }

    fn hook_request(
        &self,
        action: &'static str,
        scope: &Scope,
        kind: HookKind,
        build: impl FnOnce(&Client, String) -> RequestBuilder,
    ) -> Result<()> {
        let leaf = if action == "configure" {
            "settings"
        } else {
            "enabled"
        };
        let path = hook_path(scope, kind, leaf).ok_or_else(|| hc_core::Error::Configuration {
            action,
            scope: scope.clone(),
            kind,
            reason: "hooks cannot be bound at add-on scope through the REST API".to_string(),
        })?;

        tracing::debug!("{} {} hook on {}", action, kind, scope);
        let response = self.authed(build(&self.http, self.url(&path))).send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().unwrap_or_default();
        Err(hc_core::Error::Configuration {
            action,
            scope: scope.clone(),
            kind,
            reason: format!("{}: {}", status.as_u16(), error_message(&body)),
        }
        .into())
    }
}

/// Turn a non-2xx response into [`Error::HttpStatus`].
pub(super) fn expect_success(method: &'static str, path: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(Error::HttpStatus {
        method,
        path: path.to_string(),
        status: status.as_u16(),
        body: error_message(&body),
    })
}

/// REST path of a hook binding resource, `None` at add-on scope.
pub(super) fn hook_path(scope: &Scope, kind: HookKind, leaf: &str) -> Option<String> {
    let owner = match scope {
        Scope::Addon => return None,
        Scope::Project { project } => format!("{API}/projects/{project}"),
        Scope::Repository { project, slug } => {
            format!("{API}/projects/{project}/repos/{slug}")
        }
    };
    Some(format!("{owner}/settings/hooks/{}/{leaf}", kind.hook_key()))
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    #[serde(default)]
    message: String,
    #[serde(default)]
    vetoes: Vec<Veto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Veto {
    #[serde(default)]
    summary_message: String,
    #[serde(default)]
    detailed_message: String,
}

/// First error message of a REST error body, or the body itself.
pub(super) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.errors.into_iter().next())
        .map(|entry| entry.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| body.trim().to_string())
}

/// Merge veto carried by a 409 response, if any.
pub(super) fn parse_veto(body: &str) -> Option<MergeOutcome> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .errors
        .into_iter()
        .flat_map(|entry| entry.vetoes)
        .next()
        .map(|veto| MergeOutcome::Vetoed {
            summary: veto.summary_message,
            detail: veto.detailed_message,
        })
}

#[derive(Debug, Deserialize)]
struct RepositoryBody {
    slug: String,
    #[serde(default)]
    links: Links,
}

#[derive(Debug, Default, Deserialize)]
struct Links {
    #[serde(default)]
    clone: Vec<Link>,
}

#[derive(Debug, Deserialize)]
struct Link {
    href: String,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct PullRequestBody {
    id: u64,
    #[serde(default)]
    version: u64,
}

impl SourceControl for BitbucketClient {
    fn create_project(&self, key: &str) -> Result<Project> {
        let path = format!("{API}/projects");
        let response = self.send(
            "POST",
            &path,
            self.http
                .post(self.url(&path))
                .json(&json!({ "key": key, "name": key })),
        )?;
        Ok(response.json()?)
    }

    fn create_repository(&self, project: &str, slug: &str) -> Result<Repository> {
        let path = format!("{API}/projects/{project}/repos");
        let response = self.send(
            "POST",
            &path,
            self.http
                .post(self.url(&path))
                .json(&json!({ "name": slug, "scmId": "git" })),
        )?;
        let body: RepositoryBody = response.json()?;
        let clone_url = body
            .links
            .clone
            .into_iter()
            .find(|link| link.name == "http")
            .map(|link| link.href)
            .unwrap_or_else(|| {
                format!(
                    "{}/scm/{}/{}.git",
                    self.base_url,
                    project.to_lowercase(),
                    body.slug
                )
            });
        Ok(Repository {
            project: project.to_string(),
            slug: body.slug,
            clone_url,
        })
    }

    fn create_pull_request(
        &self,
        repository: &Repository,
        title: &str,
        description: &str,
        from_branch: &str,
        to_branch: &str,
    ) -> Result<PullRequest> {
        let path = format!(
            "{API}/projects/{}/repos/{}/pull-requests",
            repository.project, repository.slug
        );
        let response = self.send(
            "POST",
            &path,
            self.http.post(self.url(&path)).json(&json!({
                "title": title,
                "description": description,
                "fromRef": { "id": format!("refs/heads/{from_branch}") },
                "toRef": { "id": format!("refs/heads/{to_branch}") },
            })),
        )?;
        let body: PullRequestBody = response.json()?;
        Ok(PullRequest {
            id: body.id,
            version: body.version,
            from_branch: from_branch.to_string(),
            to_branch: to_branch.to_string(),
        })
    }

    fn merge_pull_request(
        &self,
        repository: &Repository,
        pull_request: &PullRequest,
    ) -> Result<MergeOutcome> {
        let path = format!(
            "{API}/projects/{}/repos/{}/pull-requests/{}/merge?version={}",
            repository.project, repository.slug, pull_request.id, pull_request.version
        );
        tracing::debug!("POST {}", path);
        let response = self.authed(self.http.post(self.url(&path))).send()?;
        if response.status() == StatusCode::CONFLICT {
            let body = response.text().unwrap_or_default();
            return parse_veto(&body).ok_or(Error::HttpStatus {
                method: "POST",
                path,
                status: StatusCode::CONFLICT.as_u16(),
                body: error_message(&body),
            });
        }
        expect_success("POST", &path, response)?;
        Ok(MergeOutcome::Merged)
    }

    fn configure_hook(
        &self,
        scope: &Scope,
        kind: HookKind,
        settings: &HookSettings,
    ) -> Result<()> {
        let body = settings.to_json()?;
        self.hook_request("configure", scope, kind, |http, url| http.put(url).json(&body))
    }

    fn enable_hook(&self, scope: &Scope, kind: HookKind) -> Result<()> {
        self.hook_request("enable", scope, kind, |http, url| http.put(url))
    }

    fn disable_hook(&self, scope: &Scope, kind: HookKind) -> Result<()> {
        self.hook_request("disable", scope, kind, |http, url| http.delete(url))
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
