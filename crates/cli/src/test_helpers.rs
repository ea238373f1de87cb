// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory server for offline tests.
//!
//! [`FakeServer`] implements every collaborator trait. It keeps hook
//! bindings in a [`BindingSet`], writes one wrapper script per enabled
//! (scope, kind) into the hook scripts directory of a temporary home, and
//! "runs" hook executables by interpreting their `echo` and `exit` lines.
//!
//! How bindings resolve and whether wrappers are deleted on disable depends
//! on the installed build's [`Behavior`].

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use hc_core::{
    resolve, Addon, AddonPair, BindingSet, HookKind, HookSettings, RepositoryRef, Resolution,
    ResolutionRules, Scope,
};

use crate::bitbucket::{
    AddonDeployer, MergeOutcome, Project, PullRequest, Repository, SourceControl,
};
use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::git::{Checkout, GitClient, PushResult};
use crate::suite::Collaborators;
use crate::volume::LocalVolume;

/// How an add-on build treats bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Behavior {
    pub rules: ResolutionRules,
    /// Deletes a repository wrapper on disable and the previous wrapper on
    /// re-enable.
    pub removes_scripts: bool,
    /// Deletes a project wrapper on disable.
    pub removes_project_scripts: bool,
}

impl Behavior {
    /// Repository disables ignored, project hooks only reach repositories
    /// that existed when they were enabled, repository wrappers left behind.
    pub const LEGACY: Behavior = Behavior {
        rules: ResolutionRules::legacy(),
        removes_scripts: false,
        removes_project_scripts: true,
    };

    /// Most specific explicit binding wins; wrappers deleted on disable.
    pub const FIXED: Behavior = Behavior {
        rules: ResolutionRules::most_specific(),
        removes_scripts: true,
        removes_project_scripts: true,
    };
}

pub fn addon_pair() -> AddonPair {
    AddonPair::new(
        Addon::new("9.1.0", "/builds/external-hooks-9.1.0.jar"),
        Addon::new("10.0.0", "/builds/external-hooks-10.0.0.jar"),
    )
    .unwrap()
}

#[derive(Default)]
struct State {
    build: Option<Addon>,
    behaviors: HashMap<String, Behavior>,
    installs: Vec<String>,
    fail_installs: bool,
    bindings: BindingSet,
    wrappers: BTreeMap<(Scope, HookKind), String>,
    next_wrapper: u64,
    projects: BTreeSet<String>,
    repositories: BTreeSet<(String, String)>,
    pull_requests: HashMap<(String, String, u64), bool>,
    next_pull_request: u64,
}

pub struct FakeServer {
    home: TempDir,
    layout: LayoutConfig,
    state: Arc<Mutex<State>>,
}

impl FakeServer {
    /// Server whose reproduced build is legacy and fixed build follows
    /// most-specific precedence.
    pub fn new() -> Self {
        let pair = addon_pair();
        let server = Self::empty();
        server.set_behavior(&pair.reproduced.version, Behavior::LEGACY);
        server.set_behavior(&pair.fixed.version, Behavior::FIXED);
        server
    }

    pub fn empty() -> Self {
        FakeServer {
            home: TempDir::new().unwrap(),
            layout: LayoutConfig::default(),
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    pub fn set_behavior(&self, version: &str, behavior: Behavior) {
        self.lock().behaviors.insert(version.to_string(), behavior);
    }

    pub fn fail_installs(&self) {
        self.lock().fail_installs = true;
    }

    pub fn layout(&self) -> LayoutConfig {
        self.layout.clone()
    }

    pub fn volume(&self) -> LocalVolume {
        LocalVolume::new(self.home.path())
    }

    pub fn collaborators<'a>(&'a self, volume: &'a LocalVolume) -> Collaborators<'a> {
        Collaborators {
            server: self,
            volume,
            git: self,
        }
    }

    pub fn installs(&self) -> Vec<String> {
        self.lock().installs.clone()
    }

    /// Names of wrapper scripts currently on disk.
    pub fn wrapper_files(&self) -> Vec<String> {
        let dir = self.home.path().join(&self.layout.hook_scripts_dir);
        let mut names: Vec<String> = match fs::read_dir(dir) {
            Ok(entries) => entries
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }

    /// Directly installs `version`, bypassing the deployer.
    pub fn install_version(&self, version: &str) {
        self.install(&Addon::new(version, "/builds/direct.jar")).unwrap();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    fn wrapper_dir(&self) -> PathBuf {
        self.home.path().join(&self.layout.hook_scripts_dir)
    }

    fn shared_home(&self) -> PathBuf {
        self.home.path().join("shared")
    }

    fn check_scope(state: &State, action: &'static str, scope: &Scope, kind: HookKind) -> Result<()> {
        let rejection = |reason: &str| -> Result<()> {
            Err(hc_core::Error::Configuration {
                action,
                scope: scope.clone(),
                kind,
                reason: reason.to_string(),
            }
            .into())
        };
        if state.build.is_none() {
            return rejection("404: hook not found");
        }
        match scope {
            Scope::Addon => rejection("hooks cannot be bound at add-on scope through the REST API"),
            Scope::Project { project } if !state.projects.contains(project) => {
                rejection("404: project does not exist")
            }
            Scope::Repository { project, slug }
                if !state.repositories.contains(&(project.clone(), slug.clone())) =>
            {
                rejection("404: repository does not exist")
            }
            _ => Ok(()),
        }
    }

    fn behavior(state: &State) -> Option<Behavior> {
        let build = state.build.as_ref()?;
        state.behaviors.get(&build.version).copied()
    }
}

/// Wrapper the add-on generates: a single-quoted command line.
pub fn wrapper_script(executable_path: &str) -> String {
    format!(
        "#!/bin/bash\n\n# generated by external hooks\n\n'{}'\n",
        executable_path.replace('\'', r#"'"'"'"#)
    )
}

/// Interprets `echo` and `exit` lines of a script. Returns (exit code, lines).
pub fn run_script(body: &str) -> (i32, Vec<String>) {
    let mut lines = Vec::new();
    for line in body.lines().map(str::trim) {
        if let Some(text) = line.strip_prefix("echo ") {
            lines.push(text.to_string());
        } else if let Some(code) = line.strip_prefix("exit ") {
            return (code.trim().parse().unwrap_or(1), lines);
        }
    }
    (0, lines)
}

fn execute(shared_home: &Path, resolution: &Resolution) -> Option<(i32, Vec<String>)> {
    let Resolution::Runs { executable, .. } = resolution else {
        return None;
    };
    let settings = HookSettings::new()
        .use_safe_path(true)
        .with_executable(executable.clone());
    let path = settings.resolved_executable(shared_home)?;
    Some(match fs::read_to_string(&path) {
        Ok(body) => run_script(&body),
        Err(_) => (1, vec![format!("{} not found", path.display())]),
    })
}

impl SourceControl for FakeServer {
    fn create_project(&self, key: &str) -> Result<Project> {
        let mut state = self.lock();
        if !state.projects.insert(key.to_string()) {
            return Err(Error::HttpStatus {
                method: "POST",
                path: "rest/api/1.0/projects".into(),
                status: 409,
                body: "Project key already in use".into(),
            });
        }
        Ok(Project {
            key: key.to_string(),
            name: key.to_string(),
        })
    }

    fn create_repository(&self, project: &str, slug: &str) -> Result<Repository> {
        let mut state = self.lock();
        if !state.projects.contains(project) {
            return Err(Error::HttpStatus {
                method: "POST",
                path: format!("rest/api/1.0/projects/{project}/repos"),
                status: 404,
                body: "project does not exist".into(),
            });
        }
        state
            .repositories
            .insert((project.to_string(), slug.to_string()));
        state
            .bindings
            .record_repository(RepositoryRef::new(project, slug));
        Ok(Repository {
            project: project.to_string(),
            slug: slug.to_string(),
            clone_url: format!("http://fake/scm/{}/{}.git", project.to_lowercase(), slug),
        })
    }

    fn create_pull_request(
        &self,
        repository: &Repository,
        _title: &str,
        _description: &str,
        from_branch: &str,
        to_branch: &str,
    ) -> Result<PullRequest> {
        let mut state = self.lock();
        state.next_pull_request += 1;
        let id = state.next_pull_request;
        state.pull_requests.insert(
            (repository.project.clone(), repository.slug.clone(), id),
            false,
        );
        Ok(PullRequest {
            id,
            version: 0,
            from_branch: from_branch.to_string(),
            to_branch: to_branch.to_string(),
        })
    }

    fn merge_pull_request(
        &self,
        repository: &Repository,
        pull_request: &PullRequest,
    ) -> Result<MergeOutcome> {
        let mut state = self.lock();
        let key = (
            repository.project.clone(),
            repository.slug.clone(),
            pull_request.id,
        );
        if !state.pull_requests.contains_key(&key) {
            return Err(Error::HttpStatus {
                method: "POST",
                path: "merge".into(),
                status: 404,
                body: "no such pull request".into(),
            });
        }
        if let Some(behavior) = Self::behavior(&state) {
            let resolution = resolve(
                &state.bindings,
                &repository.reference(),
                HookKind::MergeCheck,
                behavior.rules,
            );
            if let Some((code, lines)) = execute(&self.shared_home(), &resolution) {
                if code != 0 {
                    return Ok(MergeOutcome::Vetoed {
                        summary: "Merge request failed".into(),
                        detail: lines.join("\n") + "\n",
                    });
                }
            }
        }
        state.pull_requests.insert(key, true);
        Ok(MergeOutcome::Merged)
    }

    fn configure_hook(
        &self,
        scope: &Scope,
        kind: HookKind,
        settings: &HookSettings,
    ) -> Result<()> {
        let mut state = self.lock();
        Self::check_scope(&state, "configure", scope, kind)?;
        state
            .bindings
            .configure(scope.clone(), kind, settings.clone())
            .map_err(|e| hc_core::Error::Configuration {
                action: "configure",
                scope: scope.clone(),
                kind,
                reason: e.to_string(),
            })?;
        Ok(())
    }

    fn enable_hook(&self, scope: &Scope, kind: HookKind) -> Result<()> {
        let mut guard = self.lock();
        let state = &mut *guard;
        Self::check_scope(state, "enable", scope, kind)?;
        let binding = state
            .bindings
            .enable(scope, kind)
            .map_err(|e| hc_core::Error::Configuration {
                action: "enable",
                scope: scope.clone(),
                kind,
                reason: e.to_string(),
            })?;
        let path = binding
            .settings
            .as_ref()
            .and_then(|s| s.resolved_executable(&self.shared_home()))
            .unwrap();

        let removes = Self::behavior(state).is_some_and(|b| b.removes_scripts);
        let dir = self.wrapper_dir();
        fs::create_dir_all(&dir).unwrap();
        if let Some(previous) = state.wrappers.get(&(scope.clone(), kind)) {
            if removes {
                let _ = fs::remove_file(dir.join(previous));
            }
        }
        state.next_wrapper += 1;
        let name = format!("{}.sh", state.next_wrapper);
        fs::write(dir.join(&name), wrapper_script(&path.to_string_lossy())).unwrap();
        state.wrappers.insert((scope.clone(), kind), name);
        Ok(())
    }

    fn disable_hook(&self, scope: &Scope, kind: HookKind) -> Result<()> {
        let mut guard = self.lock();
        let state = &mut *guard;
        Self::check_scope(state, "disable", scope, kind)?;
        state.bindings.disable(scope, kind);
        let removes = Self::behavior(state).is_some_and(|b| match scope {
            Scope::Project { .. } => b.removes_project_scripts,
            _ => b.removes_scripts,
        });
        if removes {
            if let Some(name) = state.wrappers.remove(&(scope.clone(), kind)) {
                let _ = fs::remove_file(self.wrapper_dir().join(name));
            }
        }
        Ok(())
    }
}

impl AddonDeployer for FakeServer {
    fn install(&self, addon: &Addon) -> Result<()> {
        let mut state = self.lock();
        if state.fail_installs {
            return Err(Error::environment(format!(
                "add-on {} was not enabled after 1 checks",
                addon.version
            )));
        }
        state.installs.push(addon.version.clone());
        state.build = Some(addon.clone());
        Ok(())
    }
}

impl GitClient for FakeServer {
    fn clone_repository(&self, repository: &Repository) -> Result<Box<dyn Checkout>> {
        Ok(Box::new(FakeCheckout {
            state: Arc::clone(&self.state),
            shared_home: self.shared_home(),
            repository: repository.reference(),
            branch: "master".into(),
            next: 0,
        }))
    }
}

struct FakeCheckout {
    state: Arc<Mutex<State>>,
    shared_home: PathBuf,
    repository: RepositoryRef,
    branch: String,
    next: u32,
}

impl Checkout for FakeCheckout {
    fn commit_random_file(&mut self) -> Result<String> {
        self.next += 1;
        Ok(format!("file{}", self.next))
    }

    fn create_random_branch(&mut self) -> Result<String> {
        self.next += 1;
        self.branch = format!("branch{}", self.next);
        Ok(self.branch.clone())
    }

    fn push(&mut self, branch: Option<&str>) -> Result<PushResult> {
        let branch = branch.unwrap_or(&self.branch).to_string();
        let state = self.state.lock().unwrap();
        let mut output = String::new();
        let behavior = FakeServer::behavior(&state);

        if let Some(behavior) = behavior {
            let pre = resolve(
                &state.bindings,
                &self.repository,
                HookKind::PreReceive,
                behavior.rules,
            );
            if let Some((code, lines)) = execute(&self.shared_home, &pre) {
                for line in &lines {
                    output.push_str(&format!("remote: {line}\n"));
                }
                if code != 0 {
                    output.push_str(&format!(
                        " ! [remote rejected] {branch} -> {branch} (pre-receive hook declined)\n"
                    ));
                    return Ok(PushResult {
                        accepted: false,
                        output,
                    });
                }
            }
        }

        output.push_str(&format!("   abc..def  {branch} -> {branch}\n"));
        if let Some(behavior) = behavior {
            let post = resolve(
                &state.bindings,
                &self.repository,
                HookKind::PostReceive,
                behavior.rules,
            );
            if let Some((_, lines)) = execute(&self.shared_home, &post) {
                for line in &lines {
                    output.push_str(&format!("remote: {line}\n"));
                }
            }
        }
        Ok(PushResult {
            accepted: true,
            output,
        })
    }
}
