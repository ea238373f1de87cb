// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! hc-core: hook scope model for the external hooks verification harness
//!
//! This crate provides the pure data model used by the hookcheck CLI: hook
//! kinds and scopes, bindings and their resolution, installed script
//! snapshots, the leak detector and REPRODUCE→FIX phase sequencing.

pub mod addon;
pub mod binding;
pub mod error;
pub mod kind;
pub mod leak;
pub mod phase;
pub mod resolve;
pub mod scope;
pub mod settings;
pub mod snapshot;

pub use addon::{Addon, AddonInstallation, AddonPair};
pub use binding::{BindingSet, BindingState, HookBinding, RepositoryRecord};
pub use error::{Error, ErrorCategory, Result};
pub use kind::{HookKind, PLUGIN_KEY};
pub use leak::{LeakDetector, LeakReport};
pub use phase::{Phase, PhaseContext, PhaseTracker};
pub use resolve::{resolve, InheritanceRule, OverrideRule, Resolution, ResolutionRules};
pub use scope::{RepositoryRef, Scope};
pub use settings::HookSettings;
pub use snapshot::{ScriptEntry, ScriptSnapshot};
