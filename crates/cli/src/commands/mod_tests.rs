// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use hc_core::BindingSet;
use tempfile::TempDir;

#[test]
fn test_read_json_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = read_json::<BindingSet>(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, Error::Config(ref msg) if msg.starts_with("cannot read")));
}

#[test]
fn test_read_json_invalid_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bindings.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = read_json::<BindingSet>(&path).unwrap_err();
    assert!(err.to_string().contains("invalid JSON"));
}

#[test]
fn test_read_json_empty_object_is_empty_set() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bindings.json");
    std::fs::write(&path, "{}").unwrap();
    assert!(read_json::<BindingSet>(&path).unwrap().is_empty());
}
