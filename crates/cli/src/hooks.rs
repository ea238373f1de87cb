// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Hook scripts the harness installs.

use hc_core::HookKind;

/// Mode hook scripts are written with on the shared volume.
pub const SCRIPT_MODE: u32 = 0o777;

/// A script to be written into the executables directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookScript {
    pub name: String,
    pub body: Vec<u8>,
}

impl HookScript {
    pub fn new(name: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        HookScript {
            name: name.into(),
            body: body.into(),
        }
    }

    /// Script that prints `message` and exits 1.
    ///
    /// The file name is the kind's sample name, prefixed with `namespace` so
    /// concurrent scenarios never share an executable.
    pub fn fail_with_message(kind: HookKind, namespace: &str, message: &str) -> Self {
        let name = if namespace.is_empty() {
            kind.sample_script_name().to_string()
        } else {
            format!("{}.{}", namespace, kind.sample_script_name())
        };
        HookScript::new(name, fail_with_message_body(message))
    }
}

/// `#!/bin/bash`, `echo <message>`, `exit 1`.
pub fn fail_with_message_body(message: &str) -> String {
    text(&["#!/bin/bash", &format!("echo {message}"), "exit 1"])
}

fn text(lines: &[&str]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
#[path = "hooks_tests.rs"]
mod tests;
