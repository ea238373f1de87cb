// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Short pronounceable identifiers for naming fixtures.
//!
//! Identifiers alternate lojban consonants and vowels so project keys,
//! repository slugs and branch names stay readable in server logs.

use chrono::Utc;
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};

const CONSONANTS: &[u8] = b"bcdfgjklmnprstvxz";
const VOWELS: &[u8] = b"aeiou";

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate an identifier of `len` characters from a seed.
pub fn id_from_seed(seed: &[u8], len: usize) -> String {
    let mut out = String::with_capacity(len);
    let mut block: u32 = 0;
    while out.len() < len {
        let mut hasher = Sha256::new();
        hasher.update(seed);
        hasher.update(block.to_le_bytes());
        for byte in hasher.finalize() {
            if out.len() == len {
                break;
            }
            let alphabet = if out.len() % 2 == 0 { CONSONANTS } else { VOWELS };
            out.push(char::from(alphabet[usize::from(byte) % alphabet.len()]));
        }
        block += 1;
    }
    out
}

/// Generate a fresh lowercase identifier of `len` characters.
pub fn random_id(len: usize) -> String {
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);
    let seed = format!(
        "{}:{}:{}",
        std::process::id(),
        Utc::now().timestamp_nanos_opt().unwrap_or_default(),
        count
    );
    id_from_seed(seed.as_bytes(), len)
}

/// Generate a fresh project key of `len` characters (uppercase).
pub fn random_key(len: usize) -> String {
    random_id(len).to_ascii_uppercase()
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
