//! One-Time Registration Guard
//!
//! Embedders register canvas shapes and interaction components with their
//! rendering library during visualization setup, and that setup runs once
//! per process no matter how many editor views open. This module provides
//! the shared guard: a process-wide set of registration keys with an
//! idempotent check-and-insert.
//!
//! The guard lives here, not in any embedder, so every view in the process
//! shares one set.

use std::collections::HashSet;
use std::sync::OnceLock;

use parking_lot::RwLock;
use tracing::debug;

// Process-wide set of completed registrations.
static REGISTERED: OnceLock<RwLock<HashSet<String>>> = OnceLock::new();

fn registered() -> &'static RwLock<HashSet<String>> {
    REGISTERED.get_or_init(|| RwLock::new(HashSet::new()))
}

/// Claim a registration key. Returns true exactly once per key per
/// process; callers skip their setup work on false.
pub fn register_once(key: &str) -> bool {
    let mut set = registered().write();
    let newly = set.insert(key.to_string());
    if newly {
        debug!("registered {key}");
    }
    newly
}

/// Whether a key has been claimed.
pub fn is_registered(key: &str) -> bool {
    registered().read().contains(key)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
