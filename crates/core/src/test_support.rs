// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{TestDescriptor, TestList};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for core types.
pub mod strategies {
    use proptest::prelude::*;

    /// Go-style test names: `Test` followed by a short mixed-case word.
    pub fn arb_test_name() -> impl Strategy<Value = String> {
        "[A-Za-z][A-Za-z0-9]{0,7}".prop_map(|s| format!("Test{s}"))
    }
}

// ── Fixtures ────────────────────────────────────────────────────────────

/// A root-package descriptor for `name`.
pub fn descriptor(name: &str) -> TestDescriptor {
    TestDescriptor::builder().name(name).file(format!("{}_test.go", name.to_lowercase())).build()
}

/// A list of idle records, one per name, in the given order.
pub fn test_list(names: &[&str]) -> TestList {
    TestList::from_descriptors(names.iter().map(|n| descriptor(n)))
}
