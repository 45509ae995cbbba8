// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! trun-adapters: the collaborators the scheduler and session talk to.
//!
//! - [`discovery`]: find Go test functions under a directory
//! - [`backend`]: run one test as a `go test` subprocess
//! - [`editor`]: open a test's source location in an editor
//!
//! Each concern is a trait with a real implementation and, behind the
//! `test-support` feature, a fake for other crates' tests.

pub mod backend;
pub mod discovery;
pub mod editor;

pub use backend::{GoTestBackend, RunError, TestBackend};
pub use discovery::{Discovery, DiscoveryError, GoDiscovery};
pub use editor::{EditorAdapter, EditorError, SystemEditor};

#[cfg(any(test, feature = "test-support"))]
pub use backend::FakeBackend;
#[cfg(any(test, feature = "test-support"))]
pub use discovery::FakeDiscovery;
#[cfg(any(test, feature = "test-support"))]
pub use editor::{EditorCall, FakeEditor};
