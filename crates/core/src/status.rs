// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle status of a test record.
//!
//! ```text
//! Idle --enqueue--> Queued --admit--> Running --pass--> Passed
//! Queued --stop--> Idle               Running --fail/cancel--> Failed
//! Passed | Failed --enqueue--> Queued
//! ```
//!
//! Queue membership is the `Queued` status itself; there is no separate queue.

use serde::{Deserialize, Serialize};

/// Status of a test record. Variant order is the status sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    #[default]
    Idle,
    Queued,
    Running,
    Passed,
    Failed,
}

impl TestStatus {
    /// Queued or running: a new enqueue is a no-op.
    pub fn is_active(self) -> bool {
        matches!(self, TestStatus::Queued | TestStatus::Running)
    }
}

crate::simple_display! {
    TestStatus {
        Idle => "idle",
        Queued => "queued",
        Running => "running",
        Passed => "passed",
        Failed => "failed",
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
