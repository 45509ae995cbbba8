// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    idle    = { TestStatus::Idle,    false, "idle" },
    queued  = { TestStatus::Queued,  true,  "queued" },
    running = { TestStatus::Running, true,  "running" },
    passed  = { TestStatus::Passed,  false, "passed" },
    failed  = { TestStatus::Failed,  false, "failed" },
)]
fn classification(status: TestStatus, active: bool, display: &str) {
    assert_eq!(status.is_active(), active);
    assert_eq!(status.to_string(), display);
}

#[test]
fn order_follows_lifecycle() {
    assert!(TestStatus::Idle < TestStatus::Queued);
    assert!(TestStatus::Queued < TestStatus::Running);
    assert!(TestStatus::Running < TestStatus::Passed);
    assert!(TestStatus::Passed < TestStatus::Failed);
}

#[test]
fn serde_uses_snake_case() {
    assert_eq!(serde_json::to_string(&TestStatus::Running).unwrap(), "\"running\"");
}
