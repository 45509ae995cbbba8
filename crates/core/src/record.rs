// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mutable per-test state, guarded by its own lock.
//!
//! Every read goes through the lock, even for a single field, so a
//! status and its timestamps are always observed together. Transitions are
//! methods that check the current status and report whether they applied.

use crate::descriptor::TestDescriptor;
use crate::status::TestStatus;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Default)]
struct RecordState {
    status: TestStatus,
    selected: bool,
    log_target: Option<PathBuf>,
    queued_at: Option<Instant>,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
    /// Present iff `status == Running`
    cancel: Option<CancellationToken>,
}

/// Consistent point-in-time copy of a record's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSnapshot {
    pub status: TestStatus,
    pub selected: bool,
    pub log_target: Option<PathBuf>,
    pub queued_at: Option<Instant>,
    pub started_at: Option<Instant>,
    pub finished_at: Option<Instant>,
}

impl RecordSnapshot {
    /// Elapsed time relevant to the status: waiting while queued, running
    /// time while running, total run time once finished.
    pub fn duration(&self, now: Instant) -> Option<Duration> {
        match self.status {
            TestStatus::Idle => None,
            TestStatus::Queued => self.queued_at.map(|t| now.saturating_duration_since(t)),
            TestStatus::Running => self.started_at.map(|t| now.saturating_duration_since(t)),
            TestStatus::Passed | TestStatus::Failed => match (self.started_at, self.finished_at) {
                (Some(start), Some(end)) => Some(end.saturating_duration_since(start)),
                _ => None,
            },
        }
    }
}

/// A discovered test plus its execution state.
#[derive(Debug)]
pub struct TestRecord {
    descriptor: TestDescriptor,
    state: Mutex<RecordState>,
}

impl TestRecord {
    pub fn new(descriptor: TestDescriptor) -> Self {
        Self { descriptor, state: Mutex::new(RecordState::default()) }
    }

    pub fn descriptor(&self) -> &TestDescriptor {
        &self.descriptor
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn status(&self) -> TestStatus {
        self.state.lock().status
    }

    pub fn is_selected(&self) -> bool {
        self.state.lock().selected
    }

    pub fn set_selected(&self, selected: bool) {
        self.state.lock().selected = selected;
    }

    pub fn toggle_selected(&self) {
        let mut state = self.state.lock();
        state.selected = !state.selected;
    }

    /// Log file of the current session's most recent enqueue, if any.
    pub fn log_target(&self) -> Option<PathBuf> {
        self.state.lock().log_target.clone()
    }

    pub fn snapshot(&self) -> RecordSnapshot {
        let state = self.state.lock();
        RecordSnapshot {
            status: state.status,
            selected: state.selected,
            log_target: state.log_target.clone(),
            queued_at: state.queued_at,
            started_at: state.started_at,
            finished_at: state.finished_at,
        }
    }

    pub fn duration(&self, now: Instant) -> Option<Duration> {
        self.snapshot().duration(now)
    }

    /// Idle or terminal -> Queued. Returns false (and changes nothing) when
    /// the test is already queued or running.
    pub fn mark_queued(&self, at: Instant, log_target: PathBuf) -> bool {
        let mut state = self.state.lock();
        if state.status.is_active() {
            return false;
        }
        state.status = TestStatus::Queued;
        state.queued_at = Some(at);
        state.started_at = None;
        state.finished_at = None;
        state.log_target = Some(log_target);
        true
    }

    /// Queued -> Running. Installs and returns the run's cancellation token.
    pub fn admit(&self, at: Instant) -> Option<CancellationToken> {
        let mut state = self.state.lock();
        if state.status != TestStatus::Queued {
            return None;
        }
        let token = CancellationToken::new();
        state.status = TestStatus::Running;
        state.started_at = Some(at);
        state.cancel = Some(token.clone());
        Some(token)
    }

    /// Queued -> Idle, clearing the queued stamp and the pending log target.
    pub fn unqueue(&self) -> bool {
        let mut state = self.state.lock();
        if state.status != TestStatus::Queued {
            return false;
        }
        state.status = TestStatus::Idle;
        state.queued_at = None;
        state.log_target = None;
        true
    }

    /// Cancellation token of the in-flight run, if running.
    pub fn cancel_handle(&self) -> Option<CancellationToken> {
        self.state.lock().cancel.clone()
    }

    /// Running -> Passed/Failed. Clears the cancellation token.
    pub fn finish(&self, passed: bool, at: Instant) -> bool {
        let mut state = self.state.lock();
        if state.status != TestStatus::Running {
            return false;
        }
        state.status = if passed { TestStatus::Passed } else { TestStatus::Failed };
        state.finished_at = Some(at);
        state.cancel = None;
        true
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
