// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded-concurrency test scheduler.
//!
//! There is no queue structure: a test is queued when its record says
//! `Queued`, and admission scans the shared [`TestList`] in its current
//! order. Reordering the list therefore reprioritizes queued tests.
//!
//! Lock order is scheduler state -> list -> record. A record lock is never
//! held while calling into the scheduler, and the scheduler lock is only
//! held across one admission scan.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use trun_adapters::TestBackend;
use trun_core::{Clock, TestList, TestRecord, TestStatus};

use crate::log_sink::LogSink;

/// Collaborators the scheduler needs to launch runs.
pub struct SchedulerDeps<B, C> {
    pub backend: B,
    pub clock: C,
    pub sink: LogSink,
    /// Runtime that hosts execution tasks
    pub runtime: Handle,
}

#[derive(Debug)]
struct SchedulerState {
    /// Admission ceiling, always >= 1
    max_parallel: usize,
    /// Runs launched by this scheduler that have not completed
    running: usize,
}

struct Inner<B, C> {
    backend: B,
    clock: C,
    sink: LogSink,
    runtime: Handle,
    list: TestList,
    state: Mutex<SchedulerState>,
    /// Bumped on every admission and completion
    changes: watch::Sender<u64>,
}

/// Decides which queued tests run, and runs them.
///
/// Cheap to clone; clones share all state.
pub struct Scheduler<B, C> {
    inner: Arc<Inner<B, C>>,
}

impl<B, C> Clone for Scheduler<B, C> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<B: TestBackend, C: Clock> Scheduler<B, C> {
    pub fn new(list: TestList, deps: SchedulerDeps<B, C>, max_parallel: usize) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                backend: deps.backend,
                clock: deps.clock,
                sink: deps.sink,
                runtime: deps.runtime,
                list,
                state: Mutex::new(SchedulerState { max_parallel: max_parallel.max(1), running: 0 }),
                changes,
            }),
        }
    }

    /// The shared list admission scans.
    pub fn list(&self) -> &TestList {
        &self.inner.list
    }

    pub fn sink(&self) -> &LogSink {
        &self.inner.sink
    }

    pub fn clock(&self) -> &C {
        &self.inner.clock
    }

    /// Queue a test and admit whatever now fits.
    ///
    /// Returns false without changing anything when the test is already
    /// queued or running, so a test never has two runs in flight.
    pub fn enqueue(&self, record: &Arc<TestRecord>) -> bool {
        let target = self.inner.sink.target_for(record.descriptor(), self.inner.clock.wall());
        if !record.mark_queued(self.inner.clock.now(), target) {
            return false;
        }
        tracing::debug!(test = %record.descriptor(), "queued");
        self.try_admit_next();
        true
    }

    /// Dequeue a queued test, or signal a running one to cancel.
    ///
    /// A cancelled run records its own terminal status when it unwinds.
    pub fn stop(&self, record: &Arc<TestRecord>) -> bool {
        if record.unqueue() {
            tracing::debug!(test = %record.descriptor(), "dequeued");
            self.notify();
            return true;
        }
        match record.cancel_handle() {
            Some(token) => {
                tracing::info!(test = %record.descriptor(), "cancelling run");
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Change the ceiling. Raising it admits immediately; lowering it
    /// never preempts running tests.
    pub fn set_max_parallel(&self, n: usize) {
        {
            let mut state = self.inner.state.lock();
            state.max_parallel = n.max(1);
            tracing::info!(max_parallel = state.max_parallel, running = state.running, "ceiling changed");
        }
        self.try_admit_next();
    }

    pub fn max_parallel(&self) -> usize {
        self.inner.state.lock().max_parallel
    }

    pub fn running_count(&self) -> usize {
        self.inner.state.lock().running
    }

    /// Number of records in the list whose status is `Queued`.
    pub fn queued_count(&self) -> usize {
        self.inner.list.count(|r| r.status() == TestStatus::Queued)
    }

    /// Receiver that changes on every admission, dequeue, and completion.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.changes.subscribe()
    }

    /// Admit queued tests, first in list order, while under the ceiling.
    pub fn try_admit_next(&self) {
        let mut admitted = Vec::new();
        {
            let mut state = self.inner.state.lock();
            while state.running < state.max_parallel {
                let now = self.inner.clock.now();
                let next = self
                    .inner
                    .list
                    .find_map(|rec| rec.admit(now).map(|token| (Arc::clone(rec), token)));
                let Some(run) = next else { break };
                state.running += 1;
                admitted.push(run);
            }
        }
        if admitted.is_empty() {
            return;
        }
        for (record, token) in admitted {
            tracing::info!(test = %record.descriptor(), "admitted");
            self.launch(record, token);
        }
        self.notify();
    }

    fn launch(&self, record: Arc<TestRecord>, token: CancellationToken) {
        let scheduler = self.clone();
        self.inner.runtime.spawn(async move {
            let passed = scheduler.execute(&record, token).await;
            scheduler.complete(&record, passed);
        });
    }

    /// Run one admitted test to completion. Returns whether it passed.
    async fn execute(&self, record: &TestRecord, token: CancellationToken) -> bool {
        let test = record.descriptor().clone();
        let Some(target) = record.log_target() else {
            tracing::warn!(test = %test, "admitted without a log target");
            return false;
        };
        let log = match self.inner.sink.create(&target) {
            Ok(log) => log,
            Err(e) => {
                tracing::warn!(test = %test, error = %e, "cannot create run log");
                return false;
            }
        };

        // Run on its own task so a panicking backend still completes the record.
        let backend = self.inner.backend.clone();
        let run_token = token.clone();
        let run_test = test.clone();
        let run = self
            .inner
            .runtime
            .spawn(async move { backend.run(&run_test, run_token, log).await });

        match run.await {
            Ok(Ok(())) if token.is_cancelled() => {
                tracing::info!(test = %test, "run cancelled");
                false
            }
            Ok(Ok(())) => {
                tracing::info!(test = %test, "passed");
                true
            }
            Ok(Err(e)) => {
                tracing::info!(test = %test, error = %e, "failed");
                false
            }
            Err(e) => {
                tracing::warn!(test = %test, error = %e, "run task aborted");
                false
            }
        }
    }

    /// Record the verdict, release the slot, and admit the next test.
    fn complete(&self, record: &TestRecord, passed: bool) {
        record.finish(passed, self.inner.clock.now());
        {
            let mut state = self.inner.state.lock();
            state.running = state.running.saturating_sub(1);
        }
        self.notify();
        self.try_admit_next();
    }

    fn notify(&self) {
        self.inner.changes.send_modify(|n| *n = n.wrapping_add(1));
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
