// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process execution backend: run one test, streaming output to its log.

use std::collections::HashSet;
use std::fs::File;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use thiserror::Error;
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;
use trun_core::TestDescriptor;

/// Errors from a test run. Every variant maps to a failed test.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to start: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("failed waiting for exit: {0}")]
    Wait(#[source] std::io::Error),
    #[error("exited with {}", exit_label(.code))]
    Failed { code: Option<i32> },
    #[error("cancelled")]
    Cancelled,
    #[error("timed out after {0:?}")]
    TimedOut(Duration),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

/// Runs a single test to completion.
///
/// Implementations write output to `log` as it is produced and must return
/// promptly once `cancel` fires.
#[async_trait]
pub trait TestBackend: Clone + Send + Sync + 'static {
    async fn run(
        &self,
        test: &TestDescriptor,
        cancel: CancellationToken,
        log: File,
    ) -> Result<(), RunError>;
}

/// Runs tests with `go test -v -run ^<name>$ <pkg>` from the discovery root.
///
/// Clones share the set of live process groups, so any clone can kill every
/// run still in flight.
#[derive(Clone, Debug)]
pub struct GoTestBackend {
    root: PathBuf,
    go: PathBuf,
    timeout: Option<Duration>,
    groups: Arc<Mutex<HashSet<u32>>>,
}

/// Membership of one run's process group in the live set, for the
/// lifetime of the run.
struct LiveGroup {
    groups: Arc<Mutex<HashSet<u32>>>,
    pid: Option<u32>,
}

impl LiveGroup {
    fn join(groups: &Arc<Mutex<HashSet<u32>>>, pid: Option<u32>) -> Self {
        if let Some(pid) = pid {
            groups.lock().insert(pid);
        }
        Self { groups: Arc::clone(groups), pid }
    }
}

impl Drop for LiveGroup {
    fn drop(&mut self) {
        if let Some(pid) = self.pid {
            self.groups.lock().remove(&pid);
        }
    }
}

enum Ending {
    Exited(std::io::Result<ExitStatus>),
    Cancelled,
    TimedOut(Duration),
}

impl GoTestBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            go: PathBuf::from("go"),
            timeout: None,
            groups: Arc::default(),
        }
    }

    /// Kill runs that exceed `timeout`. `None` or zero disables the ceiling.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout.filter(|t| !t.is_zero());
        self
    }

    /// Use a different `go` executable.
    pub fn with_program(mut self, go: impl Into<PathBuf>) -> Self {
        self.go = go.into();
        self
    }

    /// Kill the process group of every run still in flight. Returns how
    /// many groups were signalled.
    ///
    /// Dropping a run only kills `go` itself; the test binary it forked
    /// lives in the same group and survives unless the group is killed.
    pub fn kill_running(&self) -> usize {
        let pids: Vec<u32> = self.groups.lock().iter().copied().collect();
        pids.into_iter().filter(|&pid| kill_group(pid)).count()
    }

    fn command(&self, test: &TestDescriptor, log: File) -> Result<Command, RunError> {
        let stderr = log.try_clone().map_err(RunError::Spawn)?;
        let mut cmd = Command::new(&self.go);
        cmd.arg("test")
            .arg("-v")
            .arg("-run")
            .arg(format!("^{}$", test.name))
            .arg(test.package_arg())
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log))
            .stderr(Stdio::from(stderr))
            .kill_on_drop(true);
        // `go test` forks the compiled test binary; a fresh group lets
        // cancellation reach both.
        #[cfg(unix)]
        cmd.process_group(0);
        Ok(cmd)
    }
}

#[async_trait]
impl TestBackend for GoTestBackend {
    async fn run(
        &self,
        test: &TestDescriptor,
        cancel: CancellationToken,
        log: File,
    ) -> Result<(), RunError> {
        let mut child = self.command(test, log)?.spawn().map_err(RunError::Spawn)?;
        tracing::debug!(test = %test, pid = child.id(), "spawned go test");
        let _group = LiveGroup::join(&self.groups, child.id());

        let timeout = self.timeout;
        let deadline = async move {
            match timeout {
                Some(t) => {
                    tokio::time::sleep(t).await;
                    t
                }
                None => std::future::pending().await,
            }
        };

        let ending = tokio::select! {
            status = child.wait() => Ending::Exited(status),
            _ = cancel.cancelled() => Ending::Cancelled,
            t = deadline => Ending::TimedOut(t),
        };

        match ending {
            Ending::Exited(status) => {
                let status = status.map_err(RunError::Wait)?;
                if status.success() {
                    Ok(())
                } else {
                    Err(RunError::Failed { code: status.code() })
                }
            }
            Ending::Cancelled => {
                terminate(&mut child).await;
                Err(RunError::Cancelled)
            }
            Ending::TimedOut(t) => {
                terminate(&mut child).await;
                Err(RunError::TimedOut(t))
            }
        }
    }
}

/// SIGKILL the process group led by `pid`. False when the group is gone
/// or the platform has no process groups.
fn kill_group(pid: u32) -> bool {
    #[cfg(unix)]
    {
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;
        let Ok(raw) = i32::try_from(pid) else {
            return false;
        };
        match killpg(Pid::from_raw(raw), Signal::SIGKILL) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(pid, error = %e, "killpg failed");
                false
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = pid;
        false
    }
}

/// Kill the child's process group (or the child alone off unix) and reap it.
async fn terminate(child: &mut Child) {
    if let Some(pid) = child.id() {
        kill_group(pid);
    }
    if let Err(e) = child.kill().await {
        tracing::debug!(error = %e, "kill after cancellation failed");
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{RunError, TestBackend};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Arc;
    use tokio::sync::{oneshot, Notify};
    use tokio_util::sync::CancellationToken;
    use trun_core::TestDescriptor;

    #[derive(Default)]
    struct FakeBackendState {
        /// Runs in flight by qualified name (`pkg/TestName`), waiting for
        /// the test to decide their outcome
        pending: HashMap<String, oneshot::Sender<Result<(), RunError>>>,
        /// Qualified name of every run ever started, in start order
        started: Vec<String>,
        finished: Vec<String>,
    }

    /// Backend whose runs block until the test resolves them.
    ///
    /// Each run writes a `=== RUN <name>` line to its log, then waits for
    /// [`FakeBackend::pass`], [`FakeBackend::fail`] or cancellation.
    #[derive(Clone, Default)]
    pub struct FakeBackend {
        inner: Arc<Mutex<FakeBackendState>>,
        changed: Arc<Notify>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Names of runs started so far, in order
        pub fn started(&self) -> Vec<String> {
            self.inner.lock().started.clone()
        }

        /// Names of runs that have returned, in order
        pub fn finished(&self) -> Vec<String> {
            self.inner.lock().finished.clone()
        }

        /// Names of runs currently blocked
        pub fn in_flight(&self) -> Vec<String> {
            let mut names: Vec<_> = self.inner.lock().pending.keys().cloned().collect();
            names.sort();
            names
        }

        pub fn pass(&self, name: &str) -> bool {
            self.resolve(name, Ok(()))
        }

        pub fn fail(&self, name: &str) -> bool {
            self.resolve(name, Err(RunError::Failed { code: Some(1) }))
        }

        fn resolve(&self, name: &str, outcome: Result<(), RunError>) -> bool {
            let sender = self.inner.lock().pending.remove(name);
            sender.is_some_and(|tx| tx.send(outcome).is_ok())
        }

        /// Wait until at least `n` runs have started.
        pub async fn wait_started(&self, n: usize) {
            self.wait_until(|s| s.started.len() >= n).await
        }

        /// Wait until at least `n` runs have returned.
        pub async fn wait_finished(&self, n: usize) {
            self.wait_until(|s| s.finished.len() >= n).await
        }

        async fn wait_until(&self, done: impl Fn(&FakeBackendState) -> bool) {
            loop {
                let notified = self.changed.notified();
                if done(&self.inner.lock()) {
                    return;
                }
                notified.await;
            }
        }
    }

    #[async_trait]
    impl TestBackend for FakeBackend {
        async fn run(
            &self,
            test: &TestDescriptor,
            cancel: CancellationToken,
            mut log: File,
        ) -> Result<(), RunError> {
            let _ = writeln!(log, "=== RUN   {}", test.name);
            let key = test.to_string();
            let (tx, rx) = oneshot::channel();
            {
                let mut state = self.inner.lock();
                state.pending.insert(key.clone(), tx);
                state.started.push(key.clone());
            }
            self.changed.notify_waiters();

            let outcome = tokio::select! {
                outcome = rx => outcome.unwrap_or(Err(RunError::Cancelled)),
                _ = cancel.cancelled() => Err(RunError::Cancelled),
            };
            let verdict = if outcome.is_ok() { "PASS" } else { "FAIL" };
            let _ = writeln!(log, "--- {}: {}", verdict, test.name);

            {
                let mut state = self.inner.lock();
                state.pending.remove(&key);
                state.finished.push(key);
            }
            self.changed.notify_waiters();
            outcome
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeBackend;

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
