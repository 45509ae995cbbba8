// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! trun-engine: scheduling, run logs and the interactive session.

pub mod log_paths;
pub mod log_sink;
pub mod scheduler;
pub mod session;

pub use log_sink::{LogEntry, LogSink, LogSinkError};
pub use scheduler::{Scheduler, SchedulerDeps};
pub use session::{Focus, Intent, OutputSource, OutputView, Session, SessionDeps, SortMode, StatusLine};
