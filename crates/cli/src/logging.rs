// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic logging to a file in the log directory.
//!
//! The terminal belongs to the UI, so nothing is written to stdout or
//! stderr once the session starts.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::env;

/// File name of the diagnostic log inside the log directory
pub const LOG_FILE: &str = "trun.log";

pub fn log_file(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE)
}

/// Filter from `TRUN_LOG`, falling back to the default on bad directives.
pub fn filter() -> EnvFilter {
    EnvFilter::try_new(env::log_filter()).unwrap_or_else(|_| EnvFilter::new(env::DEFAULT_LOG_FILTER))
}

/// Install the global subscriber. Keep the guard alive until exit so
/// buffered lines are flushed.
pub fn init(log_dir: &Path) -> anyhow::Result<WorkerGuard> {
    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("cannot install log subscriber: {e}"))?;
    Ok(guard)
}
