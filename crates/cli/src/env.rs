// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

/// Output refresh period when `TRUN_TICK_MS` is unset or invalid
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// Filter directives when `TRUN_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Log directory override, used when `--log-dir` is absent.
pub fn log_dir() -> Option<PathBuf> {
    std::env::var_os("TRUN_LOG_DIR").filter(|s| !s.is_empty()).map(PathBuf::from)
}

/// `tracing` filter directives for the diagnostic log.
pub fn log_filter() -> String {
    std::env::var("TRUN_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Output refresh period (`TRUN_TICK_MS`, minimum 10ms).
pub fn tick() -> Duration {
    std::env::var("TRUN_TICK_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(|ms| Duration::from_millis(ms.max(10)))
        .unwrap_or(DEFAULT_TICK)
}

/// Preferred editor
pub fn editor() -> Option<String> {
    std::env::var("EDITOR").ok().filter(|e| !e.trim().is_empty())
}

/// Executable search path for editor lookup
pub fn search_path() -> Option<OsString> {
    std::env::var_os("PATH")
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
