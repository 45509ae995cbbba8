// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized path builders for run logs.
//!
//! Directory structure:
//! ```text
//! ~/.test-runner/<root-hash>/
//! ├── <test-key>.<YYYYmmdd-HHMMSS>.log
//! └── <test-key>.<YYYYmmdd-HHMMSS>-<n>.log   (later runs in the same second)
//! ```
//!
//! The test key is the package-qualified name with path separators
//! percent-escaped, so `TestNew` in `pkg/a` and in `pkg/b` never share a file.

use chrono::NaiveDateTime;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use trun_core::TestDescriptor;

/// Stamp format in run log names.
pub const LOG_STAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Per-user directory holding one log directory per discovery root.
pub const LOG_HOME_DIR: &str = ".test-runner";

/// File-name-safe key for a test: `pkg%2Fsub%2FTestName`, or the bare
/// name for tests in the root package.
pub fn test_key(test: &TestDescriptor) -> String {
    let mut key = String::new();
    for ch in test.to_string().chars() {
        match ch {
            '%' => key.push_str("%25"),
            '/' => key.push_str("%2F"),
            '\\' => key.push_str("%5C"),
            _ => key.push(ch),
        }
    }
    key
}

/// Build the path for one run's log: `<log_dir>/<key>.<stamp>.log`, or
/// `<key>.<stamp>-<seq>.log` when `seq` is non-zero.
pub fn run_log_path(log_dir: &Path, key: &str, stamp: NaiveDateTime, seq: u32) -> PathBuf {
    let stamp = stamp.format(LOG_STAMP_FORMAT);
    if seq == 0 {
        log_dir.join(format!("{key}.{stamp}.log"))
    } else {
        log_dir.join(format!("{key}.{stamp}-{seq}.log"))
    }
}

/// Glob over the run logs of `key` in `log_dir`.
///
/// The glob can over-match when another key extends this one with a dot;
/// filter its results with [`is_run_log_of`].
pub fn run_log_glob(log_dir: &Path, key: &str) -> String {
    let dir = glob::Pattern::escape(&log_dir.to_string_lossy());
    let key = glob::Pattern::escape(key);
    format!("{dir}/{key}.*.log")
}

/// Whether `file_name` is a run log of exactly `key`.
pub fn is_run_log_of(file_name: &str, key: &str) -> bool {
    file_name
        .strip_prefix(key)
        .and_then(|rest| rest.strip_prefix('.'))
        .and_then(|rest| rest.strip_suffix(".log"))
        .is_some_and(|stamp| !stamp.is_empty() && stamp.chars().all(|c| c.is_ascii_digit() || c == '-'))
}

/// Hex of the first 8 bytes of sha256 over the absolute root path.
pub fn root_hash(abs_root: &Path) -> String {
    let digest = Sha256::digest(abs_root.to_string_lossy().as_bytes());
    digest[..8].iter().map(|b| format!("{b:02x}")).collect()
}

/// Default log directory for a discovery root: `<home>/.test-runner/<hash>`.
///
/// `abs_root` must already be absolute so that every invocation against the
/// same root lands in the same directory.
pub fn default_log_dir(home: &Path, abs_root: &Path) -> PathBuf {
    home.join(LOG_HOME_DIR).join(root_hash(abs_root))
}

#[cfg(test)]
#[path = "log_paths_tests.rs"]
mod tests;
