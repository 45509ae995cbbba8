// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable per-run output storage.
//!
//! One file per run, named by test key and enqueue stamp (see [`log_paths`]).
//! Files are never deleted or truncated here; re-running a test creates a
//! new file and leaves older runs on disk for replay.
//!
//! [`log_paths`]: crate::log_paths

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::NaiveDateTime;
use trun_core::TestDescriptor;
use thiserror::Error;

use crate::log_paths;

/// Errors from log storage
#[derive(Debug, Error)]
pub enum LogSinkError {
    #[error("cannot create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot create log file {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read log file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A stored run log and its last modification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Directory of run logs
#[derive(Debug, Clone)]
pub struct LogSink {
    dir: PathBuf,
}

impl LogSink {
    /// Use `dir` as-is, without touching the filesystem.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Use `dir`, creating it if missing.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, LogSinkError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|source| LogSinkError::CreateDir { path: dir.clone(), source })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path for a new run of `test` stamped `stamp`.
    ///
    /// A run in the same second as an earlier one gets the next free
    /// `-<n>` suffix instead of reusing its name.
    pub fn target_for(&self, test: &TestDescriptor, stamp: NaiveDateTime) -> PathBuf {
        let key = log_paths::test_key(test);
        let mut seq = 0;
        loop {
            let path = log_paths::run_log_path(&self.dir, &key, stamp, seq);
            if !path.exists() {
                return path;
            }
            seq += 1;
        }
    }

    /// Create a run log for writing. Fails rather than truncating a file
    /// that already exists.
    pub fn create(&self, path: &Path) -> Result<File, LogSinkError> {
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|source| LogSinkError::Create { path: path.to_path_buf(), source })
    }

    /// Most recently modified run log of `test_name`, if any exists.
    ///
    /// Ties on modification time resolve to whichever the glob yields first.
    pub fn most_recent(&self, test: &TestDescriptor) -> Option<LogEntry> {
        let key = log_paths::test_key(test);
        let pattern = log_paths::run_log_glob(&self.dir, &key);
        let paths = match glob::glob(&pattern) {
            Ok(paths) => paths,
            Err(e) => {
                tracing::debug!(%pattern, error = %e, "invalid log glob");
                return None;
            }
        };
        paths
            .flatten()
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| log_paths::is_run_log_of(name, &key))
            })
            .filter_map(|path| {
                let modified = std::fs::metadata(&path).ok()?.modified().ok()?;
                Some(LogEntry { path, modified })
            })
            .fold(None, |best: Option<LogEntry>, entry| match best {
                Some(b) if b.modified >= entry.modified => Some(b),
                _ => Some(entry),
            })
    }

    /// Whole file as lines, with invalid UTF-8 replaced.
    pub fn read_lines(path: &Path) -> Result<Vec<String>, LogSinkError> {
        let bytes = std::fs::read(path)
            .map_err(|source| LogSinkError::Read { path: path.to_path_buf(), source })?;
        Ok(String::from_utf8_lossy(&bytes).lines().map(str::to_string).collect())
    }
}

#[cfg(test)]
#[path = "log_sink_tests.rs"]
mod tests;
