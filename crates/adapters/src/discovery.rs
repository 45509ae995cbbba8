// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Go test discovery.
//!
//! Walks a directory for `*_test.go` files and reports every top-level
//! `func TestXxx(t *testing.T)` declaration. The walk is sorted by file
//! name, so the result is deterministic for a fixed tree.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use trun_core::TestDescriptor;
use walkdir::WalkDir;

/// Errors from discovery
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Source of the test list
pub trait Discovery: Clone + Send + Sync + 'static {
    /// List the tests under `root`; sub-directories only when `recursive`.
    fn discover(&self, root: &Path, recursive: bool) -> Result<Vec<TestDescriptor>, DiscoveryError>;
}

/// `func TestName(t *testing.T)` at the start of a line. Methods and
/// helpers with other signatures do not match.
static TEST_FUNC: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^func\s+(Test[A-Za-z0-9_]*)\s*\(\s*[A-Za-z_][A-Za-z0-9_]*\s+\*\s*testing\.T\s*\)")
        .ok()
});

/// Discovery over Go sources on disk
#[derive(Clone, Copy, Debug, Default)]
pub struct GoDiscovery;

impl GoDiscovery {
    pub fn new() -> Self {
        Self
    }
}

impl Discovery for GoDiscovery {
    fn discover(&self, root: &Path, recursive: bool) -> Result<Vec<TestDescriptor>, DiscoveryError> {
        std::fs::read_dir(root)
            .map_err(|source| DiscoveryError::Unreadable { path: root.to_path_buf(), source })?;

        let max_depth = if recursive { usize::MAX } else { 1 };
        let walker = WalkDir::new(root)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e));

        let mut tests = Vec::new();
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() || !is_test_file(entry.path()) {
                continue;
            }
            let source = match std::fs::read_to_string(entry.path()) {
                Ok(source) => source,
                Err(e) => {
                    tracing::debug!(path = %entry.path().display(), error = %e, "skipping unreadable test file");
                    continue;
                }
            };
            let package = package_of(root, entry.path());
            tests.extend(
                scan_source(&source)
                    .into_iter()
                    .map(|(name, line)| TestDescriptor::new(name, package.clone(), entry.path(), line)),
            );
        }
        tracing::debug!(root = %root.display(), recursive, count = tests.len(), "discovered tests");
        Ok(tests)
    }
}

/// `vendor` and hidden directories are never descended into.
fn is_skipped_dir(entry: &walkdir::DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name == "vendor" || name.starts_with('.')
}

fn is_test_file(path: &Path) -> bool {
    path.file_name().and_then(|n| n.to_str()).is_some_and(|n| n.ends_with("_test.go"))
}

/// Package directory relative to the root; empty for the root itself.
fn package_of(root: &Path, file: &Path) -> String {
    let dir = file.parent().unwrap_or(root);
    match dir.strip_prefix(root) {
        Ok(rel) => rel.to_string_lossy().replace('\\', "/"),
        Err(_) => dir.to_string_lossy().into_owned(),
    }
}

/// Test functions declared in a Go source file, with 1-based lines.
pub fn scan_source(source: &str) -> Vec<(String, u32)> {
    let Some(pattern) = TEST_FUNC.as_ref() else {
        return Vec::new();
    };
    source
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let name = pattern.captures(line)?.get(1)?.as_str().to_string();
            Some((name, i as u32 + 1))
        })
        .collect()
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{Discovery, DiscoveryError};
    use parking_lot::Mutex;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use trun_core::TestDescriptor;

    #[derive(Default)]
    struct FakeDiscoveryState {
        recursive: Vec<TestDescriptor>,
        flat: Vec<TestDescriptor>,
        fail: bool,
        calls: Vec<(PathBuf, bool)>,
    }

    /// Fake discovery returning canned lists per recursion mode
    #[derive(Clone, Default)]
    pub struct FakeDiscovery {
        inner: Arc<Mutex<FakeDiscoveryState>>,
    }

    impl FakeDiscovery {
        /// The same list regardless of recursion
        pub fn new(tests: Vec<TestDescriptor>) -> Self {
            let fake = Self::default();
            fake.set_results(tests.clone(), tests);
            fake
        }

        pub fn set_results(&self, recursive: Vec<TestDescriptor>, flat: Vec<TestDescriptor>) {
            let mut state = self.inner.lock();
            state.recursive = recursive;
            state.flat = flat;
        }

        /// Make subsequent calls fail
        pub fn set_fail(&self, fail: bool) {
            self.inner.lock().fail = fail;
        }

        /// Recorded `(root, recursive)` arguments
        pub fn calls(&self) -> Vec<(PathBuf, bool)> {
            self.inner.lock().calls.clone()
        }
    }

    impl Discovery for FakeDiscovery {
        fn discover(
            &self,
            root: &Path,
            recursive: bool,
        ) -> Result<Vec<TestDescriptor>, DiscoveryError> {
            let mut state = self.inner.lock();
            state.calls.push((root.to_path_buf(), recursive));
            if state.fail {
                return Err(DiscoveryError::Unreadable {
                    path: root.to_path_buf(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "fake failure"),
                });
            }
            Ok(if recursive { state.recursive.clone() } else { state.flat.clone() })
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeDiscovery;

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
