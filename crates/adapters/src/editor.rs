// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Open a source location in an external editor (fire-and-forget).

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;

/// Errors from editor launch
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("no editor found (set $EDITOR)")]
    NotFound,
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Adapter for opening files at a line
pub trait EditorAdapter: Clone + Send + Sync + 'static {
    /// Start the editor and return without waiting for it.
    fn open(&self, file: &Path, line: u32) -> Result<(), EditorError>;
}

/// How a known editor takes a line number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LineArg {
    /// `--goto file:line`
    Goto,
    /// `+line file`
    Plus,
}

/// Fallback editors, tried in order when `$EDITOR` is unset.
const CANDIDATES: &[(&str, LineArg)] = &[
    ("code", LineArg::Goto),
    ("cursor", LineArg::Goto),
    ("vim", LineArg::Plus),
    ("nvim", LineArg::Plus),
    ("nano", LineArg::Plus),
];

/// Launches `$EDITOR`, or the first known editor on `PATH`.
#[derive(Clone, Debug, Default)]
pub struct SystemEditor {
    editor: Option<String>,
    path: Option<OsString>,
}

impl SystemEditor {
    pub fn new(editor: Option<String>, path: Option<OsString>) -> Self {
        Self { editor, path }
    }

    /// Program and arguments for opening `file` at `line`.
    pub fn command_for(&self, file: &Path, line: u32) -> Result<(PathBuf, Vec<String>), EditorError> {
        let file_arg = file.display().to_string();
        if let Some(editor) = &self.editor {
            return Ok((PathBuf::from(editor), vec![format!("+{line}"), file_arg]));
        }
        for (name, style) in CANDIDATES {
            if let Some(program) = self.lookup(name) {
                let args = match style {
                    LineArg::Goto => vec!["--goto".to_string(), format!("{file_arg}:{line}")],
                    LineArg::Plus => vec![format!("+{line}"), file_arg],
                };
                return Ok((program, args));
            }
        }
        Err(EditorError::NotFound)
    }

    /// First executable `name` on the configured search path.
    fn lookup(&self, name: &str) -> Option<PathBuf> {
        let path = self.path.as_ref()?;
        which::which_in(name, Some(path), Path::new(".")).ok()
    }
}

impl EditorAdapter for SystemEditor {
    fn open(&self, file: &Path, line: u32) -> Result<(), EditorError> {
        let (program, args) = self.command_for(file, line)?;
        tracing::info!(program = %program.display(), file = %file.display(), line, "launching editor");
        Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(drop)
            .map_err(|source| EditorError::Spawn { program: program.display().to_string(), source })
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{EditorAdapter, EditorError};
    use parking_lot::Mutex;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    /// Recorded editor launch
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct EditorCall {
        pub file: PathBuf,
        pub line: u32,
    }

    #[derive(Default)]
    struct FakeEditorState {
        calls: Vec<EditorCall>,
        fail: bool,
    }

    /// Fake editor adapter for testing
    #[derive(Clone, Default)]
    pub struct FakeEditor {
        inner: Arc<Mutex<FakeEditorState>>,
    }

    impl FakeEditor {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<EditorCall> {
            self.inner.lock().calls.clone()
        }

        pub fn set_fail(&self, fail: bool) {
            self.inner.lock().fail = fail;
        }
    }

    impl EditorAdapter for FakeEditor {
        fn open(&self, file: &Path, line: u32) -> Result<(), EditorError> {
            let mut state = self.inner.lock();
            if state.fail {
                return Err(EditorError::NotFound);
            }
            state.calls.push(EditorCall { file: file.to_path_buf(), line });
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{EditorCall, FakeEditor};

#[cfg(test)]
#[path = "editor_tests.rs"]
mod tests;
