// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type that carries a process exit code.
//!
//! Startup returns `ExitError` for conditions that end the process before
//! the terminal UI starts, letting `main()` pick the exit status.

use std::fmt;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// Exit status 1: nothing can be listed or logged.
    pub fn fatal(message: impl Into<String>) -> Self {
        Self::new(1, message)
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

/// Exit status for an error returned from startup.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<ExitError>().map_or(1, |e| e.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_comes_from_exit_error() {
        let err = anyhow::Error::new(ExitError::new(3, "boom"));
        assert_eq!(exit_code(&err), 3);
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn other_errors_exit_with_one() {
        let err = anyhow::anyhow!("plain");
        assert_eq!(exit_code(&err), 1);
        assert_eq!(exit_code(&anyhow::Error::new(ExitError::fatal("x"))), 1);
    }
}
