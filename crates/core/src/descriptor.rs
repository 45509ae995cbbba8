// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Immutable identity of a discovered test.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A runnable test as reported by discovery.
///
/// `name` is unique within a package; two tests with the same name in
/// different packages are distinct and compare unequal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TestDescriptor {
    /// Function name, e.g. `TestQuickPass`
    pub name: String,
    /// Package directory relative to the discovery root (empty for the root)
    pub package: String,
    /// Source file declaring the test
    pub file: PathBuf,
    /// 1-based line of the declaration
    pub line: u32,
}

impl TestDescriptor {
    pub fn new(
        name: impl Into<String>,
        package: impl Into<String>,
        file: impl Into<PathBuf>,
        line: u32,
    ) -> Self {
        Self { name: name.into(), package: package.into(), file: file.into(), line }
    }

    /// Package argument handed to `go test`: `./<package>` or `.` for the root.
    pub fn package_arg(&self) -> String {
        if self.package.is_empty() {
            ".".to_string()
        } else {
            format!("./{}", self.package)
        }
    }

    /// Name shown in lists: `Test` prefix trimmed, qualified by package.
    pub fn short_name(&self) -> String {
        let name = self.name.strip_prefix("Test").unwrap_or(&self.name);
        if self.package.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.package, name)
        }
    }
}

impl fmt::Display for TestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}/{}", self.package, self.name)
        }
    }
}

crate::builder! {
    pub struct TestDescriptorBuilder => TestDescriptor {
        into {
            name: String = "TestExample",
            package: String = "",
            file: PathBuf = "example_test.go",
        }
        set {
            line: u32 = 1,
        }
    }
}

#[cfg(test)]
#[path = "descriptor_tests.rs"]
mod tests;
