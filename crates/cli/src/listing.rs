// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `--list`: print discovered tests without starting the UI.

use std::path::Path;

use trun_core::TestDescriptor;

/// One test per line, `pkg/TestName  file:line`, with files relative to
/// `root` where possible.
pub fn render_text(tests: &[TestDescriptor], root: &Path) -> String {
    let width = tests.iter().map(|t| t.to_string().len()).max().unwrap_or(0);
    tests
        .iter()
        .map(|t| {
            let file = t.file.strip_prefix(root).unwrap_or(&t.file);
            format!("{:<width$}  {}:{}\n", t.to_string(), file.display(), t.line)
        })
        .collect()
}

pub fn render_json(tests: &[TestDescriptor]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(tests)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn tests(root: &Path) -> Vec<TestDescriptor> {
        vec![
            TestDescriptor::new("TestQuickPass", "", root.join("quick_test.go"), 12),
            TestDescriptor::new("TestDeep", "nested/pkg", root.join("nested/pkg/deep_test.go"), 3),
        ]
    }

    #[test]
    fn text_aligns_names_and_relativizes_files() {
        let root = PathBuf::from("/work/project");
        let text = render_text(&tests(&root), &root);
        assert_eq!(
            text,
            "TestQuickPass        quick_test.go:12\n\
             nested/pkg/TestDeep  nested/pkg/deep_test.go:3\n"
        );
    }

    #[test]
    fn text_of_nothing_is_empty() {
        assert_eq!(render_text(&[], Path::new("/")), "");
    }

    #[test]
    fn json_round_trips_descriptors() {
        let root = PathBuf::from("/work/project");
        let json = render_json(&tests(&root)).unwrap();
        let parsed: Vec<TestDescriptor> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tests(&root));
        assert!(json.contains("\"package\": \"nested/pkg\""));
    }
}
