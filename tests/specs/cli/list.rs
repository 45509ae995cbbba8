// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `trun --list` prints discovered tests and exits without a terminal.

use crate::prelude::*;

#[test]
fn list_prints_root_and_nested_tests() {
    let project = Project::with_tests();
    project
        .trun()
        .args(&["--list"])
        .passes()
        .stdout_has("TestQuickPass")
        .stdout_has("TestQuickFail")
        .stdout_has("nested/pkg/TestDeep")
        .stdout_has("quick_test.go:5")
        .stdout_lacks("helper");
}

#[test]
fn list_accepts_an_explicit_directory() {
    let project = Project::with_tests();
    cli().arg(project.path()).args(&["--list"]).passes().stdout_has("TestQuickPass");
}

#[test]
fn no_recursive_skips_nested_packages() {
    let project = Project::with_tests();
    project
        .trun()
        .args(&["--list", "--no-recursive"])
        .passes()
        .stdout_has("TestQuickPass")
        .stdout_lacks("TestDeep");
}

#[test]
fn list_json_has_descriptor_fields() {
    let project = Project::with_tests();
    let run = project.trun().args(&["--list", "--json"]).passes();
    let json = run.json();
    let tests = json.as_array().unwrap();
    assert_eq!(tests.len(), 3);

    let deep = tests.iter().find(|t| t["name"] == "TestDeep").unwrap();
    assert_eq!(deep["package"], "nested/pkg");
    assert_eq!(deep["line"], 5);
    assert!(deep["file"].as_str().unwrap().ends_with("deep_test.go"));
}

#[test]
fn empty_project_lists_nothing() {
    let project = Project::empty();
    let run = project.trun().args(&["--list", "--json"]).passes();
    assert_eq!(run.json(), Value::Array(vec![]));
}

#[test]
fn vendor_and_hidden_directories_are_skipped() {
    let project = Project::with_tests();
    project.file("vendor/dep/dep_test.go", "package dep\n\nimport \"testing\"\n\nfunc TestVendored(t *testing.T) {}\n");
    project.file(".cache/x_test.go", "package x\n\nimport \"testing\"\n\nfunc TestHidden(t *testing.T) {}\n");
    project
        .trun()
        .args(&["--list"])
        .passes()
        .stdout_lacks("TestVendored")
        .stdout_lacks("TestHidden");
}
