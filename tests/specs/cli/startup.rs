// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Startup failures exit before the terminal UI is set up.

use crate::prelude::*;

#[test]
fn missing_directory_exits_one() {
    let project = Project::empty();
    cli()
        .arg(project.path().join("nope"))
        .fails()
        .code_is(1)
        .stderr_has("cannot access directory");
}

#[test]
fn file_instead_of_directory_exits_one() {
    let project = Project::empty();
    let file = project.file("notes.txt", "hi");
    cli().arg(&file).args(&["--list"]).fails().code_is(1).stderr_has("is not a directory");
}

#[test]
fn bad_timeout_is_a_usage_error() {
    let project = Project::with_tests();
    project.trun().args(&["--test-timeout", "later", "--list"]).fails().code_is(2);
}

#[test]
fn unusable_log_dir_exits_one() {
    let project = Project::with_tests();
    let blocker = project.file("blocker", "not a dir");
    project
        .trun()
        .arg("--log-dir")
        .arg(blocker.join("logs"))
        .fails()
        .code_is(1);
}
