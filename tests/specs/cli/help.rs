// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help and version output.

use crate::prelude::*;

#[test]
fn help_shows_usage_and_flags() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("--parallel")
        .stdout_has("--log-dir")
        .stdout_has("--test-timeout")
        .stdout_has("--list");
}

#[test]
fn version_shows_package_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}

#[test]
fn json_without_list_is_a_usage_error() {
    cli().args(&["--json"]).fails().code_is(2);
}
