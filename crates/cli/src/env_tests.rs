// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial]
fn log_dir_reads_override() {
    std::env::set_var("TRUN_LOG_DIR", "/tmp/trun-logs");
    assert_eq!(log_dir(), Some(PathBuf::from("/tmp/trun-logs")));
    std::env::set_var("TRUN_LOG_DIR", "");
    assert_eq!(log_dir(), None);
    std::env::remove_var("TRUN_LOG_DIR");
    assert_eq!(log_dir(), None);
}

#[test]
#[serial]
fn log_filter_defaults_to_info() {
    std::env::remove_var("TRUN_LOG");
    assert_eq!(log_filter(), "info");
    std::env::set_var("TRUN_LOG", "trun_engine=debug");
    assert_eq!(log_filter(), "trun_engine=debug");
    std::env::remove_var("TRUN_LOG");
}

#[test]
#[serial]
fn tick_parses_milliseconds() {
    std::env::remove_var("TRUN_TICK_MS");
    assert_eq!(tick(), DEFAULT_TICK);
    std::env::set_var("TRUN_TICK_MS", "250");
    assert_eq!(tick(), Duration::from_millis(250));
    std::env::set_var("TRUN_TICK_MS", "1");
    assert_eq!(tick(), Duration::from_millis(10));
    std::env::set_var("TRUN_TICK_MS", "soon");
    assert_eq!(tick(), DEFAULT_TICK);
    std::env::remove_var("TRUN_TICK_MS");
}

#[test]
#[serial]
fn blank_editor_is_unset() {
    std::env::set_var("EDITOR", "  ");
    assert_eq!(editor(), None);
    std::env::set_var("EDITOR", "hx");
    assert_eq!(editor().as_deref(), Some("hx"));
    std::env::remove_var("EDITOR");
}
