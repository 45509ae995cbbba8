// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
fn defaults() {
    let args = Args::try_parse_from(["trun"]).unwrap();
    assert_eq!(args.dir, PathBuf::from("."));
    assert_eq!(args.parallel, 3);
    assert_eq!(args.test_timeout, Duration::from_secs(30 * 60));
    assert!(!args.list);
    assert!(!args.no_recursive);
    assert_eq!(args.log_dir, None);
}

#[test]
fn flags_parse() {
    let args = Args::try_parse_from([
        "trun",
        "--parallel",
        "5",
        "--test-timeout",
        "90s",
        "--log-dir",
        "/tmp/logs",
        "--no-recursive",
        "./pkg",
    ])
    .unwrap();
    assert_eq!(args.dir, PathBuf::from("./pkg"));
    assert_eq!(args.parallel, 5);
    assert_eq!(args.test_timeout, Duration::from_secs(90));
    assert_eq!(args.log_dir, Some(PathBuf::from("/tmp/logs")));
    assert!(args.no_recursive);
}

#[test]
fn json_requires_list() {
    assert!(Args::try_parse_from(["trun", "--json"]).is_err());
    assert!(Args::try_parse_from(["trun", "--list", "--json"]).is_ok());
}

#[test]
fn bad_timeout_is_rejected() {
    assert!(Args::try_parse_from(["trun", "--test-timeout", "soon"]).is_err());
}

#[test]
fn root_must_be_an_existing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("file.txt");
    std::fs::write(&file, "x").unwrap();

    assert_eq!(resolve_root(dir.path()).unwrap(), std::fs::canonicalize(dir.path()).unwrap());
    let err = resolve_root(&file).unwrap_err();
    assert!(err.message.contains("is not a directory"), "{}", err.message);
    let err = resolve_root(&dir.path().join("missing")).unwrap_err();
    assert!(err.message.contains("cannot access directory"), "{}", err.message);
}

#[test]
#[serial]
fn log_dir_prefers_flag_then_env_then_default() {
    let root = Path::new("/work/project");
    std::env::set_var("TRUN_LOG_DIR", "/from/env");
    assert_eq!(
        resolve_log_dir(Some(PathBuf::from("/from/flag")), root).unwrap(),
        PathBuf::from("/from/flag")
    );
    assert_eq!(resolve_log_dir(None, root).unwrap(), PathBuf::from("/from/env"));

    std::env::remove_var("TRUN_LOG_DIR");
    let default = resolve_log_dir(None, root).unwrap();
    assert!(default.to_string_lossy().contains(".test-runner"), "{}", default.display());
    assert_eq!(default.file_name().unwrap().len(), 16);
}
