// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! trun: interactive runner for Go tests.

mod color;
mod duration;
mod env;
mod exit_error;
mod keys;
mod listing;
mod logging;
mod tui;
mod view;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use trun_adapters::{Discovery, GoDiscovery, GoTestBackend, SystemEditor};
use trun_core::{SystemClock, TestList};
use trun_engine::{log_paths, LogSink, Scheduler, SchedulerDeps, Session, SessionDeps};

use crate::exit_error::ExitError;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_GIT_HASH"));

#[derive(Parser, Debug)]
#[command(name = "trun", version = VERSION, about = "Discover Go tests and run them interactively")]
#[command(styles = color::styles())]
struct Args {
    /// Directory to discover tests in
    #[arg(value_name = "DIR", default_value = ".")]
    dir: PathBuf,

    /// Directory for run logs [default: ~/.test-runner/<hash of DIR>]
    #[arg(long, value_name = "PATH")]
    log_dir: Option<PathBuf>,

    /// Tests allowed to run at once
    #[arg(long, short = 'p', value_name = "N", default_value_t = 3)]
    parallel: usize,

    /// Per-test time limit (e.g. 90s, 5m, 1h); 0 disables it
    #[arg(long, value_name = "DURATION", default_value = "30m", value_parser = duration::parse_duration)]
    test_timeout: Duration,

    /// Print discovered tests and exit
    #[arg(long)]
    list: bool,

    /// With --list, print JSON
    #[arg(long, requires = "list")]
    json: bool,

    /// Start with discovery limited to DIR itself
    #[arg(long)]
    no_recursive: bool,
}

fn main() {
    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {e:#}");
        std::process::exit(exit_error::exit_code(&e));
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let root = resolve_root(&args.dir)?;
    let recursive = !args.no_recursive;
    let discovery = GoDiscovery::new();
    let tests = discovery
        .discover(&root, recursive)
        .map_err(|e| ExitError::fatal(format!("test discovery failed: {e}")))?;

    if args.list {
        let out = if args.json {
            listing::render_json(&tests)?
        } else {
            listing::render_text(&tests, &root)
        };
        print!("{out}");
        return Ok(());
    }

    let log_dir = resolve_log_dir(args.log_dir, &root)?;
    let sink = LogSink::open(&log_dir).map_err(|e| ExitError::fatal(e.to_string()))?;
    let _log_guard = logging::init(&log_dir)?;
    tracing::info!(
        root = %root.display(),
        log_dir = %log_dir.display(),
        tests = tests.len(),
        recursive,
        "starting"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("trun-worker")
        .build()
        .context("cannot start async runtime")?;

    let backend = GoTestBackend::new(&root).with_timeout(duration::timeout_of(args.test_timeout));
    let deps = SchedulerDeps {
        backend: backend.clone(),
        clock: SystemClock,
        sink,
        runtime: runtime.handle().clone(),
    };
    let scheduler = Scheduler::new(TestList::from_descriptors(tests), deps, args.parallel.max(1));
    let session = Session::new(SessionDeps {
        scheduler,
        discovery,
        editor: SystemEditor::new(env::editor(), env::search_path()),
        root,
        recursive,
    });

    let mut ui = tui::Tui::new(session, env::tick()).context("cannot set up terminal")?;
    let result = ui.run();
    drop(ui);

    let killed = backend.kill_running();
    if killed > 0 {
        tracing::info!(killed, "killed in-flight test runs");
    }
    runtime.shutdown_timeout(Duration::from_secs(1));
    tracing::info!("stopped");
    result.context("terminal error")
}

/// Absolute discovery root; must be an existing directory.
fn resolve_root(dir: &Path) -> Result<PathBuf, ExitError> {
    let meta = std::fs::metadata(dir)
        .map_err(|e| ExitError::fatal(format!("cannot access directory {}: {e}", dir.display())))?;
    if !meta.is_dir() {
        return Err(ExitError::fatal(format!("{} is not a directory", dir.display())));
    }
    std::fs::canonicalize(dir)
        .map_err(|e| ExitError::fatal(format!("cannot resolve {}: {e}", dir.display())))
}

/// `--log-dir`, then `TRUN_LOG_DIR`, then the per-root default under home.
fn resolve_log_dir(flag: Option<PathBuf>, root: &Path) -> Result<PathBuf, ExitError> {
    if let Some(dir) = flag.or_else(env::log_dir) {
        return Ok(dir);
    }
    let home = dirs::home_dir()
        .ok_or_else(|| ExitError::fatal("cannot determine home directory; pass --log-dir"))?;
    Ok(log_paths::default_log_dir(&home, root))
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
