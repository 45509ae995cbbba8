// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session controller: turns user intents into list, scheduler and
//! output-view changes.
//!
//! A session is a single actor. Its own state (cursor, filter, sort,
//! output view) has no lock; everything it reads from records goes through
//! the record lock, because execution tasks write records concurrently.
//!
//! The filtered view always preserves the shared list's order, so the
//! order on screen is the admission order. Reordering and sorting change
//! the shared list and then rebuild the view.

mod intent;
mod listing;
mod output;

pub use intent::{Focus, Intent, SortMode};
pub use listing::{filter_records, sort_key};
pub use output::{find_matches, OutputSource, OutputView};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use trun_adapters::{Discovery, EditorAdapter, TestBackend};
use trun_core::{records_for, Clock, TestRecord};

use crate::log_sink::LogSink;
use crate::scheduler::Scheduler;

/// Everything a session drives.
pub struct SessionDeps<B, D, E, C> {
    pub scheduler: Scheduler<B, C>,
    pub discovery: D,
    pub editor: E,
    /// Discovery root
    pub root: PathBuf,
    /// Whether the current list came from a recursive discovery
    pub recursive: bool,
}

/// Point-in-time values for a status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub sort: SortMode,
    pub recursive: bool,
    pub max_parallel: usize,
    pub running: usize,
    pub queued: usize,
}

#[derive(Debug, Default)]
struct Filter {
    editing: bool,
    text: String,
}

pub struct Session<B, D, E, C> {
    scheduler: Scheduler<B, C>,
    discovery: D,
    editor: E,
    root: PathBuf,
    recursive: bool,
    focus: Focus,
    cursor: usize,
    filter: Filter,
    sort: SortMode,
    view: Vec<Arc<TestRecord>>,
    output: OutputView,
    notice: Option<String>,
}

impl<B, D, E, C> Session<B, D, E, C>
where
    B: TestBackend,
    D: Discovery,
    E: EditorAdapter,
    C: Clock,
{
    /// Start a session over the scheduler's list, sorted by name.
    pub fn new(deps: SessionDeps<B, D, E, C>) -> Self {
        let mut session = Self {
            scheduler: deps.scheduler,
            discovery: deps.discovery,
            editor: deps.editor,
            root: deps.root,
            recursive: deps.recursive,
            focus: Focus::default(),
            cursor: 0,
            filter: Filter::default(),
            sort: SortMode::default(),
            view: Vec::new(),
            output: OutputView::new(),
            notice: None,
        };
        session.sort_list();
        session.rebuild_view();
        session.refresh_output();
        session
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The filtered view, in list order.
    pub fn view(&self) -> &[Arc<TestRecord>] {
        &self.view
    }

    /// Record under the cursor
    pub fn current(&self) -> Option<&Arc<TestRecord>> {
        self.view.get(self.cursor)
    }

    pub fn is_filtering(&self) -> bool {
        self.filter.editing
    }

    pub fn filter_text(&self) -> &str {
        &self.filter.text
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort
    }

    pub fn recursive(&self) -> bool {
        self.recursive
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn output(&self) -> &OutputView {
        &self.output
    }

    /// Last non-fatal problem worth showing, cleared by the next intent.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn scheduler(&self) -> &Scheduler<B, C> {
        &self.scheduler
    }

    pub fn now(&self) -> Instant {
        self.scheduler.clock().now()
    }

    pub fn status(&self) -> StatusLine {
        StatusLine {
            sort: self.sort,
            recursive: self.recursive,
            max_parallel: self.scheduler.max_parallel(),
            running: self.scheduler.running_count(),
            queued: self.scheduler.queued_count(),
        }
    }

    /// Number of output rows the front end can show.
    pub fn set_viewport_rows(&mut self, rows: usize) {
        self.output.set_rows(rows);
    }

    // ── Intents ─────────────────────────────────────────────────────────

    pub fn apply(&mut self, intent: Intent) {
        self.notice = None;
        match intent {
            Intent::ToggleFocus => self.focus = self.focus.toggled(),

            Intent::CursorUp => {
                if self.cursor > 0 {
                    self.move_cursor_to(self.cursor - 1);
                }
            }
            Intent::CursorDown => {
                if self.cursor + 1 < self.view.len() {
                    self.move_cursor_to(self.cursor + 1);
                }
            }

            Intent::FilterStart => {
                self.filter = Filter { editing: true, text: String::new() };
                self.rebuild_view();
            }
            Intent::FilterInput(c) => {
                if self.filter.editing {
                    self.filter.text.push(c);
                    self.rebuild_view();
                }
            }
            Intent::FilterBackspace => {
                if self.filter.editing && self.filter.text.pop().is_some() {
                    self.rebuild_view();
                }
            }
            Intent::FilterFinish => {
                self.filter.editing = false;
                self.rebuild_view();
            }

            Intent::SelectAll => self.view.iter().for_each(|r| r.set_selected(true)),
            Intent::DeselectAll => self.view.iter().for_each(|r| r.set_selected(false)),
            Intent::InvertSelection => self.view.iter().for_each(|r| r.toggle_selected()),
            Intent::ToggleSelection => {
                if let Some(record) = self.current() {
                    record.toggle_selected();
                }
            }

            Intent::Run => self.run(),
            Intent::Stop => self.stop(),
            Intent::MoveUp => self.move_up(),
            Intent::MoveDown => self.move_down(),
            Intent::CycleSort => self.cycle_sort(),
            Intent::ToggleRecursive => self.toggle_recursive(),
            Intent::IncreaseParallel => {
                self.scheduler.set_max_parallel(self.scheduler.max_parallel() + 1);
            }
            Intent::DecreaseParallel => {
                let max = self.scheduler.max_parallel();
                if max > 1 {
                    self.scheduler.set_max_parallel(max - 1);
                }
            }
            Intent::OpenEditor => self.open_editor(),

            Intent::ScrollUp => self.output.scroll_up(),
            Intent::ScrollDown => self.output.scroll_down(),
            Intent::PageUp => self.output.page_up(),
            Intent::PageDown => self.output.page_down(),
            Intent::ScrollLeft => self.output.scroll_left(),
            Intent::ScrollRight => self.output.scroll_right(),
            Intent::ScrollHome => self.output.home(),
            Intent::ScrollEnd => self.output.end(),

            Intent::SearchStart => self.output.search_start(),
            Intent::SearchInput(c) => self.output.search_input(c),
            Intent::SearchBackspace => self.output.search_backspace(),
            Intent::SearchCommit => self.output.search_commit(),
            Intent::SearchCancel => self.output.search_cancel(),
            Intent::SearchNext => self.output.next_match(),
            Intent::SearchPrev => self.output.prev_match(),
        }
    }

    /// Selected tests in the view, or the cursor's test when none is selected.
    fn targets(&self) -> Vec<Arc<TestRecord>> {
        let selected: Vec<_> = self.view.iter().filter(|r| r.is_selected()).cloned().collect();
        if !selected.is_empty() {
            return selected;
        }
        self.current().cloned().into_iter().collect()
    }

    fn run(&self) {
        let targets = self.targets();
        let queued = targets.iter().filter(|r| self.scheduler.enqueue(r)).count();
        tracing::debug!(requested = targets.len(), queued, "run");
    }

    fn stop(&self) {
        let targets = self.targets();
        let stopped = targets.iter().filter(|r| self.scheduler.stop(r)).count();
        tracing::debug!(requested = targets.len(), stopped, "stop");
    }

    fn move_up(&mut self) {
        if self.cursor == 0 || self.cursor >= self.view.len() {
            return;
        }
        self.swap_with(self.cursor - 1);
    }

    fn move_down(&mut self) {
        if self.cursor + 1 >= self.view.len() {
            return;
        }
        self.swap_with(self.cursor + 1);
    }

    /// Exchange the cursor's record with the view neighbour at `other`,
    /// and keep the cursor on the moved record.
    fn swap_with(&mut self, other: usize) {
        let (Some(a), Some(b)) = (self.view.get(self.cursor), self.view.get(other)) else {
            return;
        };
        if self.scheduler.list().swap(a, b) {
            self.view.swap(self.cursor, other);
            self.cursor = other;
        }
    }

    fn cycle_sort(&mut self) {
        self.sort = self.sort.next();
        let current = self.current().cloned();
        self.sort_list();
        self.rebuild_view();
        if let Some(index) = current.and_then(|r| listing::position_of(&self.view, &r)) {
            self.cursor = index;
        }
    }

    fn toggle_recursive(&mut self) {
        let recursive = !self.recursive;
        let tests = match self.discovery.discover(&self.root, recursive) {
            Ok(tests) => tests,
            Err(e) => {
                tracing::warn!(root = %self.root.display(), recursive, error = %e, "rediscovery failed");
                self.notice = Some(format!("discovery failed: {e}"));
                return;
            }
        };
        tracing::info!(root = %self.root.display(), recursive, count = tests.len(), "rediscovered");
        self.recursive = recursive;
        let orphaned = self.scheduler.list().replace(records_for(tests));
        let in_flight = orphaned.iter().filter(|r| r.status().is_active()).count();
        if in_flight > 0 {
            tracing::info!(in_flight, "previous generation still has tests in flight");
        }
        self.sort_list();
        self.rebuild_view();
        self.refresh_output();
    }

    fn open_editor(&mut self) {
        let Some(record) = self.current().cloned() else { return };
        let descriptor = record.descriptor();
        let file = if descriptor.file.is_absolute() {
            descriptor.file.clone()
        } else {
            self.root.join(&descriptor.file)
        };
        if let Err(e) = self.editor.open(&file, descriptor.line) {
            tracing::warn!(file = %file.display(), error = %e, "editor launch failed");
            self.notice = Some(format!("editor: {e}"));
        }
    }

    // ── View maintenance ────────────────────────────────────────────────

    fn move_cursor_to(&mut self, index: usize) {
        self.cursor = index;
        self.output.follow_tail();
        self.refresh_output();
    }

    fn sort_list(&self) {
        let mode = self.sort;
        self.scheduler.list().sort_by_key(|r| sort_key(mode, r));
    }

    /// Recompute the filtered view from the list and clamp the cursor.
    fn rebuild_view(&mut self) {
        self.view = filter_records(self.scheduler.list().records(), &self.filter.text);
        self.cursor = self.cursor.min(self.view.len().saturating_sub(1));
    }

    /// Reload the log of the cursor's test.
    ///
    /// Uses the log of this session's latest enqueue when there is one,
    /// otherwise replays the most recent log on disk for that test name.
    pub fn refresh_output(&mut self) {
        let Some(record) = self.current().cloned() else {
            self.output.clear();
            return;
        };
        let source = match record.log_target() {
            Some(path) => OutputSource { path, replayed_from: None },
            None => match self.scheduler.sink().most_recent(record.descriptor()) {
                Some(entry) => OutputSource { path: entry.path, replayed_from: Some(entry.modified) },
                None => {
                    self.output.clear();
                    return;
                }
            },
        };
        match LogSink::read_lines(&source.path) {
            Ok(lines) => self.output.load(lines, source),
            Err(e) => {
                tracing::trace!(error = %e, "log not readable yet");
                self.output.clear();
            }
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
