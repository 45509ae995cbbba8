// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scrollable view over the loaded run log, with in-buffer search.
//!
//! The scroll position is the index of the top visible line. With `rows`
//! visible lines the largest useful position is `lines - rows`; while
//! auto-scroll is on, every load pins the view there so the tail of a live
//! run stays visible.

use std::path::PathBuf;
use std::time::SystemTime;

/// Where the loaded lines came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSource {
    pub path: PathBuf,
    /// Modification time when replaying a log from an earlier session
    pub replayed_from: Option<SystemTime>,
}

#[derive(Debug, Default)]
struct Search {
    editing: bool,
    text: String,
    matches: Vec<usize>,
    /// Index into `matches`; `None` until the first next/prev
    current: Option<usize>,
}

#[derive(Debug)]
pub struct OutputView {
    lines: Vec<String>,
    source: Option<OutputSource>,
    scroll: usize,
    auto_scroll: bool,
    h_offset: usize,
    rows: usize,
    search: Search,
}

impl Default for OutputView {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            source: None,
            scroll: 0,
            auto_scroll: true,
            h_offset: 0,
            rows: 0,
            search: Search::default(),
        }
    }
}

impl OutputView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn source(&self) -> Option<&OutputSource> {
        self.source.as_ref()
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn auto_scroll(&self) -> bool {
        self.auto_scroll
    }

    pub fn h_offset(&self) -> usize {
        self.h_offset
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.rows)
    }

    /// Visible lines, top first.
    pub fn visible(&self) -> &[String] {
        let start = self.scroll.min(self.lines.len());
        let end = (start + self.rows).min(self.lines.len());
        &self.lines[start..end]
    }

    /// Number of rows the front end can show.
    pub fn set_rows(&mut self, rows: usize) {
        self.rows = rows;
        self.pin_if_auto();
    }

    /// Replace the buffer with freshly read lines.
    ///
    /// Search results belong to one log; loading a different file drops them.
    pub fn load(&mut self, lines: Vec<String>, source: OutputSource) {
        if self.source.as_ref().map(|s| &s.path) != Some(&source.path) {
            self.search = Search::default();
        }
        self.lines = lines;
        self.source = Some(source);
        self.pin_if_auto();
    }

    /// Drop the buffer; nothing is shown.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.source = None;
        self.scroll = 0;
        self.search = Search::default();
    }

    /// Follow the tail again, from the left edge. Used when the cursor
    /// moves to another test.
    pub fn follow_tail(&mut self) {
        self.auto_scroll = true;
        self.h_offset = 0;
        self.pin_if_auto();
    }

    fn pin_if_auto(&mut self) {
        if self.auto_scroll {
            self.scroll = self.max_scroll();
        }
    }

    pub fn scroll_up(&mut self) {
        if self.scroll > 0 {
            self.scroll -= 1;
            self.auto_scroll = false;
        }
    }

    pub fn scroll_down(&mut self) {
        let max = self.max_scroll();
        if self.scroll < max {
            self.scroll += 1;
        }
        if self.scroll >= max {
            self.auto_scroll = true;
        }
    }

    pub fn page_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(self.rows);
        self.auto_scroll = false;
    }

    pub fn page_down(&mut self) {
        let max = self.max_scroll();
        self.scroll = (self.scroll + self.rows).min(max);
        if self.scroll >= max {
            self.auto_scroll = true;
        }
    }

    pub fn scroll_left(&mut self) {
        self.h_offset = self.h_offset.saturating_sub(1);
    }

    pub fn scroll_right(&mut self) {
        self.h_offset += 1;
    }

    pub fn home(&mut self) {
        self.scroll = 0;
        self.auto_scroll = false;
    }

    pub fn end(&mut self) {
        self.scroll = self.max_scroll();
        self.auto_scroll = true;
    }

    // ── Search ──────────────────────────────────────────────────────────

    pub fn is_searching(&self) -> bool {
        self.search.editing
    }

    pub fn search_text(&self) -> &str {
        &self.search.text
    }

    pub fn matches(&self) -> &[usize] {
        &self.search.matches
    }

    /// Position of the current match within [`OutputView::matches`].
    pub fn current_match(&self) -> Option<usize> {
        self.search.current
    }

    /// Enter search editing with an empty query.
    pub fn search_start(&mut self) {
        self.search = Search { editing: true, ..Search::default() };
    }

    pub fn search_input(&mut self, c: char) {
        if self.search.editing {
            self.search.text.push(c);
        }
    }

    pub fn search_backspace(&mut self) {
        if self.search.editing {
            self.search.text.pop();
        }
    }

    pub fn search_cancel(&mut self) {
        self.search.editing = false;
    }

    /// Leave editing, compute matches, and jump to the first one.
    pub fn search_commit(&mut self) {
        self.search.editing = false;
        self.search.matches = find_matches(&self.lines, &self.search.text);
        self.search.current = None;
        self.next_match();
    }

    pub fn next_match(&mut self) {
        let len = self.search.matches.len();
        if len == 0 {
            return;
        }
        let next = match self.search.current {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.jump_to(next);
    }

    pub fn prev_match(&mut self) {
        let len = self.search.matches.len();
        if len == 0 {
            return;
        }
        let prev = match self.search.current {
            Some(i) if i > 0 => i - 1,
            _ => len - 1,
        };
        self.jump_to(prev);
    }

    fn jump_to(&mut self, index: usize) {
        self.search.current = Some(index);
        if let Some(&line) = self.search.matches.get(index) {
            self.scroll = line;
            self.auto_scroll = false;
        }
    }
}

/// Indices of lines containing `needle`, ignoring case. An empty needle
/// matches nothing.
pub fn find_matches(lines: &[String], needle: &str) -> Vec<usize> {
    if needle.is_empty() {
        return Vec::new();
    }
    let needle = needle.to_lowercase();
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
