// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Frame rendering.
//!
//! A [`Screen`] is captured from the session once per frame so that
//! drawing never touches record locks mid-render.

use std::time::{Instant, SystemTime};

use chrono::{DateTime, Local};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use trun_adapters::{Discovery, EditorAdapter, TestBackend};
use trun_core::{format_duration, Clock, TestStatus};
use trun_engine::{Focus, OutputView, Session, SortMode, StatusLine};

use crate::color;

pub const HELP: &str = "q:quit │ g:go │ t:stop │ s:sort │ e:edit │ r:rec │ +/-:par │ /:filter";

/// One line of the test list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub selected: bool,
    pub status: TestStatus,
    pub name: String,
    pub elapsed: Option<String>,
}

/// Everything one frame shows.
pub struct Screen<'a> {
    pub focus: Focus,
    pub rows: Vec<ListRow>,
    pub cursor: usize,
    pub filter: &'a str,
    pub filtering: bool,
    /// Short name of the cursor's test
    pub current: Option<String>,
    pub output: &'a OutputView,
    pub status: StatusLine,
    pub notice: Option<&'a str>,
}

impl<'a> Screen<'a> {
    pub fn capture<B, D, E, C>(session: &'a Session<B, D, E, C>) -> Self
    where
        B: TestBackend,
        D: Discovery,
        E: EditorAdapter,
        C: Clock,
    {
        let now = session.now();
        let rows = session.view().iter().map(|r| list_row(r, now)).collect();
        Self {
            focus: session.focus(),
            rows,
            cursor: session.cursor(),
            filter: session.filter_text(),
            filtering: session.is_filtering(),
            current: session.current().map(|r| r.descriptor().short_name()),
            output: session.output(),
            status: session.status(),
            notice: session.notice(),
        }
    }
}

fn list_row(record: &trun_core::TestRecord, now: Instant) -> ListRow {
    let snapshot = record.snapshot();
    ListRow {
        selected: snapshot.selected,
        status: snapshot.status,
        name: record.descriptor().short_name(),
        elapsed: snapshot.duration(now).map(format_duration),
    }
}

pub fn status_icon(status: TestStatus) -> &'static str {
    match status {
        TestStatus::Idle => "   ",
        TestStatus::Queued => "🍵 ",
        TestStatus::Running => "🏃 ",
        TestStatus::Passed => "✅ ",
        TestStatus::Failed => "❌ ",
    }
}

pub fn sort_label(mode: SortMode) -> &'static str {
    match mode {
        SortMode::Name => "name",
        SortMode::Selection => "sel",
        SortMode::Status => "status",
    }
}

pub fn status_text(status: &StatusLine) -> String {
    format!(
        "Sort:{} │ Rec:{} │ Par:{} │ Run:{} │ Queue:{}",
        sort_label(status.sort),
        if status.recursive { "on" } else { "off" },
        status.max_parallel,
        status.running,
        status.queued,
    )
}

/// Output pane header; names the replayed run's time when not live.
pub fn output_header(name: &str, replayed_from: Option<SystemTime>) -> String {
    match replayed_from {
        Some(at) => {
            let at: DateTime<Local> = at.into();
            format!("Output: {name} (from {})", at.format("%Y-%m-%d %H:%M:%S"))
        }
        None => format!("Output: {name}"),
    }
}

/// Scroll position and search summary under the output.
pub fn output_info(output: &OutputView) -> String {
    if output.is_searching() {
        return format!("Search: {}█", output.search_text());
    }
    let mut items = Vec::new();
    if output.lines().len() > output.rows() {
        let mut scroll = format!("[{}/{}]", output.scroll() + 1, output.lines().len());
        if output.auto_scroll() {
            scroll.push_str(" (auto)");
        }
        items.push(scroll);
    }
    let text = output.search_text();
    if !text.is_empty() {
        let total = output.matches().len();
        if total > 0 {
            let current = output.current_match().map_or(0, |i| i + 1);
            items.push(format!("'{text}' {current}/{total}"));
        } else {
            items.push(format!("'{text}' not found"));
        }
    }
    if items.is_empty() {
        String::new()
    } else {
        format!(" {}", items.join(" │ "))
    }
}

/// Pane areas for a terminal of the given size.
pub struct Areas {
    pub list: Rect,
    pub output: Rect,
    pub status: Rect,
}

pub fn layout(area: Rect) -> Areas {
    let [content, status] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);
    let [list, output] =
        Layout::horizontal([Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)]).areas(content);
    Areas { list, output, status }
}

/// Output lines visible at once: pane minus borders, header, rule and info line.
pub fn output_rows(area: Rect) -> usize {
    usize::from(layout(area).output.height).saturating_sub(5)
}

pub fn render(frame: &mut Frame, screen: &Screen) {
    let areas = layout(frame.area());
    render_list(frame, areas.list, screen);
    render_output(frame, areas.output, screen);
    render_status(frame, areas.status, screen);
}

fn pane(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color::border(focused)))
        .title(title)
}

fn render_list(frame: &mut Frame, area: Rect, screen: &Screen) {
    let block = pane(" Tests ", screen.focus == Focus::List);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    if screen.filtering {
        lines.push(Line::from(format!("Filter: {}█", screen.filter)));
    } else if !screen.filter.is_empty() {
        lines.push(Line::from(format!("Filter: {}", screen.filter)));
    }
    let height = usize::from(inner.height).saturating_sub(lines.len());
    let start = (screen.cursor + 1).saturating_sub(height);

    for (i, row) in screen.rows.iter().enumerate().skip(start).take(height) {
        let marker = if row.selected { "●" } else { " " };
        let elapsed = row.elapsed.as_deref().map(|e| format!(" {e}")).unwrap_or_default();
        let text = format!("{marker}{}{}{elapsed}", status_icon(row.status), row.name);
        let style = if i == screen.cursor {
            Style::default().bg(color::cursor()).fg(Color::Black)
        } else if row.selected {
            Style::default().fg(color::selected())
        } else {
            Style::default()
        };
        lines.push(Line::styled(text, style));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_output(frame: &mut Frame, area: Rect, screen: &Screen) {
    let block = pane(" Output ", screen.focus == Focus::Output);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let output = screen.output;
    let mut lines = Vec::new();
    if let Some(name) = &screen.current {
        let replayed = output.source().and_then(|s| s.replayed_from);
        lines.push(Line::from(Span::styled(output_header(name, replayed), Style::default().bold())));
        lines.push(Line::from("─".repeat(usize::from(inner.width))));
    }
    let offset = output.h_offset();
    for line in output.visible() {
        lines.push(Line::from(line.chars().skip(offset).collect::<String>()));
    }
    frame.render_widget(Paragraph::new(lines), inner);

    let info = output_info(output);
    if !info.is_empty() && inner.height > 0 {
        let row = Rect { y: inner.y + inner.height - 1, height: 1, ..inner };
        let style = if output.is_searching() {
            Style::default().bold()
        } else {
            Style::default().dim()
        };
        frame.render_widget(Paragraph::new(info).style(style), row);
    }
}

fn render_status(frame: &mut Frame, area: Rect, screen: &Screen) {
    let (fg, bg) = color::status_bar();
    let left = screen.notice.unwrap_or(HELP);
    let right = status_text(&screen.status);
    let used = left.chars().count() + right.chars().count() + 2;
    let gap = usize::from(area.width).saturating_sub(used).max(1);
    let text = format!(" {left}{}{right} ", " ".repeat(gap));
    frame.render_widget(Paragraph::new(text).style(Style::default().fg(fg).bg(bg)), area);
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
