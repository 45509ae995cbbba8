// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Colors for `--help` output and the terminal UI.

use clap::builder::styling::{Ansi256Color, Color as ClapColor, Style as ClapStyle, Styles};
use ratatui::style::Color;
use std::io::IsTerminal;

pub mod codes {
    /// Section headers: steel blue
    pub const HEADER: u8 = 74;
    /// Commands and literals: light grey
    pub const LITERAL: u8 = 250;
    /// Placeholders: medium grey
    pub const CONTEXT: u8 = 245;

    /// Border of the focused pane
    pub const FOCUSED_BORDER: u8 = 205;
    /// Border of the other pane
    pub const UNFOCUSED_BORDER: u8 = 240;
    /// Selected, non-cursor rows
    pub const SELECTED: u8 = 170;
    /// Background of the cursor row
    pub const CURSOR: u8 = 212;
    pub const STATUS_BAR_BG: u8 = 236;
    pub const STATUS_BAR_FG: u8 = 252;
}

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables, then `COLOR=1` forces, then TTY check.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Build clap `Styles` using the project palette.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    let fg = |code| ClapStyle::new().fg_color(Some(ClapColor::Ansi256(Ansi256Color(code))));
    Styles::styled().header(fg(codes::HEADER)).literal(fg(codes::LITERAL)).placeholder(fg(codes::CONTEXT))
}

/// Pane border color for the focus state.
pub fn border(focused: bool) -> Color {
    if focused {
        Color::Indexed(codes::FOCUSED_BORDER)
    } else {
        Color::Indexed(codes::UNFOCUSED_BORDER)
    }
}

pub fn selected() -> Color {
    Color::Indexed(codes::SELECTED)
}

pub fn cursor() -> Color {
    Color::Indexed(codes::CURSOR)
}

pub fn status_bar() -> (Color, Color) {
    (Color::Indexed(codes::STATUS_BAR_FG), Color::Indexed(codes::STATUS_BAR_BG))
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
