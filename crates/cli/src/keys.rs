// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Key map: terminal key events to session intents.
//!
//! Text-entry modes (filter, search) capture printable keys before any
//! other binding, so `q` types a `q` there. `ctrl+c` always quits.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use trun_engine::{Focus, Intent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Apply(Intent),
}

/// The parts of session state that change what a key means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyContext {
    pub focus: Focus,
    pub filtering: bool,
    pub searching: bool,
}

pub fn map_key(key: KeyEvent, ctx: KeyContext) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }
    let typed = typed_char(&key);

    if ctx.filtering {
        let intent = match key.code {
            KeyCode::Enter | KeyCode::Esc => Intent::FilterFinish,
            KeyCode::Backspace => Intent::FilterBackspace,
            _ => Intent::FilterInput(typed?),
        };
        return Some(Action::Apply(intent));
    }
    if ctx.searching {
        let intent = match key.code {
            KeyCode::Enter => Intent::SearchCommit,
            KeyCode::Esc => Intent::SearchCancel,
            KeyCode::Backspace => Intent::SearchBackspace,
            _ => Intent::SearchInput(typed?),
        };
        return Some(Action::Apply(intent));
    }

    match (key.code, typed) {
        (_, Some('q')) => return Some(Action::Quit),
        (KeyCode::Tab, _) => return Some(Action::Apply(Intent::ToggleFocus)),
        _ => {}
    }
    let intent = match ctx.focus {
        Focus::List => list_key(key.code, typed),
        Focus::Output => output_key(key.code, typed),
    };
    intent.map(Action::Apply)
}

/// A printable character with no control or alt modifier.
fn typed_char(key: &KeyEvent) -> Option<char> {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Some(c),
        _ => None,
    }
}

fn list_key(code: KeyCode, typed: Option<char>) -> Option<Intent> {
    match code {
        KeyCode::Up => return Some(Intent::CursorUp),
        KeyCode::Down => return Some(Intent::CursorDown),
        _ => {}
    }
    Some(match typed? {
        'k' => Intent::CursorUp,
        'j' => Intent::CursorDown,
        '/' => Intent::FilterStart,
        'a' => Intent::SelectAll,
        'd' => Intent::DeselectAll,
        'i' => Intent::InvertSelection,
        ' ' => Intent::ToggleSelection,
        'g' => Intent::Run,
        't' => Intent::Stop,
        's' => Intent::CycleSort,
        'e' => Intent::OpenEditor,
        'r' => Intent::ToggleRecursive,
        '[' => Intent::MoveUp,
        ']' => Intent::MoveDown,
        '+' | '=' => Intent::IncreaseParallel,
        '-' | '_' => Intent::DecreaseParallel,
        _ => return None,
    })
}

fn output_key(code: KeyCode, typed: Option<char>) -> Option<Intent> {
    let intent = match code {
        KeyCode::Up => Intent::ScrollUp,
        KeyCode::Down => Intent::ScrollDown,
        KeyCode::Left => Intent::ScrollLeft,
        KeyCode::Right => Intent::ScrollRight,
        KeyCode::PageUp => Intent::PageUp,
        KeyCode::PageDown => Intent::PageDown,
        KeyCode::Home => Intent::ScrollHome,
        KeyCode::End => Intent::ScrollEnd,
        _ => match typed? {
            'k' => Intent::ScrollUp,
            'j' => Intent::ScrollDown,
            'h' => Intent::ScrollLeft,
            'l' => Intent::ScrollRight,
            '/' => Intent::SearchStart,
            'n' => Intent::SearchNext,
            'N' => Intent::SearchPrev,
            _ => return None,
        },
    };
    Some(intent)
}

#[cfg(test)]
#[path = "keys_tests.rs"]
mod tests;
