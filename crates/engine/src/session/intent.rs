// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The closed set of operations a front end can ask of a session.

use serde::{Deserialize, Serialize};

/// Which pane receives navigation intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    #[default]
    List,
    Output,
}

impl Focus {
    pub fn toggled(self) -> Self {
        match self {
            Focus::List => Focus::Output,
            Focus::Output => Focus::List,
        }
    }
}

trun_core::simple_display! {
    Focus {
        List => "list",
        Output => "output",
    }
}

/// Ordering applied to the test list on demand.
///
/// Every mode breaks ties by name, then package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    Name,
    /// Selected tests first
    Selection,
    /// Failed, passed, running, queued, idle
    Status,
}

impl SortMode {
    /// Next mode in the cycle `Name -> Selection -> Status -> Name`.
    pub fn next(self) -> Self {
        match self {
            SortMode::Name => SortMode::Selection,
            SortMode::Selection => SortMode::Status,
            SortMode::Status => SortMode::Name,
        }
    }
}

trun_core::simple_display! {
    SortMode {
        Name => "name",
        Selection => "selection",
        Status => "status",
    }
}

/// A user intent. Every intent applies synchronously and leaves the
/// session in a valid state, even when it has nothing to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ToggleFocus,

    // List navigation
    CursorUp,
    CursorDown,

    // Filter editing
    FilterStart,
    FilterInput(char),
    FilterBackspace,
    FilterFinish,

    // Selection, over the filtered view only
    SelectAll,
    DeselectAll,
    InvertSelection,
    ToggleSelection,

    // Selected tests if any are selected, else the cursor's test
    Run,
    Stop,

    MoveUp,
    MoveDown,
    CycleSort,
    ToggleRecursive,
    IncreaseParallel,
    DecreaseParallel,
    OpenEditor,

    // Output navigation
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollLeft,
    ScrollRight,
    ScrollHome,
    ScrollEnd,

    // Output search
    SearchStart,
    SearchInput(char),
    SearchBackspace,
    SearchCommit,
    SearchCancel,
    SearchNext,
    SearchPrev,
}
