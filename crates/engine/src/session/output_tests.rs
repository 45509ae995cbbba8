// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

fn view(lines: usize, rows: usize) -> OutputView {
    let mut view = OutputView::new();
    view.set_rows(rows);
    let lines = (0..lines).map(|i| format!("line {i}")).collect();
    view.load(lines, OutputSource { path: PathBuf::from("TestA.20260130-081409.log"), replayed_from: None });
    view
}

#[test]
fn load_pins_to_tail_while_auto_scrolling() {
    let view = view(30, 10);
    assert!(view.auto_scroll());
    assert_eq!(view.max_scroll(), 20);
    assert_eq!(view.scroll(), 20);
    assert_eq!(view.visible().first().map(String::as_str), Some("line 20"));
    assert_eq!(view.visible().len(), 10);
}

#[test]
fn reload_after_growth_follows_the_tail() {
    let mut view = view(30, 10);
    let source = view.source().cloned().unwrap();
    view.load((0..45).map(|i| i.to_string()).collect(), source);
    assert_eq!(view.scroll(), 35);
}

#[test]
fn reload_keeps_position_when_not_following() {
    let mut view = view(30, 10);
    view.home();
    let source = view.source().cloned().unwrap();
    view.load((0..45).map(|i| i.to_string()).collect(), source);
    assert_eq!(view.scroll(), 0);
    assert!(!view.auto_scroll());
}

#[test]
fn short_buffer_has_no_scroll_range() {
    let view = view(3, 10);
    assert_eq!(view.max_scroll(), 0);
    assert_eq!(view.scroll(), 0);
    assert_eq!(view.visible().len(), 3);
}

#[test]
fn scrolling_up_disables_auto_and_down_to_max_restores_it() {
    let mut view = view(30, 10);
    view.scroll_up();
    assert_eq!(view.scroll(), 19);
    assert!(!view.auto_scroll());

    view.scroll_down();
    assert_eq!(view.scroll(), 20);
    assert!(view.auto_scroll());
}

#[test]
fn scroll_up_at_top_changes_nothing() {
    let mut view = view(30, 10);
    view.home();
    view.scroll_up();
    assert_eq!(view.scroll(), 0);
}

#[parameterized(
    page_up_from_tail = { 20, true, 10, false },
    page_up_clamps_at_top = { 4, true, 0, false },
    page_down_clamps_at_max = { 15, false, 20, true },
    page_down_mid_buffer = { 2, false, 12, false },
)]
fn paging(start: usize, up: bool, expected: usize, auto: bool) {
    let mut view = view(30, 10);
    view.home();
    for _ in 0..start {
        view.scroll_down();
    }
    if up {
        view.page_up();
    } else {
        view.page_down();
    }
    assert_eq!(view.scroll(), expected);
    assert_eq!(view.auto_scroll(), auto);
}

#[test]
fn home_and_end() {
    let mut view = view(30, 10);
    view.home();
    assert_eq!(view.scroll(), 0);
    assert!(!view.auto_scroll());
    view.end();
    assert_eq!(view.scroll(), 20);
    assert!(view.auto_scroll());
}

#[test]
fn horizontal_offset_never_goes_negative() {
    let mut view = view(3, 10);
    view.scroll_left();
    assert_eq!(view.h_offset(), 0);
    view.scroll_right();
    view.scroll_right();
    view.scroll_left();
    assert_eq!(view.h_offset(), 1);
}

#[test]
fn follow_tail_resets_offset_and_pins() {
    let mut view = view(30, 10);
    view.home();
    view.scroll_right();
    view.follow_tail();
    assert_eq!(view.h_offset(), 0);
    assert_eq!(view.scroll(), 20);
    assert!(view.auto_scroll());
}

#[test]
fn clear_empties_the_buffer() {
    let mut view = view(30, 10);
    view.clear();
    assert!(view.lines().is_empty());
    assert!(view.source().is_none());
    assert_eq!(view.scroll(), 0);
}

fn searchable() -> OutputView {
    let mut view = OutputView::new();
    view.set_rows(2);
    let lines = ["foo", "bar", "FOO", "baz"].map(String::from).to_vec();
    view.load(lines, OutputSource { path: PathBuf::from("x.log"), replayed_from: None });
    view
}

fn search(view: &mut OutputView, text: &str) {
    view.search_start();
    for c in text.chars() {
        view.search_input(c);
    }
    view.search_commit();
}

#[test]
fn search_is_case_insensitive_and_lands_on_first_match() {
    let mut view = searchable();
    search(&mut view, "foo");
    assert_eq!(view.matches(), &[0, 2]);
    assert_eq!(view.current_match(), Some(0));
    assert_eq!(view.scroll(), 0);
    assert!(!view.auto_scroll());
    assert!(!view.is_searching());
}

#[test]
fn next_cycles_forward() {
    let mut view = searchable();
    search(&mut view, "foo");
    view.next_match();
    assert_eq!(view.scroll(), 2);
    view.next_match();
    assert_eq!(view.scroll(), 0);
}

#[test]
fn prev_cycles_backward() {
    let mut view = searchable();
    search(&mut view, "foo");
    view.prev_match();
    assert_eq!(view.scroll(), 2);
    view.prev_match();
    assert_eq!(view.scroll(), 0);
}

#[test]
fn editing_does_not_search_until_commit() {
    let mut view = searchable();
    view.search_start();
    view.search_input('b');
    view.search_input('x');
    view.search_backspace();
    assert_eq!(view.search_text(), "b");
    assert!(view.matches().is_empty());
    view.search_commit();
    assert_eq!(view.matches(), &[1, 3]);
}

#[test]
fn cancel_keeps_previous_matches() {
    let mut view = searchable();
    search(&mut view, "bar");
    view.search_cancel();
    assert_eq!(view.matches(), &[1]);
}

#[test]
fn starting_a_search_clears_old_matches() {
    let mut view = searchable();
    search(&mut view, "bar");
    view.search_start();
    assert!(view.is_searching());
    assert!(view.matches().is_empty());
    assert_eq!(view.current_match(), None);
}

#[test]
fn reloading_the_same_log_keeps_matches() {
    let mut view = searchable();
    search(&mut view, "foo");
    let lines = ["foo", "bar", "FOO", "baz", "foo again"].map(String::from).to_vec();
    view.load(lines, OutputSource { path: PathBuf::from("x.log"), replayed_from: None });
    assert_eq!(view.matches(), &[0, 2]);
    assert_eq!(view.current_match(), Some(0));
}

#[test]
fn loading_another_log_drops_matches() {
    let mut view = searchable();
    search(&mut view, "foo");
    view.load(vec!["other".to_string()], OutputSource { path: PathBuf::from("y.log"), replayed_from: None });
    assert!(view.matches().is_empty());
    assert_eq!(view.current_match(), None);
    assert_eq!(view.search_text(), "");

    view.next_match();
    assert_eq!(view.scroll(), 0);
}

#[test]
fn clearing_drops_matches() {
    let mut view = searchable();
    search(&mut view, "bar");
    view.clear();
    assert!(view.matches().is_empty());
}

#[test]
fn navigation_without_matches_is_a_no_op() {
    let mut view = searchable();
    search(&mut view, "zzz");
    let before = view.scroll();
    view.next_match();
    view.prev_match();
    assert_eq!(view.scroll(), before);
    assert_eq!(view.current_match(), None);
}

#[parameterized(
    empty_needle = { "", &[] },
    mixed_case = { "BaR", &[1] },
    substring = { "a", &[1, 3] },
)]
fn find_matches_cases(needle: &str, expected: &[usize]) {
    let lines = ["foo", "bar", "FOO", "baz"].map(String::from);
    assert_eq!(find_matches(&lines, needle), expected);
}
