// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::status::TestStatus;

fn names(list: &TestList) -> Vec<String> {
    list.records().iter().map(|r| r.name().to_string()).collect()
}

fn list_of(names: &[&str]) -> TestList {
    TestList::from_descriptors(
        names.iter().map(|n| TestDescriptor::builder().name(*n).build()),
    )
}

#[test]
fn from_descriptors_preserves_order() {
    let list = list_of(&["TestC", "TestA", "TestB"]);
    assert_eq!(names(&list), ["TestC", "TestA", "TestB"]);
    assert_eq!(list.len(), 3);
}

#[test]
fn clones_share_the_same_records() {
    let list = list_of(&["TestA", "TestB"]);
    let other = list.clone();
    let records = list.records();
    assert!(other.swap(&records[0], &records[1]));
    assert_eq!(names(&list), ["TestB", "TestA"]);
}

#[test]
fn swap_with_absent_record_is_noop() {
    let list = list_of(&["TestA", "TestB"]);
    let stranger = Arc::new(TestRecord::new(TestDescriptor::builder().build()));
    let records = list.records();
    assert!(!list.swap(&records[0], &stranger));
    assert_eq!(names(&list), ["TestA", "TestB"]);
}

#[test]
fn replace_returns_previous_generation() {
    let list = list_of(&["TestA"]);
    let old = list.replace(records_for([TestDescriptor::builder().name("TestZ").build()]));
    assert_eq!(old.len(), 1);
    assert_eq!(old[0].name(), "TestA");
    assert_eq!(names(&list), ["TestZ"]);
}

#[test]
fn position_is_by_identity() {
    let list = list_of(&["TestA", "TestA"]);
    let records = list.records();
    assert_eq!(list.position(&records[1]), Some(1));
}

#[test]
fn sort_is_stable() {
    let list = list_of(&["TestB", "TestA", "TestC"]);
    let records = list.records();
    records[2].set_selected(true);
    records[0].set_selected(true);
    list.sort_by_key(|r| std::cmp::Reverse(r.is_selected()));
    assert_eq!(names(&list), ["TestB", "TestC", "TestA"]);
}

#[test]
fn find_map_scans_in_order() {
    let list = list_of(&["TestA", "TestB", "TestC"]);
    let found = list.find_map(|r| (r.name() != "TestA").then(|| r.name().to_string()));
    assert_eq!(found.as_deref(), Some("TestB"));
    assert_eq!(list.count(|r| r.status() == TestStatus::Idle), 3);
}
