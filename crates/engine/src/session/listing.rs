// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filtered view and sort keys over the shared test list.

use std::cmp::Reverse;
use std::sync::Arc;

use trun_core::TestRecord;

use super::intent::SortMode;

/// Records whose name contains `filter`, ignoring case, in list order.
pub fn filter_records(records: Vec<Arc<TestRecord>>, filter: &str) -> Vec<Arc<TestRecord>> {
    if filter.is_empty() {
        return records;
    }
    let filter = filter.to_lowercase();
    records.into_iter().filter(|r| r.name().to_lowercase().contains(&filter)).collect()
}

/// Sort key for `mode`: primary order first, then name, then package.
pub fn sort_key(mode: SortMode, record: &TestRecord) -> (Reverse<u8>, String, String) {
    let rank = match mode {
        SortMode::Name => 0,
        SortMode::Selection => u8::from(record.is_selected()),
        SortMode::Status => record.status() as u8,
    };
    let descriptor = record.descriptor();
    (Reverse(rank), descriptor.name.clone(), descriptor.package.clone())
}

/// Index of `record` in `view`, by identity.
pub fn position_of(view: &[Arc<TestRecord>], record: &Arc<TestRecord>) -> Option<usize> {
    view.iter().position(|r| Arc::ptr_eq(r, record))
}

#[cfg(test)]
#[path = "listing_tests.rs"]
mod tests;
