// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The ordered test list shared by the session and the scheduler.
//!
//! Cloning a [`TestList`] clones the handle, not the records: every clone
//! observes the same order and the same records. The list order is the
//! display order and the admission order.

use crate::descriptor::TestDescriptor;
use crate::record::TestRecord;
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct TestList {
    items: Arc<RwLock<Vec<Arc<TestRecord>>>>,
}

impl TestList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build idle records for a discovery result, preserving its order.
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = TestDescriptor>) -> Self {
        let list = Self::new();
        list.replace(records_for(descriptors));
        list
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Handles to the current records, in list order.
    pub fn records(&self) -> Vec<Arc<TestRecord>> {
        self.items.read().clone()
    }

    /// Swap in a new generation of records and return the previous one.
    ///
    /// Runs launched from the previous generation keep their own record
    /// handles and finish normally; they just stop being reachable here.
    pub fn replace(&self, records: Vec<Arc<TestRecord>>) -> Vec<Arc<TestRecord>> {
        std::mem::replace(&mut *self.items.write(), records)
    }

    /// Index of a record, by identity.
    pub fn position(&self, record: &Arc<TestRecord>) -> Option<usize> {
        self.items.read().iter().position(|r| Arc::ptr_eq(r, record))
    }

    /// Exchange the positions of two records. No-op if either is absent.
    pub fn swap(&self, a: &Arc<TestRecord>, b: &Arc<TestRecord>) -> bool {
        let mut items = self.items.write();
        let ia = items.iter().position(|r| Arc::ptr_eq(r, a));
        let ib = items.iter().position(|r| Arc::ptr_eq(r, b));
        match (ia, ib) {
            (Some(ia), Some(ib)) => {
                items.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// Stable sort in place by a key read once per record.
    ///
    /// Keys are captured up front so that a status flipping mid-sort
    /// cannot make the comparison inconsistent.
    pub fn sort_by_key<K, F>(&self, key: F)
    where
        K: Ord,
        F: FnMut(&Arc<TestRecord>) -> K,
    {
        self.items.write().sort_by_cached_key(key);
    }

    /// First record, in list order, for which `f` returns `Some`.
    ///
    /// Holds the list's read lock for the scan; `f` must not call back into
    /// anything that writes the list.
    pub fn find_map<T>(&self, f: impl FnMut(&Arc<TestRecord>) -> Option<T>) -> Option<T> {
        self.items.read().iter().find_map(f)
    }

    pub fn count(&self, mut f: impl FnMut(&TestRecord) -> bool) -> usize {
        self.items.read().iter().filter(|r| f(r)).count()
    }
}

/// Wrap descriptors into fresh idle records.
pub fn records_for(descriptors: impl IntoIterator<Item = TestDescriptor>) -> Vec<Arc<TestRecord>> {
    descriptors.into_iter().map(|d| Arc::new(TestRecord::new(d))).collect()
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
