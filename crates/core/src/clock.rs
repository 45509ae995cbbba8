// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling.
//!
//! Two readings are exposed: a monotonic [`Instant`] for elapsed-time
//! displays, and a local wall-clock reading used to stamp log file names.

use chrono::{Local, NaiveDate, NaiveDateTime, TimeDelta};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A clock that provides the current time
pub trait Clock: Clone + Send + Sync + 'static {
    /// Monotonic reading, used for queued/running/finished durations.
    fn now(&self) -> Instant;
    /// Local wall-clock reading, used for log file stamps.
    fn wall(&self) -> NaiveDateTime;
}

/// Real system clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

struct FakeTime {
    instant: Instant,
    wall: NaiveDateTime,
}

/// Fake clock for testing with controllable time.
///
/// Both readings move together on [`FakeClock::advance`]. The wall clock
/// starts at 2026-01-30 08:14:09 so log names are stable across machines.
#[derive(Clone)]
pub struct FakeClock {
    inner: Arc<Mutex<FakeTime>>,
}

impl FakeClock {
    pub fn new() -> Self {
        let wall = NaiveDate::from_ymd_opt(2026, 1, 30)
            .and_then(|d| d.and_hms_opt(8, 14, 9))
            .unwrap_or_default();
        Self { inner: Arc::new(Mutex::new(FakeTime { instant: Instant::now(), wall })) }
    }

    /// Advance both readings by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut time = self.inner.lock();
        time.instant += duration;
        time.wall += TimeDelta::from_std(duration).unwrap_or(TimeDelta::zero());
    }

    /// Pin the wall clock to a specific local time
    pub fn set_wall(&self, wall: NaiveDateTime) {
        self.inner.lock().wall = wall;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.inner.lock().instant
    }

    fn wall(&self) -> NaiveDateTime {
        self.inner.lock().wall
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
