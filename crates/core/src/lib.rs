// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! trun-core: test identity, per-test state and the shared test list

pub mod macros;

pub mod clock;
pub mod descriptor;
pub mod list;
pub mod record;
pub mod status;
pub mod time_fmt;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
#[cfg(any(test, feature = "test-support"))]
pub use descriptor::TestDescriptorBuilder;
pub use descriptor::TestDescriptor;
pub use list::{records_for, TestList};
pub use record::{RecordSnapshot, TestRecord};
pub use status::TestStatus;
pub use time_fmt::format_duration;
