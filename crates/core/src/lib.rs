// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dvbx-core: naming, time and small shared helpers for the dvbx task runner

pub mod macros;

pub mod clock;
pub mod namespace;
pub mod time_fmt;

#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
pub use clock::{Clock, SystemClock};
pub use namespace::{container_name, image_tag, name_filter, name_filter_for, NAMESPACE_PREFIX};
pub use time_fmt::format_duration;
