// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Container runtime adapters for dvbx.
//!
//! Everything that talks to a container engine goes through
//! [`ContainerRuntime`]. [`DockerRuntime`] shells out to the engine CLI;
//! [`FakeRuntime`] records calls for tests.

pub mod runtime;

pub use runtime::{ContainerRuntime, DockerRuntime, ErrorCategory, RuntimeError};

#[cfg(any(test, feature = "test-support"))]
pub use runtime::{FakeRuntime, RuntimeCall};
