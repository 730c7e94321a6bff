// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dvbx-engine: environment lifecycle for a single task run
//!
//! The [`Orchestrator`] drives a run through its phases: it resolves and
//! validates the config, starts every service container, starts the primary
//! container linked to them, executes the task inside it and finally sweeps
//! every `dvbx_` container away.

mod environment;
mod error;
mod event;
pub mod image;
pub mod invocation;
pub mod network;
mod orchestrator;
mod phase;
pub mod tasks;
mod teardown;

pub use environment::{RunningEnvironment, RunningEnvironmentSet};
pub use error::{CleanupError, OrchestratorError, ServiceFailure, StartError};
pub use event::RunEvent;
pub use image::{resolve_image, ImageAction, ImageError, ImageResolution};
pub use invocation::{InvocationDescriptor, RestartFlag, SoftPolicyWarning};
pub use orchestrator::{Orchestrator, RunReport, RunRequest, FAILURE_EXIT_CODE, INTERRUPTED_EXIT_CODE};
pub use phase::{Outcome, Phase};
pub use tasks::{pipeline, TaskError, TaskPipeline};
pub use teardown::Teardown;
