// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::image::ImageError;
use crate::tasks::TaskError;
use dvbx_adapters::RuntimeError;
use dvbx_config::{ConfigError, ValidationError};
use std::fmt;
use thiserror::Error;

/// Failure to bring up one container
#[derive(Debug, Error)]
pub enum StartError {
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error("{}", .0.user_message())]
    Runtime(#[from] RuntimeError),
}

/// A service that did not start
#[derive(Debug)]
pub struct ServiceFailure {
    pub service: String,
    pub error: StartError,
}

impl fmt::Display for ServiceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "service '{}' failed to start: {}", self.service, self.error)
    }
}

/// Errors that end a run before its task produced a status
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Task(#[from] TaskError),
    #[error("{}", join_lines(.0))]
    Services(Vec<ServiceFailure>),
    #[error("primary environment failed to start: {0}")]
    Primary(StartError),
    #[error("failed to run task: {}", .0.user_message())]
    Exec(RuntimeError),
    #[error("interrupted")]
    Cancelled,
}

fn join_lines(failures: &[ServiceFailure]) -> String {
    failures.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}

/// Errors from the teardown sweep
#[derive(Debug, Error)]
pub enum CleanupError {
    #[error("cleanup failed listing containers: {0}")]
    List(#[source] RuntimeError),
    #[error("cleanup failed stopping containers: {0}")]
    Stop(#[source] RuntimeError),
    #[error("cleanup failed removing containers: {0}")]
    Remove(#[source] RuntimeError),
}
