// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Container runtime adapter.

mod categorize;
mod docker;

pub use categorize::ErrorCategory;
pub use docker::{DockerRuntime, DEFAULT_RUNTIME_PROGRAM};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::Path;
use thiserror::Error;

/// Errors from container runtime operations
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to exec {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{op} failed: {category}: {stderr}")]
    Command { op: String, category: ErrorCategory, stderr: String },
}

impl RuntimeError {
    /// Build a command failure, classifying the engine's stderr.
    pub fn command(op: impl Into<String>, stderr: impl Into<String>) -> Self {
        let stderr = stderr.into();
        let category = ErrorCategory::from_stderr(&stderr);
        RuntimeError::Command { op: op.into(), category, stderr: stderr.trim().to_string() }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            RuntimeError::Spawn { .. } => ErrorCategory::Other,
            RuntimeError::Command { category, .. } => *category,
        }
    }

    /// Human-readable message for the terminal.
    pub fn user_message(&self) -> String {
        match self {
            RuntimeError::Spawn { program, source } => {
                format!("Could not run '{}': {}", program, source)
            }
            RuntimeError::Command { category: ErrorCategory::Other, stderr, .. }
                if !stderr.is_empty() =>
            {
                stderr.clone()
            }
            RuntimeError::Command { category, .. } => category.message().to_string(),
        }
    }
}

/// Adapter for a container engine.
///
/// Every container the orchestrator creates goes through `run_detached`;
/// the argument vectors are built by the engine crate and passed verbatim.
#[async_trait]
pub trait ContainerRuntime: Clone + Send + Sync + 'static {
    /// Create and start a detached container. `args` follow `run -d`.
    /// Returns the new container id.
    async fn run_detached(&self, args: &[String]) -> Result<String, RuntimeError>;

    /// Ids of all containers (running or stopped) matching a filter.
    async fn list(&self, filter: &str) -> Result<Vec<String>, RuntimeError>;

    async fn stop(&self, ids: &[String]) -> Result<(), RuntimeError>;

    async fn remove(&self, ids: &[String]) -> Result<(), RuntimeError>;

    async fn image_exists(&self, image: &str) -> bool;

    /// Creation time of a local image, if it exists and reports one.
    async fn image_created(&self, image: &str) -> Option<DateTime<Utc>>;

    async fn pull(&self, image: &str) -> Result<(), RuntimeError>;

    /// Build `dockerfile` with `context` as the build context and tag it.
    async fn build(&self, context: &Path, dockerfile: &Path, tag: &str)
        -> Result<(), RuntimeError>;

    async fn create_network(&self, name: &str) -> Result<(), RuntimeError>;

    /// Run a command inside a running container with inherited stdio.
    /// Returns the command's exit status.
    async fn exec(&self, id: &str, command: &[String], interactive: bool)
        -> Result<i32, RuntimeError>;

    /// Stream a container's logs until it exits or the user interrupts.
    async fn follow_logs(&self, id: &str) -> Result<i32, RuntimeError>;

    /// Attach the terminal to a container's main process.
    async fn attach(&self, id: &str) -> Result<i32, RuntimeError>;

    /// Tabular listing of containers matching a filter.
    async fn ps(&self, filter: &str) -> Result<String, RuntimeError>;
}

#[cfg(any(test, feature = "test-support"))]
mod fake;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeRuntime, RuntimeCall};

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
