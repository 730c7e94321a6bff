// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dvbx shell [service]`

use super::inspect::find_container;
use super::{exit_with, run, runtime_error, Project};
use crate::exit_error::ExitError;
use dvbx_adapters::ContainerRuntime;
use dvbx_config::{load_config, SHELL_TASK};
use dvbx_engine::{RunRequest, FAILURE_EXIT_CODE};
use indexmap::IndexMap;
use tokio_util::sync::CancellationToken;

/// Open the configured shell in a running container, or start a full run
/// whose task is the shell.
pub async fn shell<R: ContainerRuntime>(
    runtime: R,
    cancel: CancellationToken,
    project: &Project,
    service: Option<&str>,
    variables: IndexMap<String, String>,
) -> anyhow::Result<()> {
    let config = load_config(&project.config_path)
        .map_err(|e| ExitError::new(FAILURE_EXIT_CODE, e.to_string()))?;
    let name = service.unwrap_or(config.name());

    if let Some(id) = find_container(&runtime, name).await? {
        tracing::debug!(container = %id, "exec into running container");
        let command = vec!["sh".to_string(), "-c".to_string(), config.shell().to_string()];
        let code = runtime.exec(&id, &command, true).await.map_err(runtime_error)?;
        return exit_with(code);
    }

    let request = RunRequest::new(&project.config_path, SHELL_TASK, &project.dir).variables(variables);
    run::execute(runtime, cancel, request).await
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;
