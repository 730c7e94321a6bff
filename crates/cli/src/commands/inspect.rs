// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ps`, `logs` and `attach`: looking at running environments.

use super::{exit_with, runtime_error};
use crate::exit_error::ExitError;
use crate::output;
use dvbx_adapters::ContainerRuntime;
use dvbx_config::load_config;
use dvbx_core::{container_name, name_filter, name_filter_for};
use dvbx_engine::FAILURE_EXIT_CODE;
use std::path::Path;

pub async fn ps<R: ContainerRuntime>(runtime: &R) -> anyhow::Result<()> {
    let listing = runtime.ps(&name_filter()).await.map_err(runtime_error)?;
    println!("{listing}");
    Ok(())
}

pub async fn logs<R: ContainerRuntime>(
    runtime: &R,
    config_path: &Path,
    service: Option<&str>,
) -> anyhow::Result<()> {
    let name = target_name(config_path, service)?;
    let Some(id) = find_container(runtime, &name).await? else {
        return report_not_running(&name);
    };
    exit_with(runtime.follow_logs(&id).await.map_err(runtime_error)?)
}

pub async fn attach<R: ContainerRuntime>(
    runtime: &R,
    config_path: &Path,
    service: Option<&str>,
) -> anyhow::Result<()> {
    let name = target_name(config_path, service)?;
    let Some(id) = find_container(runtime, &name).await? else {
        return report_not_running(&name);
    };
    exit_with(runtime.attach(&id).await.map_err(runtime_error)?)
}

/// Logical name of the addressed container: the service, or the project.
pub fn target_name(config_path: &Path, service: Option<&str>) -> anyhow::Result<String> {
    if let Some(service) = service {
        return Ok(service.to_string());
    }
    let config =
        load_config(config_path).map_err(|e| ExitError::new(FAILURE_EXIT_CODE, e.to_string()))?;
    Ok(config.name().to_string())
}

/// Id of the container for a logical name, if one exists.
pub async fn find_container<R: ContainerRuntime>(
    runtime: &R,
    name: &str,
) -> anyhow::Result<Option<String>> {
    let ids = runtime.list(&name_filter_for(name)).await.map_err(runtime_error)?;
    Ok(ids.into_iter().next())
}

fn report_not_running(name: &str) -> anyhow::Result<()> {
    output::warning(&format!("Container {} is not running", container_name(name)));
    Ok(())
}

#[cfg(test)]
#[path = "inspect_tests.rs"]
mod tests;
