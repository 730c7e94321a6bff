// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::exit_error::ExitError;
use crate::output;
use dvbx_adapters::ContainerRuntime;
use dvbx_core::SystemClock;
use dvbx_engine::{Orchestrator, FAILURE_EXIT_CODE};

/// Stop and remove every dvbx container.
pub async fn stop<R: ContainerRuntime>(runtime: R) -> anyhow::Result<()> {
    match Orchestrator::new(runtime, SystemClock).teardown().await {
        Ok(0) => output::note("No dvbx containers found"),
        Ok(removed) => output::note(&format!("Removed {removed} container(s)")),
        Err(e) => return Err(ExitError::new(FAILURE_EXIT_CODE, e.to_string()).into()),
    }
    Ok(())
}

#[cfg(test)]
#[path = "stop_tests.rs"]
mod tests;
