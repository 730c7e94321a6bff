// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dvbx <task>`: a full environment run.

use crate::exit_error::ExitError;
use crate::output;
use dvbx_adapters::ContainerRuntime;
use dvbx_core::SystemClock;
use dvbx_engine::{Orchestrator, OrchestratorError, RunReport, RunRequest};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub async fn execute<R: ContainerRuntime>(
    runtime: R,
    cancel: CancellationToken,
    request: RunRequest,
) -> anyhow::Result<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(output::print_events(rx));

    let report = Orchestrator::new(runtime, SystemClock)
        .with_cancellation(cancel)
        .with_events(tx)
        .run(request)
        .await;
    // The orchestrator and its sender are gone; drain what is left.
    let _ = printer.await;

    finish(&report)
}

/// Print what went wrong and turn the report into the command result.
pub fn finish(report: &RunReport) -> anyhow::Result<()> {
    for line in failure_lines(report) {
        output::error(&line);
    }
    if matches!(report.failure, Some(OrchestratorError::Cancelled)) {
        output::note("Interrupted, environment removed");
    }
    if report.exit_code == 0 {
        Ok(())
    } else {
        Err(ExitError::silent(report.exit_code).into())
    }
}

/// One line per problem: validation issues and failed services are listed
/// individually.
pub fn failure_lines(report: &RunReport) -> Vec<String> {
    let mut lines = Vec::new();
    match &report.failure {
        Some(OrchestratorError::Validation(e)) => {
            lines.extend(e.issues.iter().map(ToString::to_string));
        }
        Some(OrchestratorError::Services(failures)) => {
            lines.extend(failures.iter().map(ToString::to_string));
        }
        Some(OrchestratorError::Cancelled) | None => {}
        Some(other) => lines.push(other.to_string()),
    }
    if let Some(e) = &report.cleanup_failure {
        lines.push(e.to_string());
    }
    lines
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
