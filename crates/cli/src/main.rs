// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dvbx: run project tasks inside throwaway Docker environments

mod args;
mod color;
mod commands;
mod env;
mod exit_error;
mod output;

use anyhow::Context;
use args::{Cli, Invocation};
use clap::Parser;
use commands::{help, inspect, run, shell, stop, Project};
use dvbx_adapters::DockerRuntime;
use dvbx_config::locate_config;
use dvbx_engine::RunRequest;
use exit_error::ExitError;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let cancel = CancellationToken::new();
    forward_signals(cancel.clone());

    match dispatch(Cli::parse(), cancel).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<ExitError>() {
            Some(exit) => {
                if !exit.message.is_empty() {
                    output::error(&exit.message);
                }
                ExitCode::from(exit.status())
            }
            None => {
                output::error(&format!("{e:#}"));
                ExitCode::FAILURE
            }
        },
    }
}

fn init_logging() {
    let filter = EnvFilter::try_new(env::log_filter())
        .unwrap_or_else(|_| EnvFilter::new(env::DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Turn SIGINT/SIGTERM into cancellation of the current run.
fn forward_signals(cancel: CancellationToken) {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            match signal(SignalKind::terminate()) {
                Ok(mut term) => {
                    tokio::select! {
                        _ = tokio::signal::ctrl_c() => {}
                        _ = term.recv() => {}
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "SIGTERM handler unavailable");
                    let _ = tokio::signal::ctrl_c().await;
                }
            }
        }
        #[cfg(not(unix))]
        {
            let _ = tokio::signal::ctrl_c().await;
        }
        tracing::info!("interrupt received, cancelling run");
        cancel.cancel();
    });
}

async fn dispatch(cli: Cli, cancel: CancellationToken) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("cannot read current directory")?;
    let explicit = cli.file.clone().or_else(env::config_path);
    let project = Project { config_path: locate_config(&cwd, explicit.as_deref()), dir: cwd };
    let runtime = DockerRuntime::new(env::runtime_program());
    tracing::debug!(config = %project.config_path.display(), runtime = runtime.program(), "dispatch");

    match cli.invocation() {
        Invocation::Version => {
            println!("{}", help::version_line());
            Ok(())
        }
        Invocation::Help => {
            help::show(&project.config_path);
            Ok(())
        }
        Invocation::Ps => inspect::ps(&runtime).await,
        Invocation::Stop => stop::stop(runtime).await,
        Invocation::Logs(service) => {
            inspect::logs(&runtime, &project.config_path, service.as_deref()).await
        }
        Invocation::Attach(service) => {
            inspect::attach(&runtime, &project.config_path, service.as_deref()).await
        }
        Invocation::Shell { service, variables } => {
            shell::shell(runtime, cancel, &project, service.as_deref(), variables).await
        }
        Invocation::Run { task, variables } => {
            let request = RunRequest::new(&project.config_path, task, &project.dir).variables(variables);
            run::execute(runtime, cancel, request).await
        }
    }
}
