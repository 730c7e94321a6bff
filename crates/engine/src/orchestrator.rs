// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run lifecycle: config → services → primary → task → cleanup.

use crate::environment::{RunningEnvironment, RunningEnvironmentSet};
use crate::error::{CleanupError, OrchestratorError, ServiceFailure, StartError};
use crate::event::RunEvent;
use crate::image::resolve_image;
use crate::invocation::{primary_invocation, service_invocation, InvocationDescriptor};
use crate::network::create_networks;
use crate::phase::{Outcome, Phase};
use crate::tasks::{pipeline, TaskPipeline};
use crate::teardown::Teardown;
use dvbx_adapters::ContainerRuntime;
use dvbx_config::{load_config, validate, ResolvedConfig, ServiceDef};
use dvbx_core::Clock;
use futures_util::future::join_all;
use indexmap::IndexMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Exit status for any failure outside the task itself
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Exit status when a run was interrupted before its task reported a status
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// One invocation of a task
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub config_path: PathBuf,
    pub task: String,
    pub variables: IndexMap<String, String>,
    /// Host directory mounted at the primary's workdir
    pub host_dir: PathBuf,
    pub interactive: bool,
}

impl RunRequest {
    pub fn new(
        config_path: impl Into<PathBuf>,
        task: impl Into<String>,
        host_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config_path: config_path.into(),
            task: task.into(),
            variables: IndexMap::new(),
            host_dir: host_dir.into(),
            interactive: true,
        }
    }

    dvbx_core::setters! {
        set {
            variables: IndexMap<String, String>,
            interactive: bool,
        }
    }
}

/// Result of a run
#[derive(Debug, Default)]
pub struct RunReport {
    pub exit_code: i32,
    /// Every phase entered, in order, ending with `Terminal`
    pub phases: Vec<Phase>,
    pub task_duration: Option<Duration>,
    /// What ended the run early, if anything
    pub failure: Option<OrchestratorError>,
    pub cleanup_failure: Option<CleanupError>,
    pub environments: RunningEnvironmentSet,
}

impl RunReport {
    fn enter(&mut self, phase: Phase) {
        tracing::debug!(%phase, "entering phase");
        self.phases.push(phase);
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phases.last() {
            Some(Phase::Terminal(outcome)) => Some(*outcome),
            _ => None,
        }
    }

    fn finish(
        mut self,
        result: Result<i32, OrchestratorError>,
        cleanup_failure: Option<CleanupError>,
    ) -> Self {
        let (exit_code, failure) = match result {
            Ok(code) if cleanup_failure.is_none() => (code, None),
            Ok(_) => (FAILURE_EXIT_CODE, None),
            Err(OrchestratorError::Cancelled) => {
                (INTERRUPTED_EXIT_CODE, Some(OrchestratorError::Cancelled))
            }
            Err(e) => (FAILURE_EXIT_CODE, Some(e)),
        };
        let outcome = if exit_code == 0 && failure.is_none() && cleanup_failure.is_none() {
            Outcome::Success
        } else {
            Outcome::Failure
        };
        self.exit_code = exit_code;
        self.failure = failure;
        self.cleanup_failure = cleanup_failure;
        self.enter(Phase::Terminal(outcome));
        self
    }
}

/// Config-derived inputs of a run, computed before anything starts
struct Prepared {
    config: ResolvedConfig,
    task: TaskPipeline,
    chain: String,
    base_dir: PathBuf,
}

/// Drives one run through its lifecycle against a container runtime
pub struct Orchestrator<R, C> {
    runtime: R,
    clock: C,
    cancel: CancellationToken,
    events: Option<mpsc::UnboundedSender<RunEvent>>,
}

impl<R, C> Orchestrator<R, C>
where
    R: ContainerRuntime,
    C: Clock,
{
    pub fn new(runtime: R, clock: C) -> Self {
        Self { runtime, clock, cancel: CancellationToken::new(), events: None }
    }

    /// Use an externally owned token, e.g. one cancelled on SIGINT.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_events(mut self, events: mpsc::UnboundedSender<RunEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Execute a run to completion.
    ///
    /// Once services start, every exit path passes through cleanup exactly
    /// once. Failures before that point never touch the runtime.
    pub async fn run(&self, request: RunRequest) -> RunReport {
        let span = tracing::info_span!("run", task = %request.task);
        self.run_inner(request).instrument(span).await
    }

    /// Remove every container in the namespace.
    pub async fn teardown(&self) -> Result<usize, CleanupError> {
        let removed = Teardown::new(&self.runtime).sweep().await?;
        if removed > 0 {
            self.emit(RunEvent::CleanedUp { removed });
        }
        Ok(removed)
    }

    async fn run_inner(&self, request: RunRequest) -> RunReport {
        let mut report = RunReport::default();
        let prepared = match self.prepare(&request, &mut report) {
            Ok(prepared) => prepared,
            Err(e) => return report.finish(Err(e), None),
        };

        let mut environments = RunningEnvironmentSet::new();
        let result =
            self.run_environments(&request, &prepared, &mut report, &mut environments).await;
        report.environments = environments;

        report.enter(Phase::CleaningUp);
        let cleanup_failure = match self.teardown().await {
            Ok(_) => None,
            Err(e) => {
                tracing::error!(error = %e, "cleanup failed");
                Some(e)
            }
        };
        report.finish(result, cleanup_failure)
    }

    fn prepare(
        &self,
        request: &RunRequest,
        report: &mut RunReport,
    ) -> Result<Prepared, OrchestratorError> {
        report.enter(Phase::ResolvingConfig);
        let config = load_config(&request.config_path)?;

        report.enter(Phase::Validating);
        validate(&config)?;
        let task = pipeline(Some(&config.tasks), &request.task, &request.variables)?;
        let chain = task.chain(config.before.as_deref(), config.after.as_deref());
        self.checkpoint()?;

        let base_dir = request
            .config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Prepared { config, task, chain, base_dir })
    }

    async fn run_environments(
        &self,
        request: &RunRequest,
        prepared: &Prepared,
        report: &mut RunReport,
        environments: &mut RunningEnvironmentSet,
    ) -> Result<i32, OrchestratorError> {
        report.enter(Phase::StartingServices);
        self.checkpoint()?;
        let networks = prepared.config.declared_networks();
        self.cancellable(create_networks(&self.runtime, &networks)).await?;
        self.start_services(prepared, environments).await?;

        report.enter(Phase::StartingPrimary);
        self.checkpoint()?;
        let links = environments.links();
        let primary = self
            .cancellable(self.start_primary(prepared, &request.host_dir, &links))
            .await?
            .map_err(OrchestratorError::Primary)?;
        environments.set_primary(primary.clone());

        report.enter(Phase::RunningTasks);
        self.checkpoint()?;
        let task = &prepared.task.name;
        self.emit(RunEvent::TaskStarted { task: task.clone() });
        let command = vec!["sh".to_string(), "-c".to_string(), prepared.chain.clone()];
        let started = self.clock.now();
        let exit_code = self
            .cancellable(self.runtime.exec(&primary.id, &command, request.interactive))
            .await?
            .map_err(OrchestratorError::Exec)?;
        let duration = self.clock.now().saturating_duration_since(started);

        report.task_duration = Some(duration);
        tracing::info!(
            task = %task,
            exit_code,
            duration_ms = duration.as_millis() as u64,
            "task finished"
        );
        self.emit(RunEvent::TaskFinished { task: task.clone(), exit_code, duration });
        Ok(exit_code)
    }

    /// Start every service concurrently and wait for all of them to settle.
    async fn start_services(
        &self,
        prepared: &Prepared,
        environments: &mut RunningEnvironmentSet,
    ) -> Result<(), OrchestratorError> {
        let services = &prepared.config.services;
        if services.is_empty() {
            return Ok(());
        }

        let starts = services.iter().map(|(name, def)| async move {
            (name.clone(), self.start_service(name, def, &prepared.base_dir).await)
        });
        let results = self.cancellable(join_all(starts)).await?;

        let mut failures = Vec::new();
        for (service, result) in results {
            match result {
                Ok(env) => environments.add_service(env),
                Err(error) => {
                    tracing::error!(service = %service, error = %error, "service failed to start");
                    failures.push(ServiceFailure { service, error });
                }
            }
        }
        if !failures.is_empty() {
            return Err(OrchestratorError::Services(failures));
        }

        let names = environments.services().iter().map(|s| s.name.clone()).collect();
        self.emit(RunEvent::ServicesStarted { names });
        Ok(())
    }

    async fn start_service(
        &self,
        name: &str,
        def: &ServiceDef,
        base_dir: &Path,
    ) -> Result<RunningEnvironment, StartError> {
        let resolution = resolve_image(&self.runtime, name, def, base_dir).await?;
        let invocation = service_invocation(name, def, &resolution.image);
        self.emit(RunEvent::ImageReady { name: name.to_string(), resolution });
        self.start(name, invocation).await
    }

    async fn start_primary(
        &self,
        prepared: &Prepared,
        host_dir: &Path,
        links: &[String],
    ) -> Result<RunningEnvironment, StartError> {
        let config = &prepared.config;
        let name = config.name();
        let resolution = resolve_image(&self.runtime, name, &config.primary, &prepared.base_dir).await?;
        let invocation = primary_invocation(config, links, &resolution.image, host_dir);
        self.emit(RunEvent::ImageReady { name: name.to_string(), resolution });

        let env = self.start(name, invocation).await?;
        self.emit(RunEvent::PrimaryStarted { container: env.container.clone() });
        Ok(env)
    }

    async fn start(
        &self,
        name: &str,
        invocation: InvocationDescriptor,
    ) -> Result<RunningEnvironment, StartError> {
        for warning in &invocation.warnings {
            self.emit(RunEvent::PolicyIgnored(warning.clone()));
        }
        let id = self.runtime.run_detached(&invocation.run_args()).await?;
        tracing::info!(name, container = %invocation.name, id = %id, "container started");
        Ok(RunningEnvironment { name: name.to_string(), container: invocation.name, id })
    }

    fn checkpoint(&self) -> Result<(), OrchestratorError> {
        if self.cancel.is_cancelled() {
            return Err(OrchestratorError::Cancelled);
        }
        Ok(())
    }

    /// Race a phase against cancellation.
    async fn cancellable<F: Future>(&self, fut: F) -> Result<F::Output, OrchestratorError> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                tracing::warn!("run interrupted");
                Err(OrchestratorError::Cancelled)
            }
            out = fut => Ok(out),
        }
    }

    fn emit(&self, event: RunEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
