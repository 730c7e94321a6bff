// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory runtime that records every call.

use super::{ContainerRuntime, RuntimeError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Recorded runtime call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCall {
    Run { name: Option<String>, args: Vec<String> },
    List { filter: String },
    Stop { ids: Vec<String> },
    Remove { ids: Vec<String> },
    Pull { image: String },
    Build { context: PathBuf, dockerfile: PathBuf, tag: String },
    CreateNetwork { name: String },
    Exec { id: String, command: Vec<String>, interactive: bool },
    FollowLogs { id: String },
    Attach { id: String },
    Ps { filter: String },
}

#[derive(Debug, Clone)]
struct FakeContainer {
    id: String,
    name: Option<String>,
}

#[derive(Default)]
struct FakeRuntimeState {
    calls: Vec<RuntimeCall>,
    containers: Vec<FakeContainer>,
    next_id: u64,
    images: HashMap<String, Option<DateTime<Utc>>>,
    networks: HashSet<String>,
    run_failures: HashMap<String, String>,
    run_delays: HashMap<String, Duration>,
    pull_failures: HashMap<String, String>,
    build_failure: Option<String>,
    stop_failure: Option<String>,
    exec_exit_codes: VecDeque<i32>,
    exec_delay: Option<Duration>,
}

/// Fake container runtime for testing.
///
/// Containers live in memory and are matched by name filters the same way
/// the engine does (substring match on `name=`).
#[derive(Clone, Default)]
pub struct FakeRuntime {
    inner: Arc<Mutex<FakeRuntimeState>>,
}

impl FakeRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make an image available locally with no known creation time.
    pub fn with_image(self, image: &str) -> Self {
        self.inner.lock().images.insert(image.to_string(), None);
        self
    }

    /// Make an image available locally, created at `created`.
    pub fn with_image_created(self, image: &str, created: DateTime<Utc>) -> Self {
        self.inner.lock().images.insert(image.to_string(), Some(created));
        self
    }

    /// Fail `run` for the container with this name, reporting `stderr`.
    pub fn fail_run(self, name: &str, stderr: &str) -> Self {
        self.inner.lock().run_failures.insert(name.to_string(), stderr.to_string());
        self
    }

    /// Delay `run` for the container with this name.
    pub fn delay_run(self, name: &str, delay: Duration) -> Self {
        self.inner.lock().run_delays.insert(name.to_string(), delay);
        self
    }

    pub fn fail_pull(self, image: &str, stderr: &str) -> Self {
        self.inner.lock().pull_failures.insert(image.to_string(), stderr.to_string());
        self
    }

    pub fn fail_build(self, stderr: &str) -> Self {
        self.inner.lock().build_failure = Some(stderr.to_string());
        self
    }

    pub fn fail_stop(self, stderr: &str) -> Self {
        self.inner.lock().stop_failure = Some(stderr.to_string());
        self
    }

    /// Queue exit codes returned by successive `exec` calls (default 0).
    pub fn exec_exit_codes(self, codes: impl IntoIterator<Item = i32>) -> Self {
        self.inner.lock().exec_exit_codes.extend(codes);
        self
    }

    /// Make every `exec` take this long before returning.
    pub fn delay_exec(self, delay: Duration) -> Self {
        self.inner.lock().exec_delay = Some(delay);
        self
    }

    /// Seed an existing container, e.g. left over from a crashed run.
    pub fn add_container(&self, name: &str) -> String {
        let mut state = self.inner.lock();
        let id = next_id(&mut state);
        state.containers.push(FakeContainer { id: id.clone(), name: Some(name.to_string()) });
        id
    }

    pub fn calls(&self) -> Vec<RuntimeCall> {
        self.inner.lock().calls.clone()
    }

    /// Names of containers passed to `run`, in call order.
    pub fn run_names(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                RuntimeCall::Run { name, .. } => name,
                _ => None,
            })
            .collect()
    }

    /// Names of containers that currently exist.
    pub fn container_names(&self) -> Vec<String> {
        self.inner.lock().containers.iter().filter_map(|c| c.name.clone()).collect()
    }

    pub fn networks(&self) -> Vec<String> {
        let mut networks: Vec<_> = self.inner.lock().networks.iter().cloned().collect();
        networks.sort();
        networks
    }

    /// Number of `remove` calls that actually removed containers.
    pub fn remove_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, RuntimeCall::Remove { ids } if !ids.is_empty()))
            .count()
    }

    fn record(&self, call: RuntimeCall) {
        self.inner.lock().calls.push(call);
    }
}

fn next_id(state: &mut FakeRuntimeState) -> String {
    state.next_id += 1;
    format!("fake{:04}", state.next_id)
}

fn name_arg(args: &[String]) -> Option<String> {
    args.iter()
        .position(|a| a == "--name")
        .and_then(|i| args.get(i + 1))
        .cloned()
        .or_else(|| args.iter().find_map(|a| a.strip_prefix("--name=").map(String::from)))
}

fn matches_filter(container: &FakeContainer, filter: &str) -> bool {
    match filter.strip_prefix("name=") {
        Some(pattern) => container.name.as_deref().is_some_and(|n| name_matches(n, pattern)),
        None => true,
    }
}

/// Subset of the runtime's name regex: optional `^`/`$` anchors around a
/// literal with escaped dots.
fn name_matches(name: &str, pattern: &str) -> bool {
    let (start, pattern) = match pattern.strip_prefix('^') {
        Some(rest) => (true, rest),
        None => (false, pattern),
    };
    let (end, pattern) = match pattern.strip_suffix('$') {
        Some(rest) => (true, rest),
        None => (false, pattern),
    };
    let literal = pattern.replace("\\.", ".");
    match (start, end) {
        (true, true) => name == literal,
        (true, false) => name.starts_with(&literal),
        (false, true) => name.ends_with(&literal),
        (false, false) => name.contains(&literal),
    }
}

#[async_trait]
impl ContainerRuntime for FakeRuntime {
    async fn run_detached(&self, args: &[String]) -> Result<String, RuntimeError> {
        let name = name_arg(args);
        self.record(RuntimeCall::Run { name: name.clone(), args: args.to_vec() });

        let delay = name.as_ref().and_then(|n| self.inner.lock().run_delays.get(n).copied());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.inner.lock();
        if let Some(stderr) = name.as_ref().and_then(|n| state.run_failures.get(n)) {
            return Err(RuntimeError::command("run", stderr.clone()));
        }
        if let Some(n) = &name {
            if state.containers.iter().any(|c| c.name.as_ref() == Some(n)) {
                return Err(RuntimeError::command(
                    "run",
                    format!("Conflict. The container name \"/{n}\" is already in use"),
                ));
            }
        }
        let id = next_id(&mut state);
        state.containers.push(FakeContainer { id: id.clone(), name });
        Ok(id)
    }

    async fn list(&self, filter: &str) -> Result<Vec<String>, RuntimeError> {
        self.record(RuntimeCall::List { filter: filter.to_string() });
        let state = self.inner.lock();
        Ok(state
            .containers
            .iter()
            .filter(|c| matches_filter(c, filter))
            .map(|c| c.id.clone())
            .collect())
    }

    async fn stop(&self, ids: &[String]) -> Result<(), RuntimeError> {
        self.record(RuntimeCall::Stop { ids: ids.to_vec() });
        match &self.inner.lock().stop_failure {
            Some(stderr) => Err(RuntimeError::command("stop", stderr.clone())),
            None => Ok(()),
        }
    }

    async fn remove(&self, ids: &[String]) -> Result<(), RuntimeError> {
        self.record(RuntimeCall::Remove { ids: ids.to_vec() });
        self.inner.lock().containers.retain(|c| !ids.contains(&c.id));
        Ok(())
    }

    async fn image_exists(&self, image: &str) -> bool {
        self.inner.lock().images.contains_key(image)
    }

    async fn image_created(&self, image: &str) -> Option<DateTime<Utc>> {
        self.inner.lock().images.get(image).copied().flatten()
    }

    async fn pull(&self, image: &str) -> Result<(), RuntimeError> {
        self.record(RuntimeCall::Pull { image: image.to_string() });
        let mut state = self.inner.lock();
        if let Some(stderr) = state.pull_failures.get(image) {
            return Err(RuntimeError::command("pull", stderr.clone()));
        }
        state.images.insert(image.to_string(), Some(Utc::now()));
        Ok(())
    }

    async fn build(
        &self,
        context: &Path,
        dockerfile: &Path,
        tag: &str,
    ) -> Result<(), RuntimeError> {
        self.record(RuntimeCall::Build {
            context: context.to_path_buf(),
            dockerfile: dockerfile.to_path_buf(),
            tag: tag.to_string(),
        });
        let mut state = self.inner.lock();
        if let Some(stderr) = &state.build_failure {
            return Err(RuntimeError::command("build", stderr.clone()));
        }
        state.images.insert(tag.to_string(), Some(Utc::now()));
        Ok(())
    }

    async fn create_network(&self, name: &str) -> Result<(), RuntimeError> {
        self.record(RuntimeCall::CreateNetwork { name: name.to_string() });
        let mut state = self.inner.lock();
        if !state.networks.insert(name.to_string()) {
            return Err(RuntimeError::command(
                "network create",
                format!("network with name {name} already exists"),
            ));
        }
        Ok(())
    }

    async fn exec(
        &self,
        id: &str,
        command: &[String],
        interactive: bool,
    ) -> Result<i32, RuntimeError> {
        self.record(RuntimeCall::Exec {
            id: id.to_string(),
            command: command.to_vec(),
            interactive,
        });
        let delay = self.inner.lock().exec_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.inner.lock().exec_exit_codes.pop_front().unwrap_or(0))
    }

    async fn follow_logs(&self, id: &str) -> Result<i32, RuntimeError> {
        self.record(RuntimeCall::FollowLogs { id: id.to_string() });
        Ok(0)
    }

    async fn attach(&self, id: &str) -> Result<i32, RuntimeError> {
        self.record(RuntimeCall::Attach { id: id.to_string() });
        Ok(0)
    }

    async fn ps(&self, filter: &str) -> Result<String, RuntimeError> {
        self.record(RuntimeCall::Ps { filter: filter.to_string() });
        let state = self.inner.lock();
        let mut out = String::from("CONTAINER ID   NAMES\n");
        for c in state.containers.iter().filter(|c| matches_filter(c, filter)) {
            out.push_str(&format!("{}   {}\n", c.id, c.name.as_deref().unwrap_or("")));
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
