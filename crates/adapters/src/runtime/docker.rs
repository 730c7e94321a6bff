// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Container runtime backed by the Docker CLI (or a compatible one).

use super::{ContainerRuntime, RuntimeError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io::IsTerminal;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Instant;
use tokio::process::Command;

/// Program used when no override is configured
pub const DEFAULT_RUNTIME_PROGRAM: &str = "docker";

/// Runtime that shells out to a Docker-compatible CLI.
#[derive(Clone, Debug)]
pub struct DockerRuntime {
    program: String,
}

impl Default for DockerRuntime {
    fn default() -> Self {
        Self::new(DEFAULT_RUNTIME_PROGRAM)
    }
}

impl DockerRuntime {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let mut cmd = Command::new(&self.program);
        cmd.args(args).kill_on_drop(true);
        cmd
    }

    /// Run to completion with captured output. Returns trimmed stdout.
    async fn run_captured(&self, op: &str, mut cmd: Command) -> Result<String, RuntimeError> {
        let start = Instant::now();
        let output = cmd
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| RuntimeError::Spawn { program: self.program.clone(), source })?;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        if output.status.success() {
            tracing::debug!(op, elapsed_ms, "runtime command succeeded");
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::debug!(op, elapsed_ms, stderr = %stderr.trim(), "runtime command failed");
            Err(RuntimeError::command(op, stderr))
        }
    }

    /// Run with the terminal attached. Returns the process exit status.
    async fn run_inherited(&self, mut cmd: Command) -> Result<i32, RuntimeError> {
        let status = cmd
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| RuntimeError::Spawn { program: self.program.clone(), source })?;
        Ok(exit_code(status))
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn run_detached(&self, args: &[String]) -> Result<String, RuntimeError> {
        let mut full = vec!["run".to_string(), "-d".to_string()];
        full.extend_from_slice(args);
        tracing::debug!(args = ?full, "starting container");
        self.run_captured("run", self.command(&full)).await
    }

    async fn list(&self, filter: &str) -> Result<Vec<String>, RuntimeError> {
        let stdout = self.run_captured("ps", self.command(["ps", "-aq", "--filter", filter])).await?;
        Ok(stdout.lines().map(str::trim).filter(|l| !l.is_empty()).map(String::from).collect())
    }

    async fn stop(&self, ids: &[String]) -> Result<(), RuntimeError> {
        if ids.is_empty() {
            return Ok(());
        }
        let mut cmd = self.command(["stop"]);
        cmd.args(ids);
        self.run_captured("stop", cmd).await.map(|_| ())
    }

    async fn remove(&self, ids: &[String]) -> Result<(), RuntimeError> {
        if ids.is_empty() {
            return Ok(());
        }
        let mut cmd = self.command(["rm"]);
        cmd.args(ids);
        self.run_captured("rm", cmd).await.map(|_| ())
    }

    async fn image_exists(&self, image: &str) -> bool {
        self.run_captured("image inspect", self.command(["image", "inspect", image]))
            .await
            .is_ok()
    }

    async fn image_created(&self, image: &str) -> Option<DateTime<Utc>> {
        let cmd = self.command(["image", "inspect", "--format", "{{.Created}}", image]);
        let stdout = self.run_captured("image inspect", cmd).await.ok()?;
        parse_created(&stdout)
    }

    async fn pull(&self, image: &str) -> Result<(), RuntimeError> {
        tracing::info!(image, "pulling image");
        self.run_captured("pull", self.command(["pull", image])).await.map(|_| ())
    }

    async fn build(
        &self,
        context: &Path,
        dockerfile: &Path,
        tag: &str,
    ) -> Result<(), RuntimeError> {
        tracing::info!(tag, context = %context.display(), "building image");
        let mut cmd = self.command(["build", "-t", tag, "-f"]);
        cmd.arg(dockerfile).arg(context);
        self.run_captured("build", cmd).await.map(|_| ())
    }

    async fn create_network(&self, name: &str) -> Result<(), RuntimeError> {
        self.run_captured("network create", self.command(["network", "create", name]))
            .await
            .map(|_| ())
    }

    async fn exec(
        &self,
        id: &str,
        command: &[String],
        interactive: bool,
    ) -> Result<i32, RuntimeError> {
        let mut cmd = self.command(["exec"]);
        if interactive {
            cmd.arg("-i");
            if std::io::stdin().is_terminal() {
                cmd.arg("-t");
            }
        }
        cmd.arg(id).args(command);
        self.run_inherited(cmd).await
    }

    async fn follow_logs(&self, id: &str) -> Result<i32, RuntimeError> {
        self.run_inherited(self.command(["logs", "-f", id])).await
    }

    async fn attach(&self, id: &str) -> Result<i32, RuntimeError> {
        self.run_inherited(self.command(["attach", id])).await
    }

    async fn ps(&self, filter: &str) -> Result<String, RuntimeError> {
        self.run_captured("ps", self.command(["ps", "-a", "--filter", filter])).await
    }
}

/// Parse the engine's image creation timestamp (RFC 3339, nanosecond precision).
fn parse_created(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim()).ok().map(|t| t.with_timezone(&Utc))
}

#[cfg(test)]
#[path = "docker_tests.rs"]
mod tests;
