// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for black-box CLI specs.
//!
//! Every spec runs the real `dvbx` binary inside a temporary project whose
//! container runtime is a shell script. The script records each invocation
//! in `calls.log`, tracks created containers in `containers` and runs `exec`
//! commands on the host.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::sync::OnceLock;

const STUB_RUNTIME: &str = r#"#!/bin/sh
log="$DVBX_STUB_DIR/calls.log"
state="$DVBX_STUB_DIR/containers"
touch "$state"
echo "$*" >> "$log"
cmd="$1"
shift
case "$cmd" in
  run)
    name=""
    prev=""
    for arg in "$@"; do
      if [ "$prev" = "--name" ]; then name="$arg"; fi
      prev="$arg"
    done
    if [ -n "$DVBX_STUB_FAIL_RUN" ] && [ "$name" = "$DVBX_STUB_FAIL_RUN" ]; then
      echo "docker: Error response from daemon: Bind for 0.0.0.0:5432 failed: port is already allocated." >&2
      exit 125
    fi
    echo "$name" >> "$state"
    echo "$name"
    ;;
  ps)
    if [ "$1" = "-aq" ]; then
      grep -E -- "${3#name=}" "$state" || true
    else
      echo "CONTAINER ID   NAMES"
      cat "$state"
    fi
    ;;
  rm)
    for id in "$@"; do
      grep -vxF -- "$id" "$state" > "$state.tmp" || true
      mv "$state.tmp" "$state"
    done
    ;;
  exec)
    for last in "$@"; do :; done
    sh -c "$last"
    exit $?
    ;;
  image)
    if [ "$2" = "--format" ]; then echo "2999-01-01T00:00:00Z"; fi
    ;;
  logs)
    echo "logs of $2"
    ;;
  attach)
    echo "attached to $1"
    ;;
esac
exit 0
"#;

/// A temporary project directory with a stub runtime
pub struct Project {
    dir: tempfile::TempDir,
    stub: PathBuf,
}

impl Project {
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        Self { dir, stub: stub_runtime().to_path_buf() }
    }

    /// Project with `dvbx.yml` already written.
    pub fn with_config(config: &str) -> Self {
        let project = Self::empty();
        project.file("dvbx.yml", config);
        project
    }

    pub fn file(&self, rel: &str, contents: &str) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    /// Pretend a container exists, e.g. left over from an earlier run.
    pub fn container(&self, name: &str) {
        let state = self.dir.path().join("containers");
        let mut existing = std::fs::read_to_string(&state).unwrap_or_default();
        existing.push_str(name);
        existing.push('\n');
        std::fs::write(state, existing).unwrap();
    }

    pub fn containers(&self) -> Vec<String> {
        read_lines(&self.dir.path().join("containers"))
    }

    /// Every runtime invocation, one argument string per call.
    pub fn runtime_calls(&self) -> Vec<String> {
        read_lines(&self.dir.path().join("calls.log"))
    }

    pub fn dvbx(&self) -> CliBuilder {
        let mut cmd = std::process::Command::new(binary());
        cmd.current_dir(self.dir.path())
            .env("DVBX_RUNTIME", &self.stub)
            .env("DVBX_STUB_DIR", self.dir.path())
            .env("NO_COLOR", "1")
            .env_remove("COLOR")
            .env_remove("DVBX_CONFIG")
            .env_remove("DVBX_LOG");
        CliBuilder { cmd, _project: None }
    }
}

/// Stub script shared by every spec.
///
/// Written once before any spec spawns a process, so no forked child can
/// still hold it open for writing when it is executed.
fn stub_runtime() -> &'static Path {
    static STUB: OnceLock<(tempfile::TempDir, PathBuf)> = OnceLock::new();
    let (_, path) = STUB.get_or_init(|| {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dvbx-stub-runtime");
        std::fs::write(&path, STUB_RUNTIME).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        (dir, path)
    });
    path
}

fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

fn binary() -> PathBuf {
    assert_cmd::cargo::cargo_bin("dvbx")
}

/// `dvbx` in a fresh project with no config file.
pub fn cli() -> CliBuilder {
    let project = Project::empty();
    let mut builder = project.dvbx();
    builder._project = Some(project);
    builder
}

pub struct CliBuilder {
    cmd: std::process::Command,
    /// Owns the project directory when the builder created it
    _project: Option<Project>,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    fn run(mut self) -> RunAssert {
        let Output { status, stdout, stderr } = self.cmd.output().unwrap();
        RunAssert {
            code: status.code(),
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        }
    }

    pub fn passes(self) -> RunAssert {
        let out = self.run();
        assert_eq!(out.code, Some(0), "expected success\n{out}");
        out
    }

    pub fn exits(self, code: i32) -> RunAssert {
        let out = self.run();
        assert_eq!(out.code, Some(code), "unexpected exit status\n{out}");
        out
    }
}

pub struct RunAssert {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl std::fmt::Display for RunAssert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "--- stdout ---\n{}\n--- stderr ---\n{}", self.stdout, self.stderr)
    }
}

impl RunAssert {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout missing {needle:?}\n{self}");
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout.contains(needle), "stdout unexpectedly has {needle:?}\n{self}");
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}\n{self}");
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout, expected);
        self
    }
}
