// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Full runs: services, primary, task, cleanup.

use crate::prelude::*;

const WITH_DB: &str = "
name: api
image: alpine
tasks:
  test: echo hello-from-task
services:
  - db:
      image: postgres
";

#[test]
fn task_output_reaches_stdout() {
    let project = Project::with_config(WITH_DB);
    project.dvbx().args(&["test"]).passes().stdout_has("hello-from-task");
}

#[test]
fn service_starts_before_primary() {
    let project = Project::with_config(WITH_DB);
    project.dvbx().args(&["test"]).passes();

    let runs: Vec<String> =
        project.runtime_calls().into_iter().filter(|c| c.starts_with("run -d")).collect();
    assert_eq!(runs.len(), 2, "{runs:?}");
    assert!(runs[0].ends_with("--name dvbx_db postgres"), "{}", runs[0]);
    assert!(runs[1].contains("--name dvbx_api --link dvbx_db alpine tail -f /dev/null"));
}

#[test]
fn environment_is_removed_afterwards() {
    let project = Project::with_config(WITH_DB);
    project.dvbx().args(&["test"]).passes();

    assert!(project.containers().is_empty());
    let calls = project.runtime_calls();
    assert!(calls.contains(&"stop dvbx_db dvbx_api".to_string()), "{calls:?}");
    assert!(calls.contains(&"rm dvbx_db dvbx_api".to_string()), "{calls:?}");
}

#[test]
fn variables_fill_placeholders() {
    let project = Project::with_config(
        "name: api\nimage: alpine\ntasks:\n  greet: echo hello-{{who}}\n",
    );
    project.dvbx().args(&["greet", "who=world"]).passes().stdout_has("hello-world");
    project.dvbx().args(&["greet", "--who=there"]).passes().stdout_has("hello-there");
}

#[test]
fn task_exit_status_is_propagated() {
    let project = Project::with_config(
        "name: api\nimage: alpine\nafter: echo after-ran\ntasks:\n  broken: |\n    echo first\n    exit 3\n    echo never\n",
    );
    project
        .dvbx()
        .args(&["broken"])
        .exits(3)
        .stdout_has("first")
        .stdout_lacks("never")
        .stdout_lacks("after-ran");
    assert!(project.containers().is_empty());
}

#[test]
fn before_and_after_wrap_the_task() {
    let project = Project::with_config(
        "name: api\nimage: alpine\nbefore: echo setup\nafter: echo teardown\ntasks:\n  t: echo body\n",
    );
    let out = project.dvbx().args(&["t"]).passes();
    let setup = out.stdout.find("setup").unwrap();
    let body = out.stdout.find("body").unwrap();
    let teardown = out.stdout.find("teardown").unwrap();
    assert!(setup < body && body < teardown);
}

#[test]
fn failed_service_stops_the_run() {
    let project = Project::with_config(WITH_DB);
    project
        .dvbx()
        .args(&["test"])
        .env("DVBX_STUB_FAIL_RUN", "dvbx_db")
        .exits(1)
        .stderr_has("service 'db' failed to start")
        .stderr_has("Port is already allocated")
        .stdout_lacks("hello-from-task");

    let calls = project.runtime_calls();
    assert!(!calls.iter().any(|c| c.contains("--name dvbx_api")), "{calls:?}");
    assert!(project.containers().is_empty());
}

#[test]
fn leftover_containers_are_swept() {
    let project = Project::with_config(WITH_DB);
    project.container("dvbx_crashed");

    project.dvbx().args(&["test"]).passes();

    assert!(project.containers().is_empty());
}

#[test]
fn shell_runs_configured_shell_when_nothing_is_running() {
    let project = Project::with_config(
        "name: api\nimage: alpine\nshell: echo shell-started\ntasks:\n  t: 'true'\n",
    );
    project.dvbx().args(&["shell"]).passes().stdout_has("shell-started");
    assert!(project.containers().is_empty());
}
