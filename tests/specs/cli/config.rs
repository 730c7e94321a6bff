// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config discovery, validation and `extends`.

use crate::prelude::*;

#[test]
fn missing_config_fails_without_runtime_calls() {
    let project = Project::empty();
    project.dvbx().args(&["test"]).exits(1).stderr_has("dvbx.yml");
    assert!(project.runtime_calls().is_empty());
}

#[test]
fn every_validation_issue_is_reported() {
    let project = Project::with_config("services:\n  - db: {}\n");
    project
        .dvbx()
        .args(&["test"])
        .exits(1)
        .stderr_has("Configuration must have a 'name' property set")
        .stderr_has("Configuration must have at least one task")
        .stderr_has("Configuration must have a 'image' or 'build' specified")
        .stderr_has("Service db must have a 'image' or 'build' specified");
    assert!(project.runtime_calls().is_empty());
}

#[test]
fn unknown_task_is_reported() {
    let project = Project::with_config("name: api\nimage: alpine\ntasks:\n  test: 'true'\n");
    project.dvbx().args(&["deploy"]).exits(1).stderr_has("Task 'deploy' not found");
    assert!(project.runtime_calls().is_empty());
}

#[test]
fn file_flag_selects_config() {
    let project = Project::empty();
    project.file("ci/pipeline.yml", "name: ci\nimage: alpine\ntasks:\n  check: echo from-ci\n");
    project.dvbx().args(&["-f", "ci/pipeline.yml", "check"]).passes().stdout_has("from-ci");
}

#[test]
fn env_var_selects_config() {
    let project = Project::empty();
    project.file("other.yml", "name: other\nimage: alpine\ntasks:\n  check: echo from-env\n");
    project.dvbx().args(&["check"]).env("DVBX_CONFIG", "other.yml").passes().stdout_has("from-env");
}

#[test]
fn json_config_is_discovered() {
    let project = Project::empty();
    project.file(
        "dvbx.json",
        r#"{"name": "api", "image": "alpine", "tasks": {"check": "echo from-json"}}"#,
    );
    project.dvbx().args(&["check"]).passes().stdout_has("from-json");
}

#[test]
fn extends_fills_missing_fields() {
    let project = Project::with_config("extends: ./base.yml\nname: api\ntasks:\n  own: echo own-task\n");
    project.file("base.yml", "image: alpine\ntasks:\n  inherited: echo from-base\n");

    project.dvbx().args(&["inherited"]).passes().stdout_has("from-base");
    project.dvbx().args(&["own"]).passes().stdout_has("own-task");
}
