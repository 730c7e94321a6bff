// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ps`, `logs`, `attach` and `stop`.

use crate::prelude::*;

#[test]
fn ps_lists_namespace_containers() {
    let project = Project::empty();
    project.container("dvbx_api");
    project.dvbx().args(&["ps"]).passes().stdout_has("dvbx_api");
    assert_eq!(project.runtime_calls(), vec!["ps -a --filter name=^dvbx_"]);
}

#[test]
fn stop_removes_every_container() {
    let project = Project::empty();
    project.container("dvbx_api");
    project.container("dvbx_db");

    project.dvbx().args(&["stop"]).passes().stderr_has("Removed 2 container(s)");
    assert!(project.containers().is_empty());
}

#[test]
fn stop_leaves_foreign_containers_alone() {
    let project = Project::empty();
    project.container("dvbx_api");
    project.container("legacy_dvbx_cache");

    project.dvbx().args(&["stop"]).passes();
    assert_eq!(project.containers(), vec!["legacy_dvbx_cache"]);
}

#[test]
fn stop_with_nothing_running_succeeds() {
    Project::empty().dvbx().args(&["stop"]).passes();
}

#[test]
fn logs_of_stopped_environment_is_not_an_error() {
    let project = Project::with_config("name: api\nimage: alpine\ntasks:\n  t: 'true'\n");
    project.dvbx().args(&["logs"]).passes().stderr_has("dvbx_api is not running");
}

#[test]
fn logs_follow_named_service() {
    let project = Project::empty();
    project.container("dvbx_db");
    project.dvbx().args(&["logs", "db"]).passes().stdout_has("logs of dvbx_db");
}

#[test]
fn attach_defaults_to_primary() {
    let project = Project::with_config("name: api\nimage: alpine\ntasks:\n  t: 'true'\n");
    project.container("dvbx_api");
    project.dvbx().args(&["attach"]).passes().stdout_has("attached to dvbx_api");
}
