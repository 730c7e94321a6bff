// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help and version output.

use crate::prelude::*;

#[test]
fn no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn help_words_show_usage() {
    for arg in ["help", "-h", "--help"] {
        cli().args(&[arg]).passes().stdout_has("Usage:").stdout_has("stop");
    }
}

#[test]
fn version_words_print_version() {
    let expected = format!("dvbx {}\n", env!("CARGO_PKG_VERSION"));
    for arg in ["version", "-v", "--version"] {
        cli().args(&[arg]).passes().stdout_eq(&expected);
    }
}

#[test]
fn help_lists_tasks_from_config() {
    let project = Project::with_config(
        "name: api\nimage: alpine\ntasks:\n  build: make\n  test: make test\n",
    );
    project.dvbx().args(&["help"]).passes().stdout_has("  build\n").stdout_has("  test\n");
    assert!(project.runtime_calls().is_empty());
}

#[test]
fn help_without_config_still_succeeds() {
    cli().args(&["help"]).passes().stdout_has("no config file found");
}
