// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

fn tasks(entries: &[(&str, &str)]) -> IndexMap<String, String> {
    entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn vars(entries: &[(&str, &str)]) -> IndexMap<String, String> {
    tasks(entries)
}

#[test]
fn absent_tasks_are_not_configured() {
    assert_eq!(pipeline(None, "test", &vars(&[])), Err(TaskError::NoTasksConfigured));
    assert_eq!(pipeline(Some(&tasks(&[])), "test", &vars(&[])), Err(TaskError::NoTasksConfigured));
}

#[test]
fn unknown_task_is_not_found() {
    let defined = tasks(&[("build", "make")]);
    let err = pipeline(Some(&defined), "test", &vars(&[])).unwrap_err();
    assert_eq!(err, TaskError::NotFound("test".into()));
    assert_eq!(err.to_string(), "Task 'test' not found");
}

#[test]
fn splits_trims_and_drops_blank_lines() {
    let defined = tasks(&[("test", "  cargo fmt --check \n\n   cargo test\n")]);
    let task = pipeline(Some(&defined), "test", &vars(&[])).unwrap();
    assert_eq!(task.commands, vec!["cargo fmt --check", "cargo test"]);
}

#[test]
fn multiline_value_stays_one_command() {
    let defined = tasks(&[("say", "echo {{msg}}\necho done")]);
    let task = pipeline(Some(&defined), "say", &vars(&[("msg", "a\nrm -rf x")])).unwrap();
    assert_eq!(task.commands, vec!["echo a\nrm -rf x", "echo done"]);
}

#[parameterized(
    single = { "echo {{name}}", &[("name", "world")], "echo world" },
    repeated = { "echo {{a}}{{a}}", &[("a", "x")], "echo xx" },
    several = { "cp {{src}} {{dst}}", &[("src", "a"), ("dst", "b")], "cp a b" },
    unmatched_kept = { "echo {{missing}}", &[("other", "1")], "echo {{missing}}" },
    spaced_not_matched = { "echo {{ name }}", &[("name", "x")], "echo {{ name }}" },
    empty_value = { "run {{flag}}", &[("flag", "")], "run " },
    edge_spaces_kept = { "echo {{pad}}", &[("pad", "  x  ")], "echo   x  " },
)]
fn substitutes_variables(template: &str, variables: &[(&str, &str)], expected: &str) {
    let defined = tasks(&[("t", template)]);
    let task = pipeline(Some(&defined), "t", &vars(variables)).unwrap();
    assert_eq!(task.commands, vec![expected.to_string()]);
}

#[test]
fn chain_wraps_commands_with_before_and_after() {
    let defined = tasks(&[("test", "a\nb")]);
    let task = pipeline(Some(&defined), "test", &vars(&[])).unwrap();

    assert_eq!(task.chain(Some("setup"), Some("teardown")), "setup && a && b && teardown");
    assert_eq!(task.chain(None, None), "a && b");
    assert_eq!(task.chain(Some("  "), None), "a && b");
}

#[test]
fn empty_chain_is_a_noop_command() {
    let task = TaskPipeline { name: "t".into(), commands: Vec::new() };
    assert_eq!(task.chain(None, None), "true");
}

#[cfg(unix)]
#[test]
fn failing_command_short_circuits_the_chain() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("after-ran");
    let task = TaskPipeline { name: "t".into(), commands: vec!["exit 3".into()] };
    let after = format!("touch {}", marker.display());
    let chain = task.chain(Some("true"), Some(&after));

    let status = std::process::Command::new("sh").arg("-c").arg(&chain).status().unwrap();
    assert_eq!(status.code(), Some(3));
    assert!(!marker.exists());
}
