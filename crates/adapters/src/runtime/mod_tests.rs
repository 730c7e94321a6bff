// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn command_error_classifies_and_trims_stderr() {
    let err = RuntimeError::command("run", "  Unable to find image 'x:1' locally\n");
    assert_eq!(err.category(), ErrorCategory::ImageNotFound);
    match &err {
        RuntimeError::Command { op, stderr, .. } => {
            assert_eq!(op, "run");
            assert_eq!(stderr, "Unable to find image 'x:1' locally");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn user_message_uses_category_text_for_known_failures() {
    let err = RuntimeError::command("run", "port is already allocated");
    assert_eq!(err.user_message(), ErrorCategory::PortConflict.message());
}

#[test]
fn user_message_passes_through_unknown_stderr() {
    let err = RuntimeError::command("build", "step 3/7 failed");
    assert_eq!(err.user_message(), "step 3/7 failed");
}

#[test]
fn user_message_falls_back_when_stderr_is_empty() {
    let err = RuntimeError::command("stop", "");
    assert_eq!(err.user_message(), ErrorCategory::Other.message());
}

#[test]
fn spawn_failure_is_uncategorized() {
    let err = RuntimeError::Spawn {
        program: "docker".to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
    };
    assert_eq!(err.category(), ErrorCategory::Other);
    assert!(err.user_message().contains("docker"));
}
