// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-facing progress and diagnostics, written to stderr so stdout stays
//! with the task.

use crate::color::{codes, paint, should_colorize_stderr};
use dvbx_core::format_duration;
use dvbx_engine::{ImageAction, RunEvent};
use tokio::sync::mpsc;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

/// Render a progress event, or `None` for events not shown to the user.
pub fn event_line(event: &RunEvent, color: bool) -> Option<String> {
    let line = match event {
        RunEvent::ImageReady { resolution, .. } => match resolution.action {
            ImageAction::Reused => return None,
            action => format!(
                "Image {} {} {}",
                paint(codes::HEADER, &resolution.image, color),
                action,
                paint(codes::MUTED, &format!("({})", format_duration(resolution.elapsed)), color)
            ),
        },
        RunEvent::ServicesStarted { names } => {
            format!("Services started: {}", paint(codes::HEADER, &names.join(", "), color))
        }
        RunEvent::PrimaryStarted { container } => {
            format!("Environment {} ready", paint(codes::HEADER, container, color))
        }
        RunEvent::PolicyIgnored(warning) => {
            format!("{} {}", paint(codes::WARNING, "warning:", color), warning)
        }
        RunEvent::TaskStarted { task } => {
            format!("Running task {}", paint(codes::HEADER, task, color))
        }
        RunEvent::TaskFinished { exit_code, duration, .. } => {
            let status = if *exit_code == 0 {
                paint(codes::SUCCESS, "done", color)
            } else {
                paint(codes::ERROR, &format!("exit {exit_code}"), color)
            };
            format!("Execution time: {} ({})", format_duration(*duration), status)
        }
        RunEvent::CleanedUp { removed } => {
            paint(codes::MUTED, &format!("Removed {removed} container(s)"), color)
        }
    };
    Some(line)
}

/// Print progress events until the sender side closes.
pub async fn print_events(mut events: mpsc::UnboundedReceiver<RunEvent>) {
    let color = should_colorize_stderr();
    while let Some(event) = events.recv().await {
        if let Some(line) = event_line(&event, color) {
            eprintln!("{line}");
        }
    }
}

pub fn error(message: &str) {
    eprintln!("{} {}", paint(codes::ERROR, "error:", should_colorize_stderr()), message);
}

pub fn warning(message: &str) {
    eprintln!("{} {}", paint(codes::WARNING, "warning:", should_colorize_stderr()), message);
}

pub fn note(message: &str) {
    eprintln!("{}", paint(codes::MUTED, message, should_colorize_stderr()));
}
