// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dvbx help` and `dvbx version`

use crate::color::{codes, paint, should_colorize};
use dvbx_config::load_config;
use std::path::Path;

const COMMANDS: &[(&str, &str)] = &[
    ("version, -v", "Print the dvbx version"),
    ("help, -h", "Show this message and the tasks of dvbx.yml"),
    ("logs [service]", "Follow container logs (defaults to the primary)"),
    ("shell [service]", "Open a shell in a container (defaults to the primary)"),
    ("attach [service]", "Attach to a container (defaults to the primary)"),
    ("ps", "List dvbx containers"),
    ("stop", "Stop and remove all dvbx containers"),
];

pub fn version_line() -> String {
    format!("dvbx {}", env!("CARGO_PKG_VERSION"))
}

/// Usage text. `tasks` is `None` when no config could be loaded.
pub fn usage(tasks: Option<&[String]>, color: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", version_line()));
    out.push_str(&format!(
        "{} dvbx [-f <file>] <command|task> [key=value ...]\n\n",
        paint(codes::HEADER, "Usage:", color)
    ));
    out.push_str(&format!("{}\n", paint(codes::HEADER, "Commands:", color)));
    for (command, description) in COMMANDS {
        out.push_str(&format!(
            "  {}{}  {}\n",
            paint(codes::LITERAL, command, color),
            " ".repeat(18usize.saturating_sub(command.len())),
            paint(codes::CONTEXT, description, color)
        ));
    }
    out.push('\n');
    out.push_str(&format!("{}\n", paint(codes::HEADER, "Tasks:", color)));
    match tasks {
        Some([]) => out.push_str("  (none)\n"),
        Some(tasks) => {
            for task in tasks {
                out.push_str(&format!("  {}\n", paint(codes::LITERAL, task, color)));
            }
        }
        None => out.push_str(&format!(
            "  {}\n",
            paint(codes::MUTED, "no config file found in this directory", color)
        )),
    }
    out
}

pub fn show(config_path: &Path) {
    let tasks: Option<Vec<String>> = match load_config(config_path) {
        Ok(config) => Some(config.user_tasks().map(String::from).collect()),
        Err(e) => {
            tracing::debug!(error = %e, "help without tasks");
            None
        }
    };
    print!("{}", usage(tasks.as_deref(), should_colorize()));
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
