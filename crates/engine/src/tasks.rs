// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task lookup and command chaining.

use indexmap::IndexMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("No tasks configured")]
    NoTasksConfigured,
    #[error("Task '{0}' not found")]
    NotFound(String),
}

/// Commands of one task after variable substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPipeline {
    pub name: String,
    pub commands: Vec<String>,
}

/// Look up a task and expand its template into commands.
///
/// The template is split into trimmed, non-blank lines first. Then every
/// `{{key}}` in each line is replaced literally by its value, so a value never
/// adds commands. Placeholders without a variable are left in place.
pub fn pipeline(
    tasks: Option<&IndexMap<String, String>>,
    name: &str,
    vars: &IndexMap<String, String>,
) -> Result<TaskPipeline, TaskError> {
    let tasks = tasks.filter(|t| !t.is_empty()).ok_or(TaskError::NoTasksConfigured)?;
    let template = tasks.get(name).ok_or_else(|| TaskError::NotFound(name.to_string()))?;

    let commands = command_lines(template).iter().map(|line| substitute(line, vars)).collect();
    Ok(TaskPipeline { name: name.to_string(), commands })
}

fn substitute(line: &str, vars: &IndexMap<String, String>) -> String {
    vars.iter().fold(line.to_string(), |line, (key, value)| {
        line.replace(&format!("{{{{{key}}}}}"), value)
    })
}

fn command_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::trim).filter(|l| !l.is_empty()).map(String::from).collect()
}

impl TaskPipeline {
    /// Join `before`, the task's commands and `after` with `&&` so the first
    /// failing command stops the chain.
    pub fn chain(&self, before: Option<&str>, after: Option<&str>) -> String {
        let parts: Vec<String> = before
            .map(command_lines)
            .unwrap_or_default()
            .into_iter()
            .chain(self.commands.iter().cloned())
            .chain(after.map(command_lines).unwrap_or_default())
            .collect();
        if parts.is_empty() {
            return "true".to_string();
        }
        parts.join(" && ")
    }
}

#[cfg(test)]
#[path = "tasks_tests.rs"]
mod tests;
