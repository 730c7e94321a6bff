// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command line parsing.
//!
//! Everything after the options is free-form: a reserved command or task
//! name followed by `key=value` variables. Clap's own help and version flags
//! are disabled so `-h` and `-v` reach the reserved-word dispatch.

use clap::Parser;
use indexmap::IndexMap;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dvbx",
    disable_help_flag = true,
    disable_version_flag = true,
    disable_help_subcommand = true,
    styles = crate::color::styles()
)]
pub struct Cli {
    /// Config file (default: dvbx.yml in the current directory)
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Command or task name, then variables as key=value
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    pub args: Vec<String>,
}

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Version,
    Help,
    Ps,
    Stop,
    Logs(Option<String>),
    Attach(Option<String>),
    Shell { service: Option<String>, variables: IndexMap<String, String> },
    Run { task: String, variables: IndexMap<String, String> },
}

impl Cli {
    pub fn invocation(&self) -> Invocation {
        let Some((first, rest)) = self.args.split_first() else {
            return Invocation::Help;
        };
        let target = || rest.first().filter(|a| !a.contains('=')).cloned();
        match first.as_str() {
            "version" | "-v" | "--version" => Invocation::Version,
            "help" | "-h" | "--help" => Invocation::Help,
            "ps" => Invocation::Ps,
            "stop" => Invocation::Stop,
            "logs" => Invocation::Logs(target()),
            "attach" => Invocation::Attach(target()),
            "shell" => Invocation::Shell { service: target(), variables: parse_variables(rest) },
            task => Invocation::Run { task: task.to_string(), variables: parse_variables(rest) },
        }
    }
}

/// Collect `key=value` and `--key=value` arguments, split at the first `=`.
///
/// Arguments without a non-empty key and value are skipped.
pub fn parse_variables(args: &[String]) -> IndexMap<String, String> {
    let mut variables = IndexMap::new();
    for arg in args {
        let stripped = arg.strip_prefix("--").unwrap_or(arg);
        match stripped.split_once('=') {
            Some((key, value)) if !key.is_empty() && !value.is_empty() => {
                variables.insert(key.to_string(), value.to_string());
            }
            _ => tracing::debug!(arg = %arg, "ignoring argument that is not a variable"),
        }
    }
    variables
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
