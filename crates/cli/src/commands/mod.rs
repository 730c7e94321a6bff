// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod help;
pub mod inspect;
pub mod run;
pub mod shell;
pub mod stop;

use crate::exit_error::ExitError;
use dvbx_adapters::RuntimeError;
use dvbx_engine::FAILURE_EXIT_CODE;
use std::path::PathBuf;

/// Where the current invocation finds its config and project files
#[derive(Debug, Clone)]
pub struct Project {
    pub config_path: PathBuf,
    /// Directory mounted into the primary container
    pub dir: PathBuf,
}

/// Runtime failure shown with its translated message.
pub(crate) fn runtime_error(e: RuntimeError) -> anyhow::Error {
    ExitError::new(FAILURE_EXIT_CODE, e.user_message()).into()
}

/// Map a child exit status onto the command result.
pub(crate) fn exit_with(code: i32) -> anyhow::Result<()> {
    if code == 0 {
        Ok(())
    } else {
        Err(ExitError::silent(code).into())
    }
}
