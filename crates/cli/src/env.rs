// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use dvbx_adapters::runtime::DEFAULT_RUNTIME_PROGRAM;
use std::path::PathBuf;

/// Log filter used when `DVBX_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Config file override: `DVBX_CONFIG`
pub fn config_path() -> Option<PathBuf> {
    std::env::var("DVBX_CONFIG").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

/// Container runtime binary: `DVBX_RUNTIME` > `docker`
pub fn runtime_program() -> String {
    std::env::var("DVBX_RUNTIME")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_RUNTIME_PROGRAM.to_string())
}

/// `tracing` filter directive: `DVBX_LOG` > `warn`
pub fn log_filter() -> String {
    std::env::var("DVBX_LOG").ok().filter(|s| !s.is_empty()).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
