// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config file discovery

use std::path::{Path, PathBuf};

/// File name reported when no config file exists.
pub const DEFAULT_CONFIG_FILE: &str = "dvbx.yml";

/// File names looked up in the project directory, in order.
pub const CONFIG_CANDIDATES: &[&str] = &["dvbx.yml", "dvbx.yaml", "dvbx.json", "dvbx.toml"];

/// Pick the config file for `dir`.
///
/// An explicit path wins (relative paths are taken from `dir`). Otherwise the
/// first existing candidate is used, falling back to `dvbx.yml` so the load
/// error names the expected file.
pub fn locate_config(dir: &Path, explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return dir.join(path);
    }
    CONFIG_CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
        .unwrap_or_else(|| dir.join(DEFAULT_CONFIG_FILE))
}

#[cfg(test)]
#[path = "find_tests.rs"]
mod tests;
