// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::merge::MergeError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or resolving a config document.
///
/// All of them are fatal: no environment is touched once one is returned.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error reading config file {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("error parsing config file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
    #[error("config file {} is empty, do you have a valid dvbx.yml?", path.display())]
    Empty { path: PathBuf },
    #[error("'extends' in {} must be a path string", path.display())]
    InvalidExtends { path: PathBuf },
    #[error("error merging {}: {source}", path.display())]
    Merge {
        path: PathBuf,
        #[source]
        source: MergeError,
    },
    #[error("invalid config: {0}")]
    Shape(String),
}
