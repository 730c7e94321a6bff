// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dvbx-config: loading, `extends` resolution and validation of `dvbx.yml`
//!
//! ```yaml
//! name: api
//! extends: ./base.yml
//! build: ./docker
//! environment:
//!   - RUST_LOG=debug
//! tasks:
//!   test: |
//!     cargo test {{filter}}
//! services:
//!   - db:
//!       image: postgres:16
//! ```

mod error;
pub mod find;
pub mod format;
pub mod merge;
pub mod resolve;
pub mod types;
pub mod validate;

pub use error::ConfigError;
pub use find::{locate_config, CONFIG_CANDIDATES, DEFAULT_CONFIG_FILE};
pub use format::{parse_document, Format};
pub use merge::{deep_merge, MergeError, MergePolicy};
pub use resolve::{DocumentLoader, FsLoader, ResolvedDocument, Resolver};
pub use types::{ResolvedConfig, ServiceDef, DEFAULT_SHELL, DEFAULT_WORKDIR, SHELL_TASK};
pub use validate::{validate, ValidationError, ValidationIssue};

/// Load, resolve and type-check the config at `path` from the filesystem.
pub fn load_config(path: &std::path::Path) -> Result<ResolvedConfig, ConfigError> {
    Resolver::new(FsLoader).resolve(path)?.into_config()
}
