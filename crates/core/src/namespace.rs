// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Naming convention for everything dvbx creates in the container runtime.
//!
//! Containers are named `dvbx_<name>` and built images are tagged
//! `dvbx_<name>:latest`, so a single name filter finds every environment
//! this tool ever started, including orphans of a crashed run.

/// Prefix tagging every container and built image.
pub const NAMESPACE_PREFIX: &str = "dvbx_";

/// Container name for a logical service or project name.
pub fn container_name(name: &str) -> String {
    format!("{NAMESPACE_PREFIX}{name}")
}

/// Image tag used when building from a local Dockerfile.
pub fn image_tag(name: &str) -> String {
    format!("{}:latest", container_name(name))
}

/// Runtime filter matching every container in the namespace.
///
/// The runtime treats `name=` as an unanchored regex, so the prefix is
/// pinned to the start of the name.
pub fn name_filter() -> String {
    format!("name=^{NAMESPACE_PREFIX}")
}

/// Runtime filter matching exactly the container of one logical name.
pub fn name_filter_for(name: &str) -> String {
    format!("name=^{}$", container_name(name).replace('.', "\\."))
}

#[cfg(test)]
#[path = "namespace_tests.rs"]
mod tests;
