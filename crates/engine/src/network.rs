// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-defined networks.

use dvbx_adapters::ContainerRuntime;
use futures_util::future::join_all;

/// Create every network concurrently.
///
/// Failures (most often "already exists") are logged and ignored; a network
/// that truly cannot be created surfaces later when a container joins it.
pub async fn create_networks<R: ContainerRuntime>(runtime: &R, networks: &[String]) {
    join_all(networks.iter().map(|network| async move {
        match runtime.create_network(network).await {
            Ok(()) => tracing::debug!(network = %network, "network created"),
            Err(e) => tracing::debug!(network = %network, error = %e, "network create skipped"),
        }
    }))
    .await;
}

#[cfg(test)]
#[path = "network_tests.rs"]
mod tests;
