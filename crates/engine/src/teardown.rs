// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Namespace-wide container cleanup.

use crate::error::CleanupError;
use dvbx_adapters::ContainerRuntime;
use dvbx_core::name_filter;

/// Stops and removes every container in the `dvbx_` namespace.
///
/// Reaping by namespace also collects containers left behind by an earlier
/// crashed run. Sweeping an empty namespace succeeds.
pub struct Teardown<'a, R> {
    runtime: &'a R,
}

impl<'a, R: ContainerRuntime> Teardown<'a, R> {
    pub fn new(runtime: &'a R) -> Self {
        Self { runtime }
    }

    /// Returns the number of containers removed.
    pub async fn sweep(&self) -> Result<usize, CleanupError> {
        let ids = self.runtime.list(&name_filter()).await.map_err(CleanupError::List)?;
        if ids.is_empty() {
            tracing::debug!("nothing to clean up");
            return Ok(0);
        }
        tracing::info!(count = ids.len(), "stopping containers");
        self.runtime.stop(&ids).await.map_err(CleanupError::Stop)?;
        self.runtime.remove(&ids).await.map_err(CleanupError::Remove)?;
        Ok(ids.len())
    }
}

#[cfg(test)]
#[path = "teardown_tests.rs"]
mod tests;
