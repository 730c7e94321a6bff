// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Containers started during one run.

/// A started container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningEnvironment {
    /// Logical name from the config
    pub name: String,
    /// Namespaced container name
    pub container: String,
    pub id: String,
}

/// The environments one run has started, owned by that run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunningEnvironmentSet {
    services: Vec<RunningEnvironment>,
    primary: Option<RunningEnvironment>,
}

impl RunningEnvironmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_service(&mut self, env: RunningEnvironment) {
        self.services.push(env);
    }

    pub fn set_primary(&mut self, env: RunningEnvironment) {
        self.primary = Some(env);
    }

    pub fn services(&self) -> &[RunningEnvironment] {
        &self.services
    }

    pub fn primary(&self) -> Option<&RunningEnvironment> {
        self.primary.as_ref()
    }

    /// Container names the primary links to.
    pub fn links(&self) -> Vec<String> {
        self.services.iter().map(|s| s.container.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty() && self.primary.is_none()
    }
}
