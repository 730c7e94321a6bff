// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed view of a resolved config document.
//!
//! The root of the document is itself a container definition (`image`,
//! `build`, `environment`, ...) plus project fields (`name`, `tasks`,
//! `before`, `after`, `services`).

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;

/// Name of the synthetic task that opens an interactive shell.
pub const SHELL_TASK: &str = "shell";

/// Shell used when the config does not name one.
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Mount point of the project directory inside the primary container.
pub const DEFAULT_WORKDIR: &str = "/dvbx";

/// Container definition shared by services and the primary environment
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceDef {
    #[serde(deserialize_with = "scalar_string")]
    pub image: Option<String>,
    /// Directory containing a `Dockerfile`
    pub build: Option<PathBuf>,
    #[serde(deserialize_with = "scalar_string")]
    pub platform: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub restart: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub network: Option<String>,
    #[serde(deserialize_with = "string_list")]
    pub networks: Vec<String>,
    #[serde(deserialize_with = "string_list")]
    pub environment: Vec<String>,
    #[serde(deserialize_with = "string_list")]
    pub ports: Vec<String>,
    #[serde(deserialize_with = "string_list")]
    pub volumes: Vec<String>,
    #[serde(deserialize_with = "string_list")]
    pub hosts: Vec<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub hostname: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub user: Option<String>,
    pub privileged: bool,
    #[serde(deserialize_with = "scalar_string")]
    pub shell: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub workdir: Option<String>,
}

impl ServiceDef {
    /// Whether the definition names an image or a build directory.
    pub fn has_image_source(&self) -> bool {
        self.image.as_deref().is_some_and(|i| !i.trim().is_empty()) || self.build.is_some()
    }
}

/// Fully resolved project configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolvedConfig {
    #[serde(deserialize_with = "scalar_string")]
    pub name: Option<String>,
    pub tasks: IndexMap<String, String>,
    #[serde(deserialize_with = "scalar_string")]
    pub before: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub after: Option<String>,
    #[serde(deserialize_with = "services")]
    pub services: Vec<(String, ServiceDef)>,
    /// Container settings of the primary environment
    #[serde(flatten)]
    pub primary: ServiceDef,
}

impl ResolvedConfig {
    /// Project name, empty when unset.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn shell(&self) -> &str {
        self.primary.shell.as_deref().unwrap_or(DEFAULT_SHELL)
    }

    pub fn workdir(&self) -> &str {
        self.primary.workdir.as_deref().unwrap_or(DEFAULT_WORKDIR)
    }

    /// Task names declared by the user, excluding the synthetic shell task.
    pub fn user_tasks(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(String::as_str).filter(|k| *k != SHELL_TASK)
    }

    /// Every network declared by the root or a service, first occurrence first.
    pub fn declared_networks(&self) -> Vec<String> {
        let mut networks: Vec<String> = Vec::new();
        let all = self.primary.networks.iter().chain(self.services.iter().flat_map(|(_, s)| &s.networks));
        for network in all {
            if !networks.contains(network) {
                networks.push(network.clone());
            }
        }
        networks
    }
}

/// YAML scalars that read naturally as strings (`- 8080`, `user: 1000`)
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Str(s) => s,
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_string))
}

fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<Scalar>>::deserialize(deserializer)?.unwrap_or_default();
    let mut unique: Vec<String> = Vec::with_capacity(items.len());
    for item in items.into_iter().map(Scalar::into_string) {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    Ok(unique)
}

/// `services` is a sequence of single-key mappings: `- name: { ... }`.
fn services<'de, D>(deserializer: D) -> Result<Vec<(String, ServiceDef)>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries =
        Option::<Vec<IndexMap<String, Option<ServiceDef>>>>::deserialize(deserializer)?
            .unwrap_or_default();
    let mut services = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.len() != 1 {
            return Err(serde::de::Error::custom(format!(
                "each service must be a single-key mapping, found {} keys",
                entry.len()
            )));
        }
        services.extend(entry.into_iter().map(|(name, def)| (name, def.unwrap_or_default())));
    }
    Ok(services)
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
