// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime argument vectors for service and primary containers.
//!
//! Flags are emitted in a fixed order: environment, ports, volumes, hosts,
//! hostname, platform, network, restart, privileged, user, name.

use dvbx_config::{ResolvedConfig, ServiceDef};
use dvbx_core::container_name;
use std::fmt;
use std::path::Path;

/// Command that keeps the primary container idle while tasks are exec'd into it
pub const IDLE_COMMAND: [&str; 3] = ["tail", "-f", "/dev/null"];

/// A restart policy the runtime would reject, dropped from the invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftPolicyWarning {
    pub service: String,
    pub policy: String,
}

impl fmt::Display for SoftPolicyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ignoring restart policy '{}' for '{}' (expected no, always, unless-stopped or on-failure[:max-retries])",
            self.policy, self.service
        )
    }
}

/// Output of [`restart_flag`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestartFlag {
    pub args: Vec<String>,
    pub warning: Option<SoftPolicyWarning>,
}

/// Everything needed to create one container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationDescriptor {
    /// Namespaced container name
    pub name: String,
    /// Flags preceding the image
    pub args: Vec<String>,
    pub image: String,
    /// Command following the image
    pub command: Vec<String>,
    pub warnings: Vec<SoftPolicyWarning>,
}

impl InvocationDescriptor {
    /// Arguments for a detached `run`: flags, image, then command.
    pub fn run_args(&self) -> Vec<String> {
        let mut args = self.args.clone();
        args.push(self.image.clone());
        args.extend(self.command.iter().cloned());
        args
    }
}

fn repeated(flag: &str, values: &[String]) -> Vec<String> {
    values.iter().flat_map(|v| [flag.to_string(), v.clone()]).collect()
}

fn optional(flag: &str, value: Option<&str>) -> Vec<String> {
    match value {
        Some(v) if !v.is_empty() => vec![flag.to_string(), v.to_string()],
        _ => Vec::new(),
    }
}

pub fn env_flags(environment: &[String]) -> Vec<String> {
    repeated("-e", environment)
}

pub fn port_flags(ports: &[String]) -> Vec<String> {
    repeated("-p", ports)
}

pub fn volume_flags(volumes: &[String]) -> Vec<String> {
    repeated("-v", volumes)
}

pub fn host_flags(hosts: &[String]) -> Vec<String> {
    hosts.iter().map(|h| format!("--add-host={h}")).collect()
}

pub fn hostname_flag(hostname: Option<&str>) -> Vec<String> {
    optional("--hostname", hostname)
}

pub fn platform_flag(platform: Option<&str>) -> Vec<String> {
    optional("--platform", platform)
}

pub fn network_flag(network: Option<&str>) -> Vec<String> {
    match network {
        Some(n) if !n.is_empty() => vec![format!("--network={n}")],
        _ => Vec::new(),
    }
}

/// Translate a restart policy, rejecting malformed ones softly.
pub fn restart_flag(policy: Option<&str>, name: &str) -> RestartFlag {
    let Some(policy) = policy else {
        return RestartFlag::default();
    };
    if is_valid_restart_policy(policy) {
        return RestartFlag { args: vec!["--restart".to_string(), policy.to_string()], warning: None };
    }
    let warning = SoftPolicyWarning { service: name.to_string(), policy: policy.to_string() };
    tracing::warn!(service = name, policy, "invalid restart policy ignored");
    RestartFlag { args: Vec::new(), warning: Some(warning) }
}

fn is_valid_restart_policy(policy: &str) -> bool {
    match policy {
        "no" | "always" | "unless-stopped" | "on-failure" => true,
        _ => policy
            .strip_prefix("on-failure:")
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit())),
    }
}

pub fn privileged_flag(privileged: bool) -> Vec<String> {
    if privileged {
        vec!["--privileged".to_string()]
    } else {
        Vec::new()
    }
}

pub fn user_flag(user: Option<&str>) -> Vec<String> {
    optional("--user", user)
}

pub fn name_flag(name: &str) -> Vec<String> {
    vec!["--name".to_string(), container_name(name)]
}

pub fn link_flags(links: &[String]) -> Vec<String> {
    repeated("--link", links)
}

/// Ordered container flags for a definition, ending with `--name`.
pub fn container_flags(name: &str, def: &ServiceDef) -> (Vec<String>, Option<SoftPolicyWarning>) {
    let restart = restart_flag(def.restart.as_deref(), name);
    let args = [
        env_flags(&def.environment),
        port_flags(&def.ports),
        volume_flags(&def.volumes),
        host_flags(&def.hosts),
        hostname_flag(def.hostname.as_deref()),
        platform_flag(def.platform.as_deref()),
        network_flag(def.network.as_deref()),
        restart.args,
        privileged_flag(def.privileged),
        user_flag(def.user.as_deref()),
        name_flag(name),
    ]
    .concat();
    (args, restart.warning)
}

/// Detached service container running its image's default command.
pub fn service_invocation(name: &str, def: &ServiceDef, image: &str) -> InvocationDescriptor {
    let (args, warning) = container_flags(name, def);
    InvocationDescriptor {
        name: container_name(name),
        args,
        image: image.to_string(),
        command: Vec::new(),
        warnings: warning.into_iter().collect(),
    }
}

/// Idle primary container with the project directory mounted at the workdir.
pub fn primary_invocation(
    config: &ResolvedConfig,
    links: &[String],
    image: &str,
    host_dir: &Path,
) -> InvocationDescriptor {
    let workdir = config.workdir();
    let mut args = vec![
        "-v".to_string(),
        format!("{}:{}", host_dir.display(), workdir),
        "-w".to_string(),
        workdir.to_string(),
    ];
    let (flags, warning) = container_flags(config.name(), &config.primary);
    args.extend(flags);
    args.extend(link_flags(links));
    InvocationDescriptor {
        name: container_name(config.name()),
        args,
        image: image.to_string(),
        command: IDLE_COMMAND.iter().map(|s| s.to_string()).collect(),
        warnings: warning.into_iter().collect(),
    }
}

#[cfg(test)]
#[path = "invocation_tests.rs"]
mod tests;
