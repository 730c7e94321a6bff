// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config invariants checked before any environment is started.
//!
//! Every check runs so the user sees all problems at once.

use crate::types::ResolvedConfig;
use std::collections::HashSet;
use std::fmt;

/// A single violated invariant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    MissingName,
    NoTasks,
    MissingImage,
    ServiceMissingImage(String),
    DuplicateService(String),
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "Configuration must have a 'name' property set"),
            Self::NoTasks => write!(f, "Configuration must have at least one task"),
            Self::MissingImage => write!(f, "Configuration must have a 'image' or 'build' specified"),
            Self::ServiceMissingImage(name) => {
                write!(f, "Service {name} must have a 'image' or 'build' specified")
            }
            Self::DuplicateService(name) => write!(f, "Service {name} is defined more than once"),
        }
    }
}

/// All invariants violated by a config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.issues.iter().map(ToString::to_string).collect();
        f.write_str(&lines.join("\n"))
    }
}

impl std::error::Error for ValidationError {}

pub fn validate(config: &ResolvedConfig) -> Result<(), ValidationError> {
    let mut issues = Vec::new();

    if config.name().trim().is_empty() {
        issues.push(ValidationIssue::MissingName);
    }
    if config.user_tasks().next().is_none() {
        issues.push(ValidationIssue::NoTasks);
    }
    if !config.primary.has_image_source() {
        issues.push(ValidationIssue::MissingImage);
    }
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for (name, service) in &config.services {
        if !service.has_image_source() {
            issues.push(ValidationIssue::ServiceMissingImage(name.clone()));
        }
        if !seen.insert(name.as_str()) && !duplicates.contains(name) {
            duplicates.push(name.clone());
        }
    }
    issues.extend(duplicates.into_iter().map(ValidationIssue::DuplicateService));

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { issues })
    }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
