// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `extends` resolution.
//!
//! Resolution is one hop and non-transitive: the document named by an
//! `extends` field is merged in, but its own `extends` is dropped unread.
//! Service entries of the root and of its base apply their `extends` first,
//! each relative to the directory of the document that declares it.
//!
//! The two levels merge in opposite directions:
//! - root: `merge(root, base)` with [`MergePolicy::FillGaps`], so the root's
//!   scalars win and its sequence elements come first
//! - service: `merge(base, service)` with [`MergePolicy::Overwrite`], so the
//!   service's scalars win and the base's sequence elements come first

use crate::error::ConfigError;
use crate::format::{parse_document, Format};
use crate::merge::{deep_merge, MergePolicy};
use crate::types::{ResolvedConfig, DEFAULT_SHELL, SHELL_TASK};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

const EXTENDS: &str = "extends";

/// Loads and parses one document
pub trait DocumentLoader {
    fn load(&self, path: &Path) -> Result<Value, ConfigError>;
}

/// Reads documents from the filesystem, format chosen by extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl DocumentLoader for FsLoader {
    fn load(&self, path: &Path) -> Result<Value, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Load { path: path.to_path_buf(), source })?;
        parse_document(&content, Format::for_path(path))
            .map_err(|message| ConfigError::Parse { path: path.to_path_buf(), message })
    }
}

/// A config document with every `extends` applied
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDocument {
    pub path: PathBuf,
    pub value: Value,
}

impl ResolvedDocument {
    /// Convert into the typed config.
    pub fn into_config(self) -> Result<ResolvedConfig, ConfigError> {
        serde_json::from_value(self.value).map_err(|e| ConfigError::Shape(e.to_string()))
    }
}

/// Resolves a config document and the documents it extends
pub struct Resolver<L> {
    loader: L,
}

impl<L: DocumentLoader> Resolver<L> {
    pub fn new(loader: L) -> Self {
        Self { loader }
    }

    pub fn resolve(&self, path: &Path) -> Result<ResolvedDocument, ConfigError> {
        let mut root = self.load_mapping(path)?;
        self.extend_services(&mut root, path)?;

        if let Some(extends) = take_extends(&mut root, path)? {
            let base_path = parent_dir(path).join(extends);
            let mut base = self.load_base(&base_path)?;
            self.extend_services(&mut base, &base_path)?;
            tracing::debug!(path = %path.display(), base = %base_path.display(), "extending config");
            let mut merged = Value::Object(root);
            deep_merge(&mut merged, Value::Object(base), MergePolicy::FillGaps)
                .map_err(|source| ConfigError::Merge { path: path.to_path_buf(), source })?;
            root = match merged {
                Value::Object(map) => map,
                _ => Map::new(),
            };
        }

        inject_shell_task(&mut root);

        Ok(ResolvedDocument { path: path.to_path_buf(), value: Value::Object(root) })
    }

    /// Apply service-level `extends` of one document, relative to that
    /// document's directory.
    fn extend_services(&self, doc: &mut Map<String, Value>, path: &Path) -> Result<(), ConfigError> {
        let Some(Value::Array(services)) = doc.get_mut("services") else {
            return Ok(());
        };
        let dir = parent_dir(path);
        for entry in services.iter_mut() {
            let Value::Object(entry) = entry else { continue };
            for (name, body) in entry.iter_mut() {
                let Value::Object(service) = body else { continue };
                let Some(extends) = take_extends(service, path)? else { continue };
                let base_path = dir.join(extends);
                let mut merged = Value::Object(self.load_base(&base_path)?);
                tracing::debug!(service = %name, base = %base_path.display(), "extending service");
                deep_merge(&mut merged, Value::Object(std::mem::take(service)), MergePolicy::Overwrite)
                    .map_err(|source| ConfigError::Merge { path: base_path.clone(), source })?;
                *body = merged;
            }
        }
        Ok(())
    }

    /// Load a document that must be a non-empty mapping.
    fn load_mapping(&self, path: &Path) -> Result<Map<String, Value>, ConfigError> {
        match self.loader.load(path)? {
            Value::Null => Err(ConfigError::Empty { path: path.to_path_buf() }),
            Value::Object(map) if map.is_empty() => Err(ConfigError::Empty { path: path.to_path_buf() }),
            Value::Object(map) => Ok(map),
            _ => Err(ConfigError::Parse {
                path: path.to_path_buf(),
                message: "top level must be a mapping".to_string(),
            }),
        }
    }

    /// Load an extended document; its own `extends` is not followed.
    fn load_base(&self, path: &Path) -> Result<Map<String, Value>, ConfigError> {
        let mut base = self.load_mapping(path)?;
        if base.contains_key(EXTENDS) {
            tracing::warn!(path = %path.display(), "ignoring nested 'extends' in extended config");
            base.retain(|key, _| key != EXTENDS);
        }
        Ok(base)
    }
}

/// Remove and return the `extends` path of a mapping.
fn take_extends(map: &mut Map<String, Value>, path: &Path) -> Result<Option<String>, ConfigError> {
    let extends = match map.get(EXTENDS) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(ConfigError::InvalidExtends { path: path.to_path_buf() }),
    };
    map.retain(|key, _| key != EXTENDS);
    Ok(extends)
}

fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new(""))
}

fn inject_shell_task(root: &mut Map<String, Value>) {
    let shell = root.get("shell").and_then(Value::as_str).unwrap_or(DEFAULT_SHELL).to_string();
    let tasks = root.entry("tasks").or_insert_with(|| Value::Object(Map::new()));
    if tasks.is_null() {
        *tasks = Value::Object(Map::new());
    }
    if let Value::Object(tasks) = tasks {
        tasks.insert(SHELL_TASK.to_string(), Value::String(shell));
    }
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
