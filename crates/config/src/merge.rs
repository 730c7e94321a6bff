// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recursive merge of two config documents.
//!
//! For every key of the source document:
//! - mappings are merged recursively (a non-mapping target becomes `{}` first)
//! - sequences are unioned: target elements, then source elements, duplicates
//!   dropped by value with the first occurrence kept (a non-sequence target
//!   becomes `[]` first)
//! - scalars are written according to the [`MergePolicy`]
//!
//! Sequences union while scalars replace. A derived config can extend a base
//! `environment` or `ports` list without repeating it, but cannot remove
//! entries from it.

use serde_json::{Map, Value};
use thiserror::Error;

/// Maximum nesting depth accepted before the merge gives up.
pub const MAX_DEPTH: usize = 64;

/// How scalar values of the source are written into the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Source scalars replace target scalars.
    Overwrite,
    /// Source scalars are written only where the target has no value.
    FillGaps,
}

/// A structure the merge cannot reconcile
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    #[error("cannot merge at '{path}': expected a mapping, found {found}")]
    NotAMapping { path: String, found: &'static str },
    #[error("cannot merge at '{path}': nesting exceeds {MAX_DEPTH} levels")]
    TooDeep { path: String },
}

/// Merge `source` into `target` in place.
///
/// Both documents must be mappings at the top level. On error `target` may be
/// partially written and must be discarded by the caller.
pub fn deep_merge(target: &mut Value, source: Value, policy: MergePolicy) -> Result<(), MergeError> {
    let source = match source {
        Value::Object(map) => map,
        other => {
            return Err(MergeError::NotAMapping { path: "<root>".to_string(), found: kind(&other) })
        }
    };
    let found = kind(target);
    let target = target
        .as_object_mut()
        .ok_or_else(|| MergeError::NotAMapping { path: "<root>".to_string(), found })?;
    merge_maps(target, source, policy, "", 0)
}

fn merge_maps(
    target: &mut Map<String, Value>,
    source: Map<String, Value>,
    policy: MergePolicy,
    path: &str,
    depth: usize,
) -> Result<(), MergeError> {
    if depth >= MAX_DEPTH {
        return Err(MergeError::TooDeep { path: path.to_string() });
    }

    for (key, value) in source {
        let key_path = if path.is_empty() { key.clone() } else { format!("{path}.{key}") };
        match value {
            Value::Object(nested) => {
                let slot = target.entry(key).or_insert_with(|| Value::Object(Map::new()));
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
                if let Value::Object(slot) = slot {
                    merge_maps(slot, nested, policy, &key_path, depth + 1)?;
                }
            }
            Value::Array(items) => {
                let slot = target.entry(key).or_insert_with(|| Value::Array(Vec::new()));
                if !slot.is_array() {
                    *slot = Value::Array(Vec::new());
                }
                if let Value::Array(existing) = slot {
                    let mut combined = std::mem::take(existing);
                    combined.extend(items);
                    *existing = union(combined);
                }
            }
            scalar => match policy {
                MergePolicy::Overwrite => {
                    target.insert(key, scalar);
                }
                MergePolicy::FillGaps => {
                    let slot = target.entry(key).or_insert(Value::Null);
                    if slot.is_null() {
                        *slot = scalar;
                    }
                }
            },
        }
    }
    Ok(())
}

/// Drop repeated elements, keeping the first occurrence of each.
pub fn union(items: Vec<Value>) -> Vec<Value> {
    let mut unique: Vec<Value> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
