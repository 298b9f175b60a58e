// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Structural deep merge of configuration values.
//!
//! Mappings are unioned with the overlay winning on conflict. How two
//! sequences combine is controlled by [`ArrayMerge`]. A `null` on the overlay
//! side never erases a base value.

use serde::Deserialize;
use serde_json::{Map, Value};

/// How a sequence in the overlay combines with a sequence in the base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ArrayMerge {
    /// The overlay's sequence replaces the base's (default).
    #[default]
    Replace,
    /// Base entries followed by overlay entries; scalars are promoted to
    /// single-element sequences.
    Concat,
}

/// Deep-merge `overlay` onto `base`, returning a fresh value.
pub fn deep_merge(base: &Value, overlay: &Value, arrays: ArrayMerge) -> Value {
    match (base, overlay) {
        (_, Value::Null) => base.clone(),
        (Value::Object(b), Value::Object(o)) => Value::Object(merge_maps(b, o, arrays)),
        (Value::Null, _) => overlay.clone(),
        (Value::Array(_), _) | (_, Value::Array(_)) if arrays == ArrayMerge::Concat => {
            let mut out = arraify(base);
            out.extend(arraify(overlay));
            Value::Array(out)
        }
        _ => overlay.clone(),
    }
}

/// Deep-merge two mappings.
pub fn merge_maps(
    base: &Map<String, Value>,
    overlay: &Map<String, Value>,
    arrays: ArrayMerge,
) -> Map<String, Value> {
    let mut out = base.clone();
    for (key, value) in overlay {
        if value.is_null() {
            continue;
        }
        let merged = match base.get(key) {
            Some(existing) => deep_merge(existing, value, arrays),
            None => value.clone(),
        };
        out.insert(key.clone(), merged);
    }
    out
}

fn arraify(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        other => vec![other.clone()],
    }
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
