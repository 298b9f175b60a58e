// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration composer.
//!
//! Layers a validated [`TestOverlay`] under the `test` key of a
//! [`BaseConfig`] and hands the result to a [`ConfigConsumer`].

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::base::BaseConfig;
use crate::error::Result;
use crate::merge::{ArrayMerge, merge_maps};
use crate::overlay::{CoverageProvider, CoverageReporter, Environment, TestOverlay, Thresholds};

/// Top-level key the test engine reads its settings from.
pub const TEST_KEY: &str = "test";

/// Anything that accepts a composed configuration.
///
/// Keeps the composer free of engine-specific types.
pub trait ConfigConsumer {
    fn consume(&mut self, merged: &MergedConfig) -> Result<()>;
}

/// Composes base and overlay under a fixed merge policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Composer {
    arrays: ArrayMerge,
}

impl Composer {
    pub fn new(arrays: ArrayMerge) -> Self {
        Self { arrays }
    }

    pub fn arrays(&self) -> ArrayMerge {
        self.arrays
    }

    /// Validate `overlay` and deep-merge it onto `base`.
    ///
    /// Pure: neither input is modified and the result shares nothing with them.
    pub fn compose(&self, base: &BaseConfig, overlay: &TestOverlay) -> Result<MergedConfig> {
        overlay.validate()?;

        let mut layer = Map::new();
        layer.insert(TEST_KEY.to_string(), overlay.to_value()?);

        let merged = merge_maps(base.as_map(), &layer, self.arrays);
        tracing::debug!(
            base_keys = base.as_map().len(),
            merged_keys = merged.len(),
            arrays = ?self.arrays,
            "composed config"
        );

        Ok(MergedConfig {
            value: Value::Object(merged),
        })
    }

    /// Compose and hand the result to `consumer`.
    pub fn compose_into<C: ConfigConsumer + ?Sized>(
        &self,
        base: &BaseConfig,
        overlay: &TestOverlay,
        consumer: &mut C,
    ) -> Result<MergedConfig> {
        let merged = self.compose(base, overlay)?;
        consumer.consume(&merged)?;
        Ok(merged)
    }
}

/// Compose with the default (replace) sequence policy.
pub fn compose(base: &BaseConfig, overlay: &TestOverlay) -> Result<MergedConfig> {
    Composer::default().compose(base, overlay)
}

/// The single configuration handed to the test engine.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedConfig {
    value: Value,
}

impl MergedConfig {
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Look up a value by JSON pointer (e.g. `/test/coverage/provider`).
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        self.value.pointer(pointer)
    }

    /// The engine's `test` section.
    pub fn test(&self) -> Option<&Map<String, Value>> {
        self.value.get(TEST_KEY)?.as_object()
    }

    pub fn environment(&self) -> Option<Environment> {
        self.typed("/test/environment")
    }

    pub fn exclude_patterns(&self) -> Vec<String> {
        self.typed("/test/exclude").unwrap_or_default()
    }

    pub fn root_path(&self) -> Option<PathBuf> {
        self.typed("/test/root")
    }

    pub fn globals_enabled(&self) -> bool {
        self.typed("/test/globals").unwrap_or(false)
    }

    pub fn coverage_provider(&self) -> Option<CoverageProvider> {
        self.typed("/test/coverage/provider")
    }

    pub fn coverage_reporters(&self) -> Vec<CoverageReporter> {
        self.typed("/test/coverage/reporter").unwrap_or_default()
    }

    pub fn coverage_exclude(&self) -> Vec<String> {
        self.typed("/test/coverage/exclude").unwrap_or_default()
    }

    pub fn coverage_thresholds(&self) -> Thresholds {
        let metric = |name: &str| self.typed(&format!("/test/coverage/thresholds/{name}"));
        Thresholds {
            branches: metric("branches"),
            functions: metric("functions"),
            lines: metric("lines"),
            statements: metric("statements"),
        }
    }

    pub fn reporters(&self) -> Vec<String> {
        self.typed("/test/reporters").unwrap_or_default()
    }

    pub fn output_file(&self) -> BTreeMap<String, PathBuf> {
        self.typed("/test/outputFile").unwrap_or_default()
    }

    /// Deserialize the value at `pointer`; absent or mistyped values are `None`.
    fn typed<T: DeserializeOwned>(&self, pointer: &str) -> Option<T> {
        let value = self.value.pointer(pointer)?;
        serde_json::from_value(value.clone()).ok()
    }
}

#[cfg(test)]
#[path = "compose_tests.rs"]
mod tests;
