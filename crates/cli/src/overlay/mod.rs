// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test overlay: the test-specific settings layered onto a base config.
//!
//! The overlay is typed here and lowered to the engine's wire shape by
//! [`TestOverlay::to_value`]. Files are loaded through [`load`] or
//! [`load_with_warnings`].

mod defaults;
mod parse;
mod suggest;
pub mod validate;
mod wire;

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use defaults::{DEFAULT_EXCLUDE, default_exclude};
pub use parse::{
    DEFAULT_FILE_NAME, OverlayDocument, SUPPORTED_VERSION, load, load_with_warnings, parse,
    parse_with_warnings,
};
pub use suggest::{suggest_coverage_key, suggest_test_key};

use crate::error::Result;

/// Execution sandbox for tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Environment {
    /// Plain runtime, no DOM.
    #[default]
    Node,
    /// Generic DOM simulation.
    Dom,
    Jsdom,
    HappyDom,
    EdgeRuntime,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Node => "node",
            Environment::Dom => "dom",
            Environment::Jsdom => "jsdom",
            Environment::HappyDom => "happy-dom",
            Environment::EdgeRuntime => "edge-runtime",
        }
    }

    /// Whether tests in this environment see a simulated DOM.
    pub fn simulates_dom(&self) -> bool {
        matches!(
            self,
            Environment::Dom | Environment::Jsdom | Environment::HappyDom
        )
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coverage instrumentation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageProvider {
    #[default]
    V8,
    Istanbul,
    Custom,
}

/// Coverage report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoverageReporter {
    Text,
    TextSummary,
    Json,
    JsonSummary,
    Html,
    Lcov,
    Lcovonly,
    Clover,
    Cobertura,
    Teamcity,
}

/// Minimum coverage percentages; unset metrics are not enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Thresholds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functions: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statements: Option<f64>,
}

impl Thresholds {
    /// Same minimum for all four metrics.
    pub fn uniform(percent: f64) -> Self {
        Self {
            branches: Some(percent),
            functions: Some(percent),
            lines: Some(percent),
            statements: Some(percent),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.metrics().iter().all(|(_, v)| v.is_none())
    }

    /// Metric name and value pairs in a fixed order.
    pub fn metrics(&self) -> [(&'static str, Option<f64>); 4] {
        [
            ("branches", self.branches),
            ("functions", self.functions),
            ("lines", self.lines),
            ("statements", self.statements),
        ]
    }
}

/// Coverage instrumentation and reporting settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageConfig {
    pub provider: Option<CoverageProvider>,
    pub reporters: Vec<CoverageReporter>,
    /// Globs excluded from coverage instrumentation.
    pub exclude: Vec<String>,
    pub thresholds: Thresholds,
}

impl CoverageConfig {
    /// Nothing declared; the base's coverage settings pass through untouched.
    pub fn is_empty(&self) -> bool {
        self.provider.is_none()
            && self.reporters.is_empty()
            && self.exclude.is_empty()
            && self.thresholds.is_empty()
    }
}

/// Exclusion globs: a default set followed by project-specific entries.
#[derive(Debug, Clone, PartialEq)]
pub struct ExcludePatterns {
    defaults: Vec<String>,
    extra: Vec<String>,
}

impl Default for ExcludePatterns {
    fn default() -> Self {
        Self::new()
    }
}

impl ExcludePatterns {
    /// Seeded with [`DEFAULT_EXCLUDE`].
    pub fn new() -> Self {
        Self::with_defaults(default_exclude())
    }

    /// Seeded with a caller-supplied default set.
    pub fn with_defaults(defaults: Vec<String>) -> Self {
        Self {
            defaults,
            extra: Vec::new(),
        }
    }

    /// Append project-specific patterns after the defaults.
    pub fn extend<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra.extend(patterns.into_iter().map(Into::into));
    }

    pub fn defaults(&self) -> &[String] {
        &self.defaults
    }

    pub fn extra(&self) -> &[String] {
        &self.extra
    }

    /// Defaults, then extras not already present.
    pub fn resolved(&self) -> Vec<String> {
        let mut out = self.defaults.clone();
        for pattern in &self.extra {
            if !out.contains(pattern) {
                out.push(pattern.clone());
            }
        }
        out
    }
}

/// Test-specific settings layered onto a [`BaseConfig`](crate::BaseConfig).
///
/// Fields left as `None` are not emitted, so the base's value survives.
#[derive(Debug, Clone, PartialEq)]
pub struct TestOverlay {
    pub environment: Option<Environment>,
    pub exclude: ExcludePatterns,
    /// Resolution base for relative patterns; must be absolute.
    pub root: PathBuf,
    /// Expose test primitives without explicit imports.
    pub globals: Option<bool>,
    pub coverage: CoverageConfig,
    pub reporters: Vec<String>,
    /// Reporter tag to destination file.
    pub output_file: BTreeMap<String, PathBuf>,
}

impl TestOverlay {
    /// Overlay rooted at `root` that declares nothing else.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            environment: None,
            exclude: ExcludePatterns::new(),
            root: root.into(),
            globals: None,
            coverage: CoverageConfig::default(),
            reporters: Vec::new(),
            output_file: BTreeMap::new(),
        }
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn with_exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(patterns);
        self
    }

    pub fn with_globals(mut self, globals: bool) -> Self {
        self.globals = Some(globals);
        self
    }

    pub fn with_coverage(mut self, coverage: CoverageConfig) -> Self {
        self.coverage = coverage;
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.coverage.thresholds = thresholds;
        self
    }

    pub fn with_reporter(mut self, reporter: impl Into<String>) -> Self {
        self.reporters.push(reporter.into());
        self
    }

    pub fn with_output_file(mut self, reporter: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.output_file.insert(reporter.into(), path.into());
        self
    }

    /// Check every documented constraint.
    pub fn validate(&self) -> Result<()> {
        validate::validate(self)
    }

    /// Lower to the engine's wire shape (the contents of the `test` key).
    pub fn to_value(&self) -> Result<serde_json::Value> {
        wire::to_value(self)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
