// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Overlay file loading.
//!
//! Handles testrig.toml parsing with version validation and unknown key warnings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::suggest::{warn_unknown_coverage_key, warn_unknown_test_key};
use super::{
    CoverageConfig, CoverageProvider, CoverageReporter, Environment, ExcludePatterns,
    TestOverlay, Thresholds,
};
use crate::error::{Error, Result};
use crate::merge::ArrayMerge;

/// Overlay file looked up when no path is given.
pub const DEFAULT_FILE_NAME: &str = "testrig.toml";

/// Currently supported overlay file version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Known top-level keys in the overlay file.
const KNOWN_KEYS: &[&str] = &["version", "merge", "test"];

/// Known `[merge]` keys.
const KNOWN_MERGE_KEYS: &[&str] = &["arrays"];

/// Known `[test.coverage.thresholds]` keys.
const KNOWN_THRESHOLD_KEYS: &[&str] = &["branches", "functions", "lines", "statements", "global"];

/// Minimum structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OverlayFile {
    #[allow(dead_code)] // Checked before the full parse
    version: i64,

    #[serde(default)]
    merge: MergeSection,

    #[serde(default)]
    test: TestSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct MergeSection {
    arrays: ArrayMerge,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TestSection {
    environment: Option<Environment>,
    exclude: Vec<String>,
    root: Option<PathBuf>,
    globals: Option<bool>,
    coverage: CoverageSection,
    reporters: Vec<String>,
    output_file: BTreeMap<String, PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CoverageSection {
    provider: Option<CoverageProvider>,
    reporter: Vec<CoverageReporter>,
    exclude: Vec<String>,
    thresholds: ThresholdsSection,
}

/// Thresholds, optionally nested under `global`; top-level values win.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ThresholdsSection {
    branches: Option<f64>,
    functions: Option<f64>,
    lines: Option<f64>,
    statements: Option<f64>,
    global: Option<Thresholds>,
}

impl ThresholdsSection {
    fn resolve(self) -> Thresholds {
        let global = self.global.unwrap_or_default();
        Thresholds {
            branches: self.branches.or(global.branches),
            functions: self.functions.or(global.functions),
            lines: self.lines.or(global.lines),
            statements: self.statements.or(global.statements),
        }
    }
}

/// A loaded overlay file.
#[derive(Debug, Clone)]
pub struct OverlayDocument {
    /// File the overlay was read from.
    pub path: PathBuf,
    /// Sequence merge policy from `[merge]`.
    pub arrays: ArrayMerge,
    pub overlay: TestOverlay,
}

/// Load an overlay file (strict mode).
pub fn load(path: &Path) -> Result<OverlayDocument> {
    let content = read(path)?;
    parse(&content, path)
}

/// Load an overlay file with warnings for unknown keys.
pub fn load_with_warnings(path: &Path) -> Result<OverlayDocument> {
    let content = read(path)?;
    parse_with_warnings(&content, path)
}

/// Parse overlay content (strict mode).
///
/// `path` locates the file: a missing or relative `root` resolves against
/// its directory.
pub fn parse(content: &str, path: &Path) -> Result<OverlayDocument> {
    let version_check: VersionOnly =
        toml::from_str(content).map_err(|e| config_error(e.to_string(), path))?;
    check_version(version_check.version, path)?;

    let file: OverlayFile =
        toml::from_str(content).map_err(|e| config_error(e.to_string(), path))?;
    into_document(file, path)
}

/// Parse overlay content, warning on unknown keys instead of failing.
pub fn parse_with_warnings(content: &str, path: &Path) -> Result<OverlayDocument> {
    let mut table: toml::Table =
        toml::from_str(content).map_err(|e| config_error(e.to_string(), path))?;
    check_version(table.get("version").and_then(|v| v.as_integer()), path)?;

    strip_unknown_keys(&mut table, path);

    let file: OverlayFile = toml::Value::Table(table)
        .try_into()
        .map_err(|e: toml::de::Error| config_error(e.to_string(), path))?;
    into_document(file, path)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

fn config_error(message: String, path: &Path) -> Error {
    Error::Config {
        message,
        path: Some(path.to_path_buf()),
    }
}

fn check_version(version: Option<i64>, path: &Path) -> Result<()> {
    let version = version
        .ok_or_else(|| config_error("missing required field: version".to_string(), path))?;

    if version != SUPPORTED_VERSION {
        return Err(config_error(
            format!(
                "unsupported config version {} (supported: {})\n  Upgrade testrig to use this config.",
                version, SUPPORTED_VERSION
            ),
            path,
        ));
    }
    Ok(())
}

fn into_document(file: OverlayFile, path: &Path) -> Result<OverlayDocument> {
    let test = file.test;
    let root = resolve_root(test.root, path)?;

    let mut exclude = ExcludePatterns::new();
    exclude.extend(test.exclude);

    let overlay = TestOverlay {
        environment: test.environment,
        exclude,
        root,
        globals: test.globals,
        coverage: CoverageConfig {
            provider: test.coverage.provider,
            reporters: test.coverage.reporter,
            exclude: test.coverage.exclude,
            thresholds: test.coverage.thresholds.resolve(),
        },
        reporters: test.reporters,
        output_file: test.output_file,
    };

    tracing::debug!(
        path = %path.display(),
        environment = ?overlay.environment,
        root = %overlay.root.display(),
        "parsed overlay"
    );

    Ok(OverlayDocument {
        path: path.to_path_buf(),
        arrays: file.merge.arrays,
        overlay,
    })
}

/// Resolve `root` against the overlay file's directory.
fn resolve_root(root: Option<PathBuf>, path: &Path) -> Result<PathBuf> {
    let file = std::path::absolute(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let dir = file.parent().map(Path::to_path_buf).unwrap_or(file.clone());

    let root = match root {
        Some(root) if root.is_absolute() => root,
        Some(root) => dir.join(root),
        None => dir,
    };
    Ok(root.components().collect())
}

/// Drop keys the overlay schema doesn't know, warning about each.
fn strip_unknown_keys(table: &mut toml::Table, path: &Path) {
    for key in unknown_keys(table, KNOWN_KEYS) {
        table.remove(&key);
        warn_unknown_key(path, &key);
    }

    if let Some(toml::Value::Table(merge)) = table.get_mut("merge") {
        for key in unknown_keys(merge, KNOWN_MERGE_KEYS) {
            merge.remove(&key);
            warn_unknown_key(path, &format!("merge.{}", key));
        }
    }

    let Some(toml::Value::Table(test)) = table.get_mut("test") else {
        return;
    };
    for key in unknown_keys(test, super::suggest::KNOWN_TEST_KEYS) {
        test.remove(&key);
        warn_unknown_test_key(path, &key);
    }

    let Some(toml::Value::Table(coverage)) = test.get_mut("coverage") else {
        return;
    };
    for key in unknown_keys(coverage, super::suggest::KNOWN_COVERAGE_KEYS) {
        coverage.remove(&key);
        warn_unknown_coverage_key(path, &key);
    }

    let Some(toml::Value::Table(thresholds)) = coverage.get_mut("thresholds") else {
        return;
    };
    for key in unknown_keys(thresholds, KNOWN_THRESHOLD_KEYS) {
        thresholds.remove(&key);
        warn_unknown_key(path, &format!("test.coverage.thresholds.{}", key));
    }

    if let Some(toml::Value::Table(global)) = thresholds.get_mut("global") {
        for key in unknown_keys(global, &KNOWN_THRESHOLD_KEYS[..4]) {
            global.remove(&key);
            warn_unknown_key(path, &format!("test.coverage.thresholds.global.{}", key));
        }
    }
}

fn unknown_keys(table: &toml::Table, known: &[&str]) -> Vec<String> {
    table
        .keys()
        .filter(|key| !known.contains(&key.as_str()))
        .cloned()
        .collect()
}

pub(super) fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "testrig: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
