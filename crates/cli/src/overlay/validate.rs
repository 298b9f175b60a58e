// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shape validation for test overlays.

use std::path::Path;

use globset::Glob;

use super::{TestOverlay, Thresholds};
use crate::error::{Error, Result};

/// Lowest accepted coverage threshold.
pub const MIN_PERCENT: f64 = 0.0;

/// Highest accepted coverage threshold.
pub const MAX_PERCENT: f64 = 100.0;

/// Validate every constraint on `overlay`, failing on the first violation.
pub fn validate(overlay: &TestOverlay) -> Result<()> {
    validate_root(&overlay.root)?;
    validate_thresholds(&overlay.coverage.thresholds)?;
    validate_globs("exclude", &overlay.exclude.resolved())?;
    validate_globs("coverage.exclude", &overlay.coverage.exclude)?;
    validate_reporters(overlay)?;
    warn_orphan_output_files(overlay);
    Ok(())
}

/// The root must be absolute and name an existing directory.
pub fn validate_root(root: &Path) -> Result<()> {
    if !root.is_absolute() {
        return Err(Error::shape(
            "root",
            format!("{} is not an absolute path", root.display()),
        ));
    }
    if !root.is_dir() {
        return Err(Error::shape(
            "root",
            format!("{} is not an existing directory", root.display()),
        ));
    }
    Ok(())
}

/// Every set threshold must be a finite percentage in 0..=100.
pub fn validate_thresholds(thresholds: &Thresholds) -> Result<()> {
    for (metric, value) in thresholds.metrics() {
        if let Some(value) = value {
            validate_percent(metric, value)?;
        }
    }
    Ok(())
}

fn validate_percent(metric: &str, value: f64) -> Result<()> {
    if value.is_finite() && (MIN_PERCENT..=MAX_PERCENT).contains(&value) {
        return Ok(());
    }
    Err(Error::shape(
        format!("coverage.thresholds.{metric}"),
        format!("{value} is outside {MIN_PERCENT}..={MAX_PERCENT}"),
    ))
}

fn validate_globs(field: &str, patterns: &[String]) -> Result<()> {
    for pattern in patterns {
        if pattern.is_empty() {
            return Err(Error::shape(field, "empty glob pattern"));
        }
        Glob::new(pattern).map_err(|e| Error::shape(field, format!("`{pattern}`: {e}")))?;
    }
    Ok(())
}

fn validate_reporters(overlay: &TestOverlay) -> Result<()> {
    if overlay.reporters.iter().any(|r| r.trim().is_empty()) {
        return Err(Error::shape("reporters", "empty reporter tag"));
    }
    for (reporter, path) in &overlay.output_file {
        if reporter.trim().is_empty() {
            return Err(Error::shape("output_file", "empty reporter tag"));
        }
        if path.as_os_str().is_empty() {
            return Err(Error::shape(
                format!("output_file.{reporter}"),
                "empty destination path",
            ));
        }
    }
    Ok(())
}

/// `output_file` keys naming a reporter absent from `reporters`.
pub fn orphan_output_files(overlay: &TestOverlay) -> Vec<&str> {
    overlay
        .output_file
        .keys()
        .filter(|reporter| !overlay.reporters.contains(reporter))
        .map(String::as_str)
        .collect()
}

fn warn_orphan_output_files(overlay: &TestOverlay) {
    for reporter in orphan_output_files(overlay) {
        eprintln!(
            "testrig: warning: output_file.{}: reporter `{}` is not listed in reporters (file is never written)",
            reporter, reporter
        );
    }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
