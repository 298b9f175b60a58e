// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Engine-facing field names for the overlay.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use super::{CoverageConfig, CoverageProvider, CoverageReporter, Environment, TestOverlay, Thresholds};
use crate::error::{Error, Result};

/// Largest magnitude an `f64` holds as an exact integer.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireOverlay<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    environment: Option<Environment>,
    exclude: Vec<String>,
    root: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    globals: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    coverage: Option<WireCoverage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    reporters: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    output_file: BTreeMap<&'a str, &'a str>,
}

#[derive(Serialize)]
struct WireCoverage {
    #[serde(skip_serializing_if = "Option::is_none")]
    provider: Option<CoverageProvider>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    reporter: Vec<CoverageReporter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    exclude: Vec<String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    thresholds: Map<String, Value>,
}

impl From<&CoverageConfig> for WireCoverage {
    fn from(coverage: &CoverageConfig) -> Self {
        Self {
            provider: coverage.provider,
            reporter: coverage.reporters.clone(),
            exclude: coverage.exclude.clone(),
            thresholds: thresholds(&coverage.thresholds),
        }
    }
}

pub(super) fn to_value(overlay: &TestOverlay) -> Result<Value> {
    let output_file = overlay
        .output_file
        .iter()
        .map(|(reporter, path)| {
            utf8(path, &format!("output_file.{reporter}")).map(|p| (reporter.as_str(), p))
        })
        .collect::<Result<BTreeMap<_, _>>>()?;

    let wire = WireOverlay {
        environment: overlay.environment,
        exclude: overlay.exclude.resolved(),
        root: utf8(&overlay.root, "root")?,
        globals: overlay.globals,
        coverage: (!overlay.coverage.is_empty()).then(|| WireCoverage::from(&overlay.coverage)),
        reporters: overlay.reporters.clone(),
        output_file,
    };

    serde_json::to_value(wire).map_err(|e| Error::Internal(format!("serialize overlay: {e}")))
}

fn thresholds(thresholds: &Thresholds) -> Map<String, Value> {
    thresholds
        .metrics()
        .into_iter()
        .filter_map(|(metric, value)| value.map(|v| (metric.to_string(), percent(v))))
        .collect()
}

/// Whole percentages keep the integer form they were written in.
fn percent(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

fn utf8<'a>(path: &'a Path, field: &str) -> Result<&'a str> {
    path.to_str()
        .ok_or_else(|| Error::shape(field, format!("{} is not valid UTF-8", path.display())))
}
