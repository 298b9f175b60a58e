// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Base build configuration.
//!
//! The base is opaque to testrig: any mapping loaded from JSON, TOML, or YAML.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Read-only build-tool settings the overlay is layered onto.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseConfig {
    settings: Map<String, Value>,
}

/// On-disk format of a base config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseFormat {
    Json,
    Toml,
    Yaml,
}

impl BaseFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(BaseFormat::Json),
            "toml" => Some(BaseFormat::Toml),
            "yaml" | "yml" => Some(BaseFormat::Yaml),
            _ => None,
        }
    }
}

impl BaseConfig {
    /// An empty base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a structural value; it must be a mapping.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(settings) => Ok(Self { settings }),
            Value::Null => Ok(Self::default()),
            other => Err(Error::shape(
                "base",
                format!("expected a mapping at the top level, found {}", kind(&other)),
            )),
        }
    }

    /// Load a base config file, picking the format from its extension.
    pub fn load(path: &Path) -> Result<Self> {
        let format = BaseFormat::from_path(path).ok_or_else(|| Error::Config {
            message: format!(
                "unsupported base config format: {} (use .json, .toml, .yaml, or .yml)",
                path.display()
            ),
            path: Some(path.to_path_buf()),
        })?;

        let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content, format, path)
    }

    /// Parse base config content in the given format.
    pub fn parse(content: &str, format: BaseFormat, path: &Path) -> Result<Self> {
        let parsed: std::result::Result<Value, String> = match format {
            BaseFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            BaseFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            BaseFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        };

        let value = parsed.map_err(|message| Error::Config {
            message,
            path: Some(path.to_path_buf()),
        })?;

        tracing::debug!(path = %path.display(), ?format, "loaded base config");
        Self::from_value(value)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.settings
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}

impl From<Map<String, Value>> for BaseConfig {
    fn from(settings: Map<String, Value>) -> Self {
        Self { settings }
    }
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
#[path = "base_tests.rs"]
mod tests;
