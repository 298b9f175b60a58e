// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Writers for composed configuration.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::compose::{ConfigConsumer, MergedConfig};
use crate::error::{Error, Result};

/// Serialization format for a composed config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    /// Pick a format from an output file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            _ => None,
        }
    }
}

/// Serializes each consumed config to a writer.
pub struct WriterConsumer<W: Write> {
    writer: W,
    format: OutputFormat,
    target: PathBuf,
}

impl<W: Write> WriterConsumer<W> {
    /// `target` names the destination in error messages.
    pub fn new(writer: W, format: OutputFormat, target: impl Into<PathBuf>) -> Self {
        Self {
            writer,
            format,
            target: target.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn io_error(&self, source: std::io::Error) -> Error {
        Error::Io {
            path: self.target.clone(),
            source,
        }
    }
}

impl<W: Write> ConfigConsumer for WriterConsumer<W> {
    fn consume(&mut self, merged: &MergedConfig) -> Result<()> {
        let rendered = render(merged, self.format)?;
        self.writer
            .write_all(rendered.as_bytes())
            .and_then(|()| self.writer.flush())
            .map_err(|e| self.io_error(e))
    }
}

/// Render a merged config as text, newline-terminated.
pub fn render(merged: &MergedConfig, format: OutputFormat) -> Result<String> {
    let mut text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(merged.as_value())
            .map_err(|e| Error::Internal(format!("render json: {e}")))?,
        OutputFormat::Yaml => serde_yaml::to_string(merged.as_value())
            .map_err(|e| Error::Internal(format!("render yaml: {e}")))?,
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
