// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::merge::ArrayMerge;
use crate::output::OutputFormat;
use crate::overlay::DEFAULT_FILE_NAME;

/// Composes test-runner configuration from a base build config and a test overlay
#[derive(Parser)]
#[command(name = "testrig")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific overlay file
    #[arg(short = 'C', long = "config", global = true, env = "TESTRIG_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Overlay file to load: `--config`, or `testrig.toml` in the working directory.
    pub fn config_path(&self) -> &Path {
        self.config
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_FILE_NAME))
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge the overlay onto a base config and print the result
    Compose(ComposeArgs),
    /// Validate the overlay file without composing
    Validate,
    /// Print the default exclusion patterns
    Defaults,
    /// Print a shell completion script
    Completions(CompletionsArgs),
}

#[derive(clap::Args, Default)]
pub struct ComposeArgs {
    /// Base build config (.json, .toml, .yaml); empty when omitted
    #[arg(short, long, value_name = "FILE")]
    pub base: Option<PathBuf>,

    /// Output format (default: from --out extension, else json)
    #[arg(short, long)]
    pub output: Option<OutputFormat>,

    /// Write to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Sequence merge policy (overrides the overlay's [merge] arrays)
    #[arg(long)]
    pub arrays: Option<ArrayMerge>,
}

impl ComposeArgs {
    /// Explicit format, else the `--out` extension, else JSON.
    pub fn format(&self) -> OutputFormat {
        self.output
            .or_else(|| self.out.as_deref().and_then(OutputFormat::from_path))
            .unwrap_or_default()
    }
}

#[derive(clap::Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
