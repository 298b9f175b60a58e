// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test configuration composer.
//!
//! Deep-merges a test overlay onto a base build configuration and produces a
//! single config for an external test engine.

pub mod base;
pub mod cli;
pub mod compose;
pub mod error;
pub mod merge;
pub mod output;
pub mod overlay;

pub use base::{BaseConfig, BaseFormat};
pub use cli::{Cli, Command, ComposeArgs};
pub use compose::{Composer, ConfigConsumer, MergedConfig, compose};
pub use error::{Error, ExitCode, Result};
pub use merge::{ArrayMerge, deep_merge};
pub use output::{OutputFormat, WriterConsumer};
pub use overlay::{
    CoverageConfig, CoverageProvider, CoverageReporter, Environment, ExcludePatterns,
    OverlayDocument, TestOverlay, Thresholds,
};
