// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `testrig compose` command implementation.

use std::fs::File;
use std::io::BufWriter;

use anyhow::Result;

use testrig::cli::{Cli, ComposeArgs};
use testrig::error::{Error, ExitCode};
use testrig::{BaseConfig, Composer, ConfigConsumer, WriterConsumer, overlay};

pub fn run(cli: &Cli, args: &ComposeArgs) -> Result<ExitCode> {
    let doc = overlay::load_with_warnings(cli.config_path())?;

    let base = match &args.base {
        Some(path) => BaseConfig::load(path)?,
        None => BaseConfig::new(),
    };

    let composer = Composer::new(args.arrays.unwrap_or(doc.arrays));
    let format = args.format();

    // Fail before --out is created or truncated.
    let merged = composer.compose(&base, &doc.overlay)?;

    match &args.out {
        Some(path) => {
            let file = File::create(path).map_err(|e| Error::Io {
                path: path.clone(),
                source: e,
            })?;
            WriterConsumer::new(BufWriter::new(file), format, path).consume(&merged)?;
            tracing::debug!(out = %path.display(), "wrote merged config");
        }
        None => {
            let stdout = std::io::stdout();
            WriterConsumer::new(stdout.lock(), format, "<stdout>").consume(&merged)?;
        }
    }

    Ok(ExitCode::Success)
}
