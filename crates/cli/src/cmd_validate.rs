// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `testrig validate` command implementation.

use anyhow::Result;

use testrig::cli::Cli;
use testrig::error::ExitCode;
use testrig::overlay;

pub fn run(cli: &Cli) -> Result<ExitCode> {
    let path = cli.config_path();
    let doc = overlay::load_with_warnings(path)?;
    doc.overlay.validate()?;

    println!("{}: ok", path.display());
    Ok(ExitCode::Success)
}
