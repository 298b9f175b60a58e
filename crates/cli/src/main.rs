// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Testrig CLI entry point.

use std::io::Write;

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt};

use testrig::cli::{Cli, Command};
use testrig::error::ExitCode;
use testrig::overlay::DEFAULT_EXCLUDE;

mod cmd_compose;
mod cmd_validate;

fn init_logging() {
    let filter = EnvFilter::try_from_env("TESTRIG_LOG").unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("testrig: {}", e);
            match e.downcast_ref::<testrig::Error>() {
                Some(err) => ExitCode::from(err),
                None => ExitCode::InternalError,
            }
        }
    };

    std::process::exit(exit_code as i32);
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            // Show help for bare invocation
            Cli::command().print_help()?;
            println!();
            Ok(ExitCode::Success)
        }
        Some(Command::Compose(args)) => cmd_compose::run(&cli, args),
        Some(Command::Validate) => cmd_validate::run(&cli),
        Some(Command::Defaults) => {
            let mut stdout = std::io::stdout().lock();
            for pattern in DEFAULT_EXCLUDE {
                writeln!(stdout, "{pattern}")?;
            }
            Ok(ExitCode::Success)
        }
        Some(Command::Completions(args)) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "testrig", &mut std::io::stdout());
            Ok(ExitCode::Success)
        }
    }
}
