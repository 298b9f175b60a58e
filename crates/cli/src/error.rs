// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

/// Testrig error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Overlay value violates a documented constraint
    #[error("invalid config shape: {field}: {message}")]
    InvalidConfigShape { field: String, message: String },

    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Internal error (bug)
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Shorthand for an [`Error::InvalidConfigShape`] on `field`.
    pub fn shape(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidConfigShape {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result type using testrig Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Configuration or argument error
    ConfigError = 2,
    /// Internal error
    InternalError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::InvalidConfigShape { .. } | Error::Config { .. } | Error::Argument(_) => {
                ExitCode::ConfigError
            }
            Error::Io { .. } | Error::Internal(_) => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
