//! CLI error types.

use std::path::PathBuf;

use regula_math::RootError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The run stopped without converging.
    #[error("{}: {}", .0.tag(), .0)]
    Solve(#[from] RootError),

    /// Request file with an extension we cannot read.
    #[error("Unsupported request file: {}. Use .toml or .json.", .0.display())]
    UnsupportedFile(PathBuf),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
