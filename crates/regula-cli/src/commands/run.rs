//! Run command implementation.
//!
//! Loads a [`SolveRequest`] from a TOML or JSON file and solves it.
//!
//! ```toml
//! equation = "x^3 - x - 2"
//! method = "newton_raphson"
//!
//! [params]
//! kind = "newton"
//! x0 = 1.5
//!
//! [config]
//! precision = 0.0001
//! rounding = 4
//! ```

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use regula_math::{solve, SolveRequest};

use crate::cli::Context;
use crate::commands::solve::print_solution;
use crate::error::{CliError, CliResult};

/// Arguments for the run command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Request file (.toml or .json)
    pub file: PathBuf,

    /// Print the worked arithmetic for Newton-Raphson steps
    #[arg(long)]
    pub steps: bool,
}

/// Reads a request file, choosing the parser by extension.
pub fn load_request(path: &Path) -> CliResult<SolveRequest> {
    let content = std::fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("toml") => {
            toml::from_str(&content).map_err(|e| CliError::Serialization(e.to_string()))
        }
        Some("json") => {
            serde_json::from_str(&content).map_err(|e| CliError::Serialization(e.to_string()))
        }
        _ => Err(CliError::UnsupportedFile(path.to_path_buf())),
    }
}

/// Execute the run command.
pub fn execute(args: RunArgs, ctx: &Context) -> Result<()> {
    let request = load_request(&args.file)?;
    tracing::debug!(file = %args.file.display(), method = %request.method, "loaded request");

    let solution = solve(&request);
    print_solution(&solution, request.config.rounding, args.steps, ctx)
}
