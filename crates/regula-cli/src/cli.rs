//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::commands::config::Settings;
use crate::commands::{ConfigArgs, DeriveArgs, EvalArgs, RunArgs, SolveArgs};

/// Regula - Classical root finding with step-by-step traces
#[derive(Parser)]
#[command(name = "regula")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format [default: table, or `default_format` from config]
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log solver progress to stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Find a root with bisection, false position, Newton-Raphson or secant
    Solve(SolveArgs),

    /// Evaluate an equation at one or more points
    Eval(EvalArgs),

    /// Show the symbolic derivative of an equation
    Derive(DeriveArgs),

    /// Run a request read from a TOML or JSON file
    Run(RunArgs),

    /// Manage configurations
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}

/// Resolved per-invocation options shared by the commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output format after applying the config default.
    pub format: OutputFormat,
    /// Whether headers and info lines are suppressed.
    pub quiet: bool,
    /// Persisted user defaults.
    pub settings: Settings,
}
