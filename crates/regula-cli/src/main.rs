//! Regula CLI - Command-line interface for classical root finding.
//!
//! # Usage
//!
//! ```bash
//! # Bisection on a bracket
//! regula solve bisection --equation "x^2 - 4" --low 0 --high 3 --precision 0.01
//!
//! # Newton-Raphson with worked steps
//! regula solve newton --equation "x^3 - x - 2" --x0 1.5 --precision 0.0001 --steps
//!
//! # Secant, revealing one row every 300ms
//! regula solve secant --equation "x^2 - 2" --xa 1 --xb 2 --reveal-ms 300
//!
//! # Evaluate and differentiate
//! regula eval --equation "x^2 - 4" -x 3
//! regula derive --equation "x^3 - x - 2" --at 1.5
//!
//! # Run a saved request
//! regula run request.toml --format json
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands, Context};
use commands::config::Settings;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Persisted defaults apply unless overridden on the command line
    let settings = Settings::load()?;
    if !settings.use_colors {
        colored::control::set_override(false);
    }
    let ctx = Context {
        format: cli.format.unwrap_or(settings.format),
        quiet: cli.quiet,
        settings,
    };

    // Execute command
    match cli.command {
        Commands::Solve(args) => commands::solve::execute(args, &ctx)?,
        Commands::Eval(args) => commands::eval::execute(args, ctx.format)?,
        Commands::Derive(args) => commands::derive::execute(args, ctx.format)?,
        Commands::Run(args) => commands::run::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, ctx.format)?,
    }

    Ok(())
}

/// Routes `tracing` events and `log` records from the solver crates to stderr.
fn init_tracing(verbose: u8) {
    let directives = match verbose {
        0 => std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        1 => "debug".into(),
        _ => "trace".into(),
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(directives))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
