//! CLI command implementations.

pub mod config;
pub mod derive;
pub mod eval;
pub mod run;
pub mod solve;

// Re-export submodules for convenience
pub use config::ConfigArgs;
pub use derive::DeriveArgs;
pub use eval::EvalArgs;
pub use run::RunArgs;
pub use solve::SolveArgs;

use regula_expr::Equation;

use crate::error::CliResult;

/// Parses an equation, mapping failures to a CLI error with the error tag.
pub fn parse_equation(source: &str) -> CliResult<Equation> {
    Ok(Equation::parse(source).map_err(regula_math::RootError::from)?)
}
