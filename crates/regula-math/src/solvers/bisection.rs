//! Bisection root finder.

use regula_expr::Equation;

use crate::config::SolverConfig;
use crate::controller::run;
use crate::solvers::bracketing::{BracketingStrategy, Rule};
use crate::trace::{BracketRecord, ConvergenceResult};

/// Bisection root-finding algorithm.
///
/// Halves the bracket `[x_low, x_high]` each step, keeping the half whose
/// endpoints still have opposite signs.
///
/// Requires: `f(x_low) * f(x_high) < 0` after rounding.
///
/// # Arguments
///
/// * `equation` - The function whose root is sought
/// * `x_low` - Lower bound of the bracket
/// * `x_high` - Upper bound of the bracket
/// * `config` - Solver configuration
///
/// # Returns
///
/// The trace and, on convergence, the last `x_mid`. An invalid bracket
/// yields an empty trace with an `InvalidBracket` failure.
///
/// # Example
///
/// ```rust
/// use regula_expr::Equation;
/// use regula_math::solvers::bisection;
/// use regula_math::SolverConfig;
///
/// let f = Equation::parse("x^2 - 4").unwrap();
/// let config = SolverConfig::default().with_precision(0.01);
///
/// let result = bisection(&f, 0.0, 3.0, &config);
/// let root = result.root.unwrap();
/// assert!((root - 2.0).abs() < 0.01);
/// ```
pub fn bisection(
    equation: &Equation,
    x_low: f64,
    x_high: f64,
    config: &SolverConfig,
) -> ConvergenceResult<BracketRecord> {
    if let Err(err) = config.validate() {
        return ConvergenceResult::failed(err);
    }
    match BracketingStrategy::new(equation, Rule::Bisection, x_low, x_high, config) {
        Ok(strategy) => run(strategy, config),
        Err(err) => ConvergenceResult::failed(err),
    }
}
