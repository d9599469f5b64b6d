//! False position (regula falsi) root finder.

use regula_expr::Equation;

use crate::config::SolverConfig;
use crate::controller::run;
use crate::solvers::bracketing::{BracketingStrategy, Rule};
use crate::trace::{BracketRecord, ConvergenceResult};

/// False position root-finding algorithm.
///
/// Like bisection, but the interior point is where the chord through
/// `(x_low, f(x_low))` and `(x_high, f(x_high))` crosses zero:
///
/// `x_mid = x_low - f(x_low) * (x_high - x_low) / (f(x_high) - f(x_low))`
///
/// # Example
///
/// ```rust
/// use regula_expr::Equation;
/// use regula_math::solvers::false_position;
/// use regula_math::SolverConfig;
///
/// let f = Equation::parse("x^2 - 4").unwrap();
/// let result = false_position(&f, 0.0, 3.0, &SolverConfig::default().with_precision(0.001));
/// assert!((result.root.unwrap() - 2.0).abs() < 0.01);
/// ```
pub fn false_position(
    equation: &Equation,
    x_low: f64,
    x_high: f64,
    config: &SolverConfig,
) -> ConvergenceResult<BracketRecord> {
    if let Err(err) = config.validate() {
        return ConvergenceResult::failed(err);
    }
    match BracketingStrategy::new(equation, Rule::FalsePosition, x_low, x_high, config) {
        Ok(strategy) => run(strategy, config),
        Err(err) => ConvergenceResult::failed(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RootError;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_converges_on_first_row() {
        // The chord of a line hits the root exactly
        let f = Equation::parse("2x - 3").unwrap();

        let result = false_position(&f, 0.0, 4.0, &SolverConfig::default());

        assert_eq!(result.trace.len(), 1);
        assert_relative_eq!(result.root.unwrap(), 1.5);
    }

    #[test]
    fn test_cubic() {
        let f = Equation::parse("x^3 - x - 2").unwrap();
        let config = SolverConfig::default().with_precision(1e-4);

        let result = false_position(&f, 1.0, 2.0, &config);

        assert!(result.is_converged());
        assert_relative_eq!(result.root.unwrap(), 1.5214, epsilon = 1e-3);
        for row in &result.trace {
            assert!(row.f_low * row.f_high < 0.0);
        }
    }

    #[test]
    fn test_invalid_bracket() {
        let f = Equation::parse("x^2 + 1").unwrap();

        let result = false_position(&f, -1.0, 1.0, &SolverConfig::default());

        assert!(result.trace.is_empty());
        assert!(matches!(result.failure, Some(RootError::InvalidBracket { .. })));
    }
}
