//! Secant root finder.

use regula_expr::{EvalFault, Equation};

use crate::config::SolverConfig;
use crate::controller::{run, Progress, Strategy};
use crate::error::{RootError, RootResult};
use crate::solvers::relative_error;
use crate::trace::{ConvergenceResult, SecantRecord};

/// Slides a two-point window along the secant line.
#[derive(Debug, Clone)]
pub struct SecantStrategy<'a> {
    equation: &'a Equation,
    config: SolverConfig,
    xa: f64,
    xb: f64,
    current: Option<SecantRecord>,
}

impl<'a> SecantStrategy<'a> {
    /// Prepares to start from the window `(xa, xb)`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if either point is not finite or both round to
    /// the same value.
    pub fn new(equation: &'a Equation, xa: f64, xb: f64, config: &SolverConfig) -> RootResult<Self> {
        if !xa.is_finite() || !xb.is_finite() {
            return Err(RootError::invalid_input(format!(
                "starting points must be finite, got {xa} and {xb}"
            )));
        }
        let xa = config.round(xa);
        let xb = config.round(xb);
        if xa == xb {
            return Err(RootError::invalid_input(format!(
                "starting points must differ, both are {xa}"
            )));
        }
        Ok(Self {
            equation,
            config: *config,
            xa,
            xb,
            current: None,
        })
    }
}

impl Strategy for SecantStrategy<'_> {
    type Record = SecantRecord;

    fn advance(&mut self) -> RootResult<(SecantRecord, Progress)> {
        let Some(previous) = self.current else {
            let record = SecantRecord {
                index: 1,
                xa: self.xa,
                xb: self.xb,
                fxa: self.config.round(self.equation.evaluate(self.xa)?),
                fxb: self.config.round(self.equation.evaluate(self.xb)?),
                relative_error: None,
            };
            self.current = Some(record);
            return Ok((record, Progress::Continue));
        };

        let denominator = previous.fxa - previous.fxb;
        if self.config.round(denominator) == 0.0 {
            return Err(RootError::division_by_zero(previous.xb, "f(xa) - f(xb)"));
        }

        let raw = previous.xa - previous.fxa * (previous.xa - previous.xb) / denominator;
        if !raw.is_finite() {
            return Err(RootError::Evaluation {
                x: previous.xb,
                reason: EvalFault::Overflow,
            });
        }
        let x_next = self.config.round(raw);
        let error = relative_error(previous.xb, x_next, &self.config)?;

        let record = SecantRecord {
            index: previous.index + 1,
            xa: previous.xb,
            xb: x_next,
            fxa: previous.fxb,
            fxb: self.config.round(self.equation.evaluate(x_next)?),
            relative_error: Some(error),
        };
        self.current = Some(record);

        let progress = if error < self.config.precision {
            Progress::Converged
        } else {
            Progress::Continue
        };
        Ok((record, progress))
    }

    fn estimate(record: &SecantRecord) -> f64 {
        record.xb
    }

    fn name(&self) -> &'static str {
        "secant"
    }
}

/// Secant root-finding algorithm.
///
/// Approximates the derivative with the slope through the last two points:
///
/// `x_next = xa - f(xa) * (xa - xb) / (f(xa) - f(xb))`
///
/// after which the window shifts to `(xb, x_next)`. Stops once the relative
/// change of `xb` in percent falls below `config.precision`.
///
/// # Example
///
/// ```rust
/// use regula_expr::Equation;
/// use regula_math::solvers::secant;
/// use regula_math::SolverConfig;
///
/// let f = Equation::parse("x^2 - 2").unwrap();
/// let result = secant(&f, 1.0, 2.0, &SolverConfig::default().with_precision(0.001));
/// assert!((result.root.unwrap() - std::f64::consts::SQRT_2).abs() < 1e-3);
/// ```
pub fn secant(
    equation: &Equation,
    xa: f64,
    xb: f64,
    config: &SolverConfig,
) -> ConvergenceResult<SecantRecord> {
    if let Err(err) = config.validate() {
        return ConvergenceResult::failed(err);
    }
    match SecantStrategy::new(equation, xa, xb, config) {
        Ok(strategy) => run(strategy, config),
        Err(err) => ConvergenceResult::failed(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rounding::Rounding;
    use approx::assert_relative_eq;

    #[test]
    fn test_window_shifts() {
        let f = Equation::parse("x^2 - 2").unwrap();

        let result = secant(&f, 1.0, 2.0, &SolverConfig::default());

        let first = result.trace[0];
        assert!(first.relative_error.is_none());
        assert_relative_eq!(first.fxa, -1.0);
        assert_relative_eq!(first.fxb, 2.0);

        // 1 - (-1)(1 - 2) / (-1 - 2) = 4/3
        let second = result.trace[1];
        assert_relative_eq!(second.xa, 2.0);
        assert_relative_eq!(second.xb, 1.3333);
        assert_relative_eq!(second.fxa, 2.0);
        assert_relative_eq!(second.relative_error.unwrap(), 50.0038);
    }

    #[test]
    fn test_converges() {
        let f = Equation::parse("x^3 - x - 2").unwrap();
        let config = SolverConfig::default()
            .with_precision(1e-6)
            .with_rounding(Rounding::Digits(6));

        let result = secant(&f, 1.0, 2.0, &config);

        assert!(result.is_converged());
        assert_relative_eq!(result.root.unwrap(), 1.521_380, epsilon = 1e-5);
    }

    #[test]
    fn test_flat_secant() {
        // f(-1) == f(1) for an even function
        let f = Equation::parse("x^2 - 4").unwrap();

        let result = secant(&f, -1.0, 1.0, &SolverConfig::default());

        assert_eq!(result.trace.len(), 1);
        assert!(result.root.is_none());
        assert!(matches!(
            result.failure,
            Some(RootError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_same_starting_points() {
        let f = Equation::parse("x").unwrap();
        let result = secant(&f, 1.0, 1.0, &SolverConfig::default());
        assert!(result.trace.is_empty());
        assert!(matches!(result.failure, Some(RootError::InvalidInput { .. })));
    }
}
