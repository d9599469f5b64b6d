//! Newton-Raphson root finder over a symbolic derivative.

use regula_expr::{EvalFault, Equation};

use crate::config::SolverConfig;
use crate::controller::{run, Progress, Strategy};
use crate::error::{RootError, RootResult};
use crate::solvers::relative_error;
use crate::trace::{ConvergenceResult, NewtonRecord};

/// Steps `x_{n+1} = x_n - f(x_n) / f'(x_n)` with rounded values.
#[derive(Debug, Clone)]
pub struct NewtonStrategy<'a> {
    equation: &'a Equation,
    derivative: Equation,
    config: SolverConfig,
    initial: f64,
    current: Option<NewtonRecord>,
}

impl<'a> NewtonStrategy<'a> {
    /// Differentiates `equation` and prepares to start from `x0`.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `x0` is not finite
    /// - `Derivative` if the equation cannot be differentiated
    pub fn new(equation: &'a Equation, x0: f64, config: &SolverConfig) -> RootResult<Self> {
        if !x0.is_finite() {
            return Err(RootError::invalid_input(format!(
                "initial guess must be finite, got {x0}"
            )));
        }
        let derivative = equation.derivative()?;
        Ok(Self {
            equation,
            derivative,
            config: *config,
            initial: x0,
            current: None,
        })
    }

    /// The symbolic derivative in use.
    pub fn derivative(&self) -> &Equation {
        &self.derivative
    }

    fn record_at(&self, index: u32, x: f64, relative_error: Option<f64>) -> RootResult<NewtonRecord> {
        Ok(NewtonRecord {
            index,
            x,
            fx: self.config.round(self.equation.evaluate(x)?),
            dfx: self.config.round(self.derivative.evaluate(x)?),
            relative_error,
        })
    }
}

impl Strategy for NewtonStrategy<'_> {
    type Record = NewtonRecord;

    fn advance(&mut self) -> RootResult<(NewtonRecord, Progress)> {
        let Some(previous) = self.current else {
            let x = self.config.round(self.initial);
            let record = self.record_at(1, x, None)?;
            self.current = Some(record);
            return Ok((record, Progress::Continue));
        };

        if previous.dfx == 0.0 {
            return Err(RootError::division_by_zero(previous.x, "f'(x)"));
        }

        let raw = previous.x - previous.fx / previous.dfx;
        if !raw.is_finite() {
            return Err(RootError::Evaluation {
                x: previous.x,
                reason: EvalFault::Overflow,
            });
        }
        let x = self.config.round(raw);
        let error = relative_error(previous.x, x, &self.config)?;
        let record = self.record_at(previous.index + 1, x, Some(error))?;
        self.current = Some(record);

        let progress = if error < self.config.precision {
            Progress::Converged
        } else {
            Progress::Continue
        };
        Ok((record, progress))
    }

    fn estimate(record: &NewtonRecord) -> f64 {
        record.x
    }

    fn name(&self) -> &'static str {
        "newton-raphson"
    }
}

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration:
/// `x_{n+1} = x_n - f(x_n) / f'(x_n)`
///
/// The derivative is computed symbolically once before the first step. The
/// first record carries `x0` with no relative error; every later record
/// carries the relative change in percent, and the run stops once that falls
/// below `config.precision`.
///
/// # Errors (reported in `failure`)
///
/// - `Derivative` if the equation cannot be differentiated (empty trace)
/// - `DivisionByZero` if `f'(x)` rounds to zero, or the next estimate rounds
///   to zero so the relative error is undefined
///
/// # Example
///
/// ```rust
/// use regula_expr::Equation;
/// use regula_math::solvers::newton_raphson;
/// use regula_math::SolverConfig;
///
/// let f = Equation::parse("x^3 - x - 2").unwrap();
/// let config = SolverConfig::default().with_precision(0.0001);
///
/// let result = newton_raphson(&f, 1.5, &config);
/// assert_eq!(result.root, Some(1.5214));
/// ```
pub fn newton_raphson(
    equation: &Equation,
    x0: f64,
    config: &SolverConfig,
) -> ConvergenceResult<NewtonRecord> {
    if let Err(err) = config.validate() {
        return ConvergenceResult::failed(err);
    }
    match NewtonStrategy::new(equation, x0, config) {
        Ok(strategy) => run(strategy, config),
        Err(err) => ConvergenceResult::failed(err),
    }
}
