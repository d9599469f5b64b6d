//! Error types for root-finding runs.

use regula_expr::{EvalFault, ExprError};
use thiserror::Error;

/// A specialized Result type for root-finding operations.
pub type RootResult<T> = Result<T, RootError>;

/// Errors that can terminate a root-finding run.
///
/// Every failure is an explicit value: no run propagates `NaN` and no run
/// reports a root after one of these occurs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RootError {
    /// The expression text could not be parsed.
    #[error("Parse error at position {position}: {message}")]
    Parse {
        /// Byte offset into the equation text.
        position: usize,
        /// Description of the problem.
        message: String,
    },

    /// The expression could not be evaluated at a point.
    #[error("Cannot evaluate at x = {x}: {reason}")]
    Evaluation {
        /// The offending point.
        x: f64,
        /// What went wrong.
        reason: EvalFault,
    },

    /// The derivative could not be computed.
    #[error("Cannot differentiate {construct}")]
    Derivative {
        /// The rejected sub-expression.
        construct: String,
    },

    /// The initial bracket does not straddle a sign change.
    #[error("Invalid bracket: f({x_low}) = {f_low} and f({x_high}) = {f_high} do not have opposite signs")]
    InvalidBracket {
        /// Lower bound of the bracket.
        x_low: f64,
        /// Upper bound of the bracket.
        x_high: f64,
        /// Rounded function value at the lower bound.
        f_low: f64,
        /// Rounded function value at the upper bound.
        f_high: f64,
    },

    /// A derivative or secant denominator rounded to zero.
    #[error("Division by zero: {quantity} is zero at x = {x}")]
    DivisionByZero {
        /// The estimate at which the division failed.
        x: f64,
        /// Which quantity vanished.
        quantity: &'static str,
    },

    /// The iteration cap was reached before the precision was met.
    #[error("No convergence after {iterations} iterations (last estimate: {last_estimate})")]
    MaxIterations {
        /// Number of records produced.
        iterations: u32,
        /// Estimate carried by the last record.
        last_estimate: f64,
    },

    /// An input parameter or configuration value is invalid.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl RootError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates a division by zero error.
    #[must_use]
    pub fn division_by_zero(x: f64, quantity: &'static str) -> Self {
        Self::DivisionByZero { x, quantity }
    }

    /// Short machine-readable tag for the error kind.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "ParseError",
            Self::Evaluation { .. } => "EvaluationError",
            Self::Derivative { .. } => "DerivativeError",
            Self::InvalidBracket { .. } => "InvalidBracketError",
            Self::DivisionByZero { .. } => "DivisionByZeroError",
            Self::MaxIterations { .. } => "MaxIterationsError",
            Self::InvalidInput { .. } => "InvalidInputError",
        }
    }
}

impl From<ExprError> for RootError {
    fn from(err: ExprError) -> Self {
        match err {
            ExprError::Parse { position, message } => Self::Parse { position, message },
            ExprError::Evaluation { x, reason } => Self::Evaluation { x, reason },
            ExprError::Derivative { construct } => Self::Derivative { construct },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RootError::MaxIterations {
            iterations: 100,
            last_estimate: 1.5,
        };
        assert!(err.to_string().contains("100 iterations"));

        let err = RootError::division_by_zero(0.0, "f'(x)");
        assert_eq!(err.to_string(), "Division by zero: f'(x) is zero at x = 0");
    }

    #[test]
    fn test_from_expr_error() {
        let err: RootError = ExprError::parse(2, "unexpected '*'").into();
        assert_eq!(err.tag(), "ParseError");

        let err: RootError = ExprError::evaluation(1.0, EvalFault::Domain).into();
        assert!(matches!(err, RootError::Evaluation { x, .. } if x == 1.0));

        let err: RootError = ExprError::derivative("x^x").into();
        assert_eq!(err.tag(), "DerivativeError");
    }
}
