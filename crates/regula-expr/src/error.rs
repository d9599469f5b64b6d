//! Error types for expression handling.

use thiserror::Error;

/// A specialized Result type for expression operations.
pub type ExprResult<T> = Result<T, ExprError>;

/// Errors that can occur while parsing, evaluating or differentiating an expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    /// The expression text could not be tokenized or parsed.
    #[error("Parse error at position {position}: {message}")]
    Parse {
        /// Byte offset into the source text.
        position: usize,
        /// Description of the problem.
        message: String,
    },

    /// A well-formed expression could not be evaluated at a point.
    #[error("Cannot evaluate at x = {x}: {reason}")]
    Evaluation {
        /// The point at which evaluation failed.
        x: f64,
        /// What went wrong.
        reason: EvalFault,
    },

    /// The expression contains a construct that cannot be differentiated.
    #[error("Cannot differentiate {construct}")]
    Derivative {
        /// The rejected sub-expression, rendered.
        construct: String,
    },
}

/// The reason a point evaluation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalFault {
    /// A denominator evaluated to exactly zero.
    DivisionByZero,
    /// An operation left the real domain (e.g. negative base, fractional exponent).
    Domain,
    /// An intermediate value overflowed to infinity.
    Overflow,
}

impl std::fmt::Display for EvalFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::Domain => write!(f, "result is not a real number"),
            Self::Overflow => write!(f, "numerical overflow"),
        }
    }
}

impl ExprError {
    /// Creates a parse error.
    #[must_use]
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }

    /// Creates an evaluation error.
    #[must_use]
    pub fn evaluation(x: f64, reason: EvalFault) -> Self {
        Self::Evaluation { x, reason }
    }

    /// Creates a derivative error.
    #[must_use]
    pub fn derivative(construct: impl Into<String>) -> Self {
        Self::Derivative {
            construct: construct.into(),
        }
    }
}
