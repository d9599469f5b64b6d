//! Root-finding algorithms.
//!
//! This module provides the four classical iterative methods:
//!
//! - [`bisection`]: halves a sign-changing bracket
//! - [`false_position`]: narrows a bracket at the chord's zero
//! - [`newton_raphson`]: follows the tangent using a symbolic derivative
//! - [`secant`]: follows the line through the last two estimates
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires | Stops when |
//! |--------|-------|-------------|----------|------------|
//! | Bisection | Slow (linear) | Guaranteed | Bracket | `f(xMid)` settles |
//! | False position | Linear, often faster | Guaranteed | Bracket | `f(xMid)` settles |
//! | Newton-Raphson | Fastest (quadratic) | May diverge | Derivative | Relative error < precision |
//! | Secant | Fast (superlinear) | May diverge | Two guesses | Relative error < precision |
//!
//! Every value is rounded per [`Rounding`](crate::Rounding) before it is
//! recorded or compared, so the number of steps depends on the digit setting.

mod bisection;
mod bracketing;
mod false_position;
mod newton;
mod secant;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use bisection::bisection;
pub use bracketing::{BracketingStrategy, Rule};
pub use false_position::false_position;
pub use newton::{newton_raphson, NewtonStrategy};
pub use secant::{secant, SecantStrategy};

use crate::config::SolverConfig;
use crate::error::{RootError, RootResult};

/// The available root-finding methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Bisection.
    Bisection,
    /// False position (regula falsi).
    FalsePosition,
    /// Newton-Raphson.
    NewtonRaphson,
    /// Secant.
    Secant,
}

impl Method {
    /// All methods in display order.
    pub const ALL: [Method; 4] = [
        Method::Bisection,
        Method::FalsePosition,
        Method::NewtonRaphson,
        Method::Secant,
    ];

    /// Returns true for methods that maintain a bracket.
    #[must_use]
    pub fn is_bracketing(self) -> bool {
        matches!(self, Self::Bisection | Self::FalsePosition)
    }

    /// Human-readable name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Bisection => "Bisection",
            Self::FalsePosition => "False Position",
            Self::NewtonRaphson => "Newton-Raphson",
            Self::Secant => "Secant",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bisection => "bisection",
            Self::FalsePosition => "false_position",
            Self::NewtonRaphson => "newton_raphson",
            Self::Secant => "secant",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Method {
    type Err = RootError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "bisection" => Ok(Self::Bisection),
            "false_position" | "falseposition" | "falsi" | "regula_falsi" => {
                Ok(Self::FalsePosition)
            }
            "newton_raphson" | "newtonraphson" | "newton" => Ok(Self::NewtonRaphson),
            "secant" => Ok(Self::Secant),
            other => Err(RootError::invalid_input(format!("unknown method '{other}'"))),
        }
    }
}

/// Rounded relative change from `previous` to `next`, in percent.
///
/// Undefined when `next` is zero unless nothing moved.
pub(crate) fn relative_error(previous: f64, next: f64, config: &SolverConfig) -> RootResult<f64> {
    if next == 0.0 {
        if previous == 0.0 {
            return Ok(0.0);
        }
        return Err(RootError::division_by_zero(next, "next estimate"));
    }
    Ok(config.round(((next - previous) / next).abs() * 100.0))
}
