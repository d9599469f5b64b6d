//! Decimal rounding policy shared by every strategy.
//!
//! Every value is rounded before it is recorded and before it feeds the next
//! step, so convergence is judged on the displayed precision. Two runs with
//! different digit settings may therefore take a different number of steps on
//! the same input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RootError, RootResult};

/// Largest supported number of decimal digits.
pub const MAX_DIGITS: u8 = 6;

/// Default number of decimal digits.
pub const DEFAULT_DIGITS: u8 = 4;

/// How many decimal digits values are rounded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RoundingRepr", into = "String")]
pub enum Rounding {
    /// Round half away from zero to this many decimal places (0 to 6).
    Digits(u8),
    /// Keep full floating-point precision.
    None,
}

impl Default for Rounding {
    fn default() -> Self {
        Self::Digits(DEFAULT_DIGITS)
    }
}

impl Rounding {
    /// Creates a validated digit rounding.
    pub fn digits(digits: u8) -> RootResult<Self> {
        if digits > MAX_DIGITS {
            return Err(RootError::invalid_input(format!(
                "rounding digits must be between 0 and {MAX_DIGITS}, got {digits}"
            )));
        }
        Ok(Self::Digits(digits))
    }

    /// Rounds `value` according to this policy.
    ///
    /// Idempotent: applying it twice gives the same result as applying it once.
    /// Values too large to scale are returned unchanged.
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::None => value,
            Self::Digits(digits) => {
                let factor = 10f64.powi(i32::from(digits));
                let scaled = value * factor;
                if !scaled.is_finite() || scaled.abs() >= 2f64.powi(52) {
                    return value;
                }
                scaled.round() / factor
            }
        }
    }

    /// Number of decimal places, if rounding is active.
    #[must_use]
    pub fn decimal_places(self) -> Option<u8> {
        match self {
            Self::Digits(d) => Some(d),
            Self::None => None,
        }
    }
}

impl fmt::Display for Rounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digits(d) => write!(f, "{d}"),
            Self::None => write!(f, "none"),
        }
    }
}

impl FromStr for Rounding {
    type Err = RootError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("none") {
            return Ok(Self::None);
        }
        let digits: u8 = s.parse().map_err(|_| {
            RootError::invalid_input(format!(
                "rounding must be 0-{MAX_DIGITS} or 'none', got '{s}'"
            ))
        })?;
        Self::digits(digits)
    }
}

/// Accepts both `rounding = 4` and `rounding = "none"` in config files.
#[derive(Deserialize)]
#[serde(untagged)]
enum RoundingRepr {
    Digits(u8),
    Text(String),
}

impl TryFrom<RoundingRepr> for Rounding {
    type Error = RootError;

    fn try_from(value: RoundingRepr) -> Result<Self, Self::Error> {
        match value {
            RoundingRepr::Digits(d) => Self::digits(d),
            RoundingRepr::Text(s) => s.parse(),
        }
    }
}

impl From<Rounding> for String {
    fn from(value: Rounding) -> Self {
        value.to_string()
    }
}
