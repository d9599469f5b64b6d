//! Solver configuration passed explicitly into every run.

use serde::{Deserialize, Serialize};

use crate::error::{RootError, RootResult};
use crate::rounding::Rounding;

/// Default precision threshold.
pub const DEFAULT_PRECISION: f64 = 0.1;

/// Default iteration cap.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for a root-finding run.
///
/// `precision` is compared against the successive difference of `f(xMid)`
/// for bracketing methods and against the relative error (in percent) for
/// open methods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Stop once the successive error falls below this value.
    #[serde(default = "default_precision")]
    pub precision: f64,
    /// Rounding applied to every recorded and compared value.
    #[serde(default)]
    pub rounding: Rounding,
    /// Hard cap on the number of trace records.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

fn default_precision() -> f64 {
    DEFAULT_PRECISION
}

fn default_max_iterations() -> u32 {
    DEFAULT_MAX_ITERATIONS
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            rounding: Rounding::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(precision: f64, rounding: Rounding, max_iterations: u32) -> Self {
        Self {
            precision,
            rounding,
            max_iterations,
        }
    }

    /// Sets the precision.
    #[must_use]
    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    /// Sets the rounding policy.
    #[must_use]
    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Rounds a value with the configured policy.
    #[must_use]
    pub fn round(&self, value: f64) -> f64 {
        self.rounding.apply(value)
    }

    /// Checks that the configuration can drive a run.
    pub fn validate(&self) -> RootResult<()> {
        if !(self.precision.is_finite() && self.precision > 0.0) {
            return Err(RootError::invalid_input(format!(
                "precision must be a positive number, got {}",
                self.precision
            )));
        }
        if self.max_iterations == 0 {
            return Err(RootError::invalid_input(
                "max_iterations must be at least 1",
            ));
        }
        if let Rounding::Digits(d) = self.rounding {
            Rounding::digits(d)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_precision(1e-4)
            .with_rounding(Rounding::Digits(6))
            .with_max_iterations(50);

        assert!((config.precision - 1e-4).abs() < f64::EPSILON);
        assert_eq!(config.rounding, Rounding::Digits(6));
        assert_eq!(config.max_iterations, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(SolverConfig::default().with_precision(0.0).validate().is_err());
        assert!(SolverConfig::default()
            .with_precision(f64::NAN)
            .validate()
            .is_err());
        assert!(SolverConfig::default()
            .with_max_iterations(0)
            .validate()
            .is_err());
        assert!(SolverConfig::default()
            .with_rounding(Rounding::Digits(9))
            .validate()
            .is_err());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: SolverConfig = toml::from_str("precision = 0.001").unwrap();
        assert_eq!(config.rounding, Rounding::Digits(4));
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);

        let config: SolverConfig = toml::from_str("rounding = \"none\"").unwrap();
        assert_eq!(config.rounding, Rounding::None);
    }
}
