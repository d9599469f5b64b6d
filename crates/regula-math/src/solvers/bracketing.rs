//! Shared bracketing strategy behind bisection and false position.

use regula_expr::Equation;

use crate::config::SolverConfig;
use crate::controller::{Progress, Strategy};
use crate::error::{RootError, RootResult};
use crate::trace::BracketRecord;

/// How the interior estimate is chosen from the bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Midpoint of the bracket.
    Bisection,
    /// Root of the chord through both endpoints (regula falsi).
    FalsePosition,
}

impl Rule {
    /// Computes the interior estimate.
    ///
    /// The endpoint values have strictly opposite signs, so the false
    /// position denominator is never zero.
    fn interior(self, x_low: f64, x_high: f64, f_low: f64, f_high: f64) -> f64 {
        match self {
            Self::Bisection => (x_low + x_high) / 2.0,
            Self::FalsePosition => x_low - f_low * (x_high - x_low) / (f_high - f_low),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Bisection => "bisection",
            Self::FalsePosition => "false position",
        }
    }
}

/// Strict sign change; compares signs rather than the product, which
/// underflows to zero for tiny values.
fn opposite_signs(a: f64, b: f64) -> bool {
    (a < 0.0 && b > 0.0) || (a > 0.0 && b < 0.0)
}

/// Narrows a sign-changing bracket until `f(xMid)` settles.
///
/// All stored values are rounded with the configured policy, and the rounded
/// values drive the next sign test.
#[derive(Debug, Clone)]
pub struct BracketingStrategy<'a> {
    equation: &'a Equation,
    rule: Rule,
    config: SolverConfig,
    x_low: f64,
    x_high: f64,
    f_low: f64,
    f_high: f64,
    previous_f_mid: Option<f64>,
    index: u32,
}

impl<'a> BracketingStrategy<'a> {
    /// Validates the bracket and prepares the first step.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if an endpoint is not finite or `x_low >= x_high`
    ///   after rounding
    /// - `Evaluation` if `f` cannot be evaluated at an endpoint
    /// - `InvalidBracket` if the rounded endpoint values do not have strictly
    ///   opposite signs
    pub fn new(
        equation: &'a Equation,
        rule: Rule,
        x_low: f64,
        x_high: f64,
        config: &SolverConfig,
    ) -> RootResult<Self> {
        if !x_low.is_finite() || !x_high.is_finite() {
            return Err(RootError::invalid_input(format!(
                "bracket endpoints must be finite, got [{x_low}, {x_high}]"
            )));
        }

        let x_low = config.round(x_low);
        let x_high = config.round(x_high);
        if x_low >= x_high {
            return Err(RootError::invalid_input(format!(
                "x_low must be less than x_high, got [{x_low}, {x_high}]"
            )));
        }

        let f_low = config.round(equation.evaluate(x_low)?);
        let f_high = config.round(equation.evaluate(x_high)?);
        if !opposite_signs(f_low, f_high) {
            return Err(RootError::InvalidBracket {
                x_low,
                x_high,
                f_low,
                f_high,
            });
        }

        Ok(Self {
            equation,
            rule,
            config: *config,
            x_low,
            x_high,
            f_low,
            f_high,
            previous_f_mid: None,
            index: 0,
        })
    }

    /// The interior rule in use.
    pub fn rule(&self) -> Rule {
        self.rule
    }
}

impl Strategy for BracketingStrategy<'_> {
    type Record = BracketRecord;

    fn advance(&mut self) -> RootResult<(BracketRecord, Progress)> {
        self.index += 1;

        let raw = self
            .rule
            .interior(self.x_low, self.x_high, self.f_low, self.f_high);
        let f_mid = self.config.round(self.equation.evaluate(raw)?);
        let x_mid = self.config.round(raw);

        let record = BracketRecord {
            index: self.index,
            x_low: self.x_low,
            x_mid,
            x_high: self.x_high,
            f_low: self.f_low,
            f_mid,
            f_high: self.f_high,
        };

        let settled = self
            .previous_f_mid
            .is_some_and(|previous| (f_mid - previous).abs() < self.config.precision);
        self.previous_f_mid = Some(f_mid);

        if f_mid == 0.0 || settled {
            return Ok((record, Progress::Converged));
        }

        if opposite_signs(f_mid, self.f_high) {
            self.x_low = x_mid;
            self.f_low = f_mid;
        } else {
            self.x_high = x_mid;
            self.f_high = f_mid;
        }

        Ok((record, Progress::Continue))
    }

    fn estimate(record: &BracketRecord) -> f64 {
        record.x_mid
    }

    fn name(&self) -> &'static str {
        self.rule.name()
    }
}
