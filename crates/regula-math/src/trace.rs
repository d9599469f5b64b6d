//! Trace records produced by the root finders.
//!
//! Records are plain values: once emitted they are never mutated.

use serde::{Deserialize, Serialize};

use crate::error::{RootError, RootResult};

/// One row of a bisection or false position trace.
///
/// The bracket is the one in force *before* the row's update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BracketRecord {
    /// 1-based row number.
    pub index: u32,
    /// Lower bound of the bracket.
    pub x_low: f64,
    /// Estimate computed from the bracket.
    pub x_mid: f64,
    /// Upper bound of the bracket.
    pub x_high: f64,
    /// f(x_low).
    pub f_low: f64,
    /// f(x_mid).
    pub f_mid: f64,
    /// f(x_high).
    pub f_high: f64,
}

/// One row of a Newton-Raphson trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewtonRecord {
    /// 1-based row number.
    pub index: u32,
    /// Current estimate.
    pub x: f64,
    /// f(x).
    pub fx: f64,
    /// f'(x).
    pub dfx: f64,
    /// Relative change from the previous estimate in percent; `None` on the first row.
    pub relative_error: Option<f64>,
}

/// One row of a secant trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SecantRecord {
    /// 1-based row number.
    pub index: u32,
    /// Older point of the window.
    pub xa: f64,
    /// Newer point of the window; the current estimate.
    pub xb: f64,
    /// f(xa).
    pub fxa: f64,
    /// f(xb).
    pub fxb: f64,
    /// Relative change of `xb` in percent; `None` on the first row.
    pub relative_error: Option<f64>,
}

/// A worked arithmetic step explaining one Newton-Raphson update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivationStep {
    /// What the step computes.
    pub title: String,
    /// The formula with the previous row's values substituted.
    pub rendered: String,
    /// Index of the trace row this step produces.
    pub iteration: u32,
}

/// Outcome of one root-finding run.
///
/// The trace is returned even when the run fails, so callers can show the
/// best estimate reached. `root` is only set on convergence.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceResult<R> {
    /// Records in emission order.
    pub trace: Vec<R>,
    /// The converged estimate.
    pub root: Option<f64>,
    /// Why the run stopped early, if it did.
    pub failure: Option<RootError>,
}

impl<R> ConvergenceResult<R> {
    /// A run that failed before emitting any record.
    #[must_use]
    pub fn failed(error: RootError) -> Self {
        Self {
            trace: Vec::new(),
            root: None,
            failure: Some(error),
        }
    }

    /// Returns true if the run met the precision threshold.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.root.is_some() && self.failure.is_none()
    }

    /// Number of records emitted.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.trace.len()
    }

    /// The last record, if any.
    #[must_use]
    pub fn last(&self) -> Option<&R> {
        self.trace.last()
    }

    /// Discards the trace and returns the root or the failure.
    pub fn into_result(self) -> RootResult<f64> {
        match (self.root, self.failure) {
            (_, Some(err)) => Err(err),
            (Some(root), None) => Ok(root),
            (None, None) => Err(RootError::invalid_input("run produced no estimate")),
        }
    }

    /// Transforms the records, keeping the outcome.
    pub fn map_trace<T>(self, f: impl FnMut(R) -> T) -> ConvergenceResult<T> {
        ConvergenceResult {
            trace: self.trace.into_iter().map(f).collect(),
            root: self.root,
            failure: self.failure,
        }
    }
}
