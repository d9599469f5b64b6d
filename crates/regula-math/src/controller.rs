//! Iteration controller shared by every strategy.
//!
//! A [`Strategy`] knows how to produce the next record; the controller owns
//! the loop, the iteration cap and the trace. [`Iterations`] exposes the loop
//! as a lazy, finite sequence so callers can reveal rows one at a time; [`run`]
//! drains it synchronously. Both produce identical records.

use log::{debug, warn};

use crate::config::SolverConfig;
use crate::error::{RootError, RootResult};
use crate::trace::ConvergenceResult;

/// Whether a run should keep going after a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// The precision threshold has not been met.
    Continue,
    /// The record just emitted satisfies the termination test.
    Converged,
}

/// One root-finding method, stepped by the controller.
pub trait Strategy {
    /// The trace row this strategy emits.
    type Record: Clone;

    /// Computes the next record.
    ///
    /// Errors terminate the run; records already emitted stay valid.
    fn advance(&mut self) -> RootResult<(Self::Record, Progress)>;

    /// The root estimate carried by a record.
    fn estimate(record: &Self::Record) -> f64;

    /// Short name used in log output.
    fn name(&self) -> &'static str;
}

/// Lazy sequence of records from a strategy.
///
/// Yields at most `max_iterations` records. If the cap is reached without
/// convergence a final `Err(MaxIterations)` is yielded. The sequence ends
/// after the first error or after the converged record. An invalid
/// configuration yields a single `Err(InvalidInput)` and no records.
pub struct Iterations<S: Strategy> {
    strategy: S,
    invalid: Option<RootError>,
    max_iterations: u32,
    emitted: u32,
    last_estimate: Option<f64>,
    converged: bool,
    done: bool,
}

impl<S: Strategy> Iterations<S> {
    /// Wraps a strategy with the configured iteration cap.
    pub fn new(strategy: S, config: &SolverConfig) -> Self {
        Self {
            strategy,
            invalid: config.validate().err(),
            max_iterations: config.max_iterations,
            emitted: 0,
            last_estimate: None,
            converged: false,
            done: false,
        }
    }

    /// Returns true once the converged record has been yielded.
    pub fn is_converged(&self) -> bool {
        self.converged
    }

    /// Number of records yielded so far.
    pub fn emitted(&self) -> u32 {
        self.emitted
    }

    /// Estimate of the last yielded record.
    pub fn last_estimate(&self) -> Option<f64> {
        self.last_estimate
    }
}

impl<S: Strategy> Iterator for Iterations<S> {
    type Item = RootResult<S::Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if let Some(err) = self.invalid.take() {
            self.done = true;
            warn!("{}: {}", self.strategy.name(), err);
            return Some(Err(err));
        }

        // A validated cap is at least 1, so a record exists once it is reached.
        if let (true, Some(last_estimate)) =
            (self.emitted >= self.max_iterations, self.last_estimate)
        {
            self.done = true;
            warn!(
                "{}: no convergence after {} iterations (last estimate {})",
                self.strategy.name(),
                self.emitted,
                last_estimate
            );
            return Some(Err(RootError::MaxIterations {
                iterations: self.emitted,
                last_estimate,
            }));
        }

        match self.strategy.advance() {
            Ok((record, progress)) => {
                self.emitted += 1;
                let estimate = S::estimate(&record);
                self.last_estimate = Some(estimate);
                debug!(
                    "{}: row {} estimate {}",
                    self.strategy.name(),
                    self.emitted,
                    estimate
                );
                if progress == Progress::Converged {
                    self.converged = true;
                    self.done = true;
                    debug!(
                        "{}: converged to {} after {} rows",
                        self.strategy.name(),
                        estimate,
                        self.emitted
                    );
                }
                Some(Ok(record))
            }
            Err(err) => {
                self.done = true;
                warn!("{}: stopped after {} rows: {}", self.strategy.name(), self.emitted, err);
                Some(Err(err))
            }
        }
    }
}

impl<S: Strategy> std::iter::FusedIterator for Iterations<S> {}

/// Drives a strategy to a terminal state.
pub fn run<S: Strategy>(strategy: S, config: &SolverConfig) -> ConvergenceResult<S::Record> {
    let mut iterations = Iterations::new(strategy, config);
    let mut trace = Vec::new();
    let mut failure = None;

    for item in iterations.by_ref() {
        match item {
            Ok(record) => trace.push(record),
            Err(err) => {
                failure = Some(err);
                break;
            }
        }
    }

    let root = if iterations.is_converged() {
        trace.last().map(S::estimate)
    } else {
        None
    };

    ConvergenceResult {
        trace,
        root,
        failure,
    }
}
