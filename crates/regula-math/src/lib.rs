//! # Regula Math
//!
//! Iterative root finding with step-by-step traces.
//!
//! This crate provides:
//!
//! - **Solvers**: bisection, false position, Newton-Raphson and secant
//! - **Rounding**: a decimal rounding policy applied to every recorded value
//! - **Controller**: a capped iteration loop, usable eagerly or as a lazy
//!   sequence of records
//! - **Traces**: per-iteration records and worked Newton-Raphson steps
//! - **Requests**: a serde boundary from raw input to a finished run
//!
//! ## Rounding and convergence
//!
//! Values are rounded before they are stored and before they are compared,
//! so convergence is judged on the displayed precision. Changing the digit
//! setting can change the number of steps and the reported root.
//!
//! ## Example
//!
//! ```rust
//! use regula_math::prelude::*;
//!
//! let request = SolveRequest::bisection("x^2 - 4", 0.0, 3.0)
//!     .with_config(SolverConfig::default().with_precision(0.01));
//!
//! let solution = solve(&request);
//! assert!(solution.is_converged());
//! assert!((solution.root.unwrap() - 2.0).abs() < 0.01);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::float_cmp)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::similar_names)]

pub mod config;
pub mod controller;
pub mod derivation;
pub mod error;
pub mod request;
pub mod rounding;
pub mod solvers;
pub mod trace;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::SolverConfig;
    pub use crate::controller::{run, Iterations, Progress, Strategy};
    pub use crate::error::{RootError, RootResult};
    pub use crate::request::{solve, MethodParams, Solution, SolveRequest, Trace};
    pub use crate::rounding::Rounding;
    pub use crate::solvers::{bisection, false_position, newton_raphson, secant, Method};
    pub use crate::trace::{
        BracketRecord, ConvergenceResult, DerivationStep, NewtonRecord, SecantRecord,
    };
}

pub use config::{SolverConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_PRECISION};
pub use controller::{run, Iterations, Progress, Strategy};
pub use derivation::derivation_steps;
pub use error::{RootError, RootResult};
pub use request::{solve, MethodParams, Solution, SolveRequest, Trace};
pub use rounding::Rounding;
pub use solvers::Method;
pub use trace::{BracketRecord, ConvergenceResult, DerivationStep, NewtonRecord, SecantRecord};
