//! # Regula
//!
//! Classical root finding for single-variable equations, with a full
//! per-iteration trace.
//!
//! This crate re-exports the public API of:
//!
//! - [`expr`] (`regula-expr`): parsing, evaluation and differentiation
//! - [`math`] (`regula-math`): rounding, the four solvers, the iteration
//!   controller and the request boundary
//!
//! ## Example
//!
//! ```rust
//! use regula::prelude::*;
//!
//! let request = SolveRequest::newton_raphson("x^3 - x - 2", 1.5)
//!     .with_config(SolverConfig::default().with_precision(0.0001));
//!
//! let solution = solve(&request);
//! assert_eq!(solution.root, Some(1.5214));
//! assert_eq!(solution.derivative.as_deref(), Some("3 * x^2 - 1"));
//! ```

#![warn(missing_docs)]

pub use regula_expr as expr;
pub use regula_math as math;

pub use regula_expr::{Equation, EvalFault, ExprError};
pub use regula_math::{
    solve, Method, MethodParams, RootError, RootResult, Rounding, Solution, SolveRequest,
    SolverConfig, Trace,
};

/// Everything needed to parse an equation and run a solver.
pub mod prelude {
    pub use regula_expr::prelude::*;
    pub use regula_math::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_prelude_covers_both_layers() {
        let f = Equation::parse("x^2 - 4").unwrap();
        let result = bisection(&f, 0.0, 3.0, &SolverConfig::default().with_precision(0.01));
        assert_relative_eq!(result.root.unwrap(), 2.0, epsilon = 0.01);
    }
}
