//! # Regula Expr
//!
//! Single-variable expression handling for the Regula root-finding engine.
//!
//! This crate provides:
//!
//! - **Parsing**: a recursive-descent parser over numeric literals, the
//!   variable, `+ - * / ^`, parentheses and implicit multiplication
//! - **Evaluation**: an interpreter that reports division by zero, domain
//!   errors and overflow instead of producing `NaN`
//! - **Differentiation**: symbolic first derivatives as a tree transformation
//! - **Rendering**: minimal-parenthesis printing and value substitution for
//!   step-by-step explanations
//!
//! ## Example
//!
//! ```rust
//! use regula_expr::Equation;
//!
//! let f = Equation::parse("x^2 - 4").unwrap();
//! assert_eq!(f.evaluate(3.0).unwrap(), 5.0);
//! assert_eq!(f.derivative().unwrap().to_string(), "2 * x");
//! assert_eq!(f.render_at(3.0), "(3)^2 - 4");
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

pub mod ast;
pub mod derivative;
pub mod equation;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::ast::{BinOp, Expr};
    pub use crate::equation::{Equation, DEFAULT_VARIABLE};
    pub use crate::error::{EvalFault, ExprError, ExprResult};
}

pub use ast::{BinOp, Expr};
pub use equation::{Equation, DEFAULT_VARIABLE};
pub use error::{EvalFault, ExprError, ExprResult};
