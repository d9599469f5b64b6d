//! The [`Equation`] type: a parsed, immutable single-variable expression.

use std::fmt;
use std::str::FromStr;

use crate::ast::Expr;
use crate::derivative::differentiate;
use crate::error::{ExprError, ExprResult};
use crate::eval::evaluate;
use crate::parser::parse;

/// Default variable symbol.
pub const DEFAULT_VARIABLE: char = 'x';

/// A parsed expression over one free variable.
///
/// Construction validates the text against the grammar, so every `Equation`
/// can be evaluated; evaluation itself may still fail at particular points
/// (division by zero, domain errors).
///
/// # Example
///
/// ```rust
/// use regula_expr::Equation;
///
/// let f = Equation::parse("x^3 - x - 2").unwrap();
/// assert_eq!(f.evaluate(2.0).unwrap(), 4.0);
///
/// let df = f.derivative().unwrap();
/// assert_eq!(df.to_string(), "3 * x^2 - 1");
/// assert_eq!(f.evaluate_derivative(2.0).unwrap(), 11.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    source: String,
    variable: char,
    expr: Expr,
}

impl Equation {
    /// Parses an equation in the default variable `x`.
    pub fn parse(source: &str) -> ExprResult<Self> {
        Self::parse_in(source, DEFAULT_VARIABLE)
    }

    /// Parses an equation in a custom single-letter variable.
    pub fn parse_in(source: &str, variable: char) -> ExprResult<Self> {
        if !variable.is_ascii_alphabetic() {
            return Err(ExprError::parse(
                0,
                format!("variable must be a single ASCII letter, got '{variable}'"),
            ));
        }
        let expr = parse(source, variable)?;
        log::trace!("parsed {:?} as {}", source, expr);
        Ok(Self {
            source: source.trim().to_string(),
            variable: variable.to_ascii_lowercase(),
            expr,
        })
    }

    /// Returns the text this equation was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the variable symbol.
    pub fn variable(&self) -> char {
        self.variable
    }

    /// Returns the expression tree.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Evaluates the equation at `x`.
    pub fn evaluate(&self, x: f64) -> ExprResult<f64> {
        evaluate(&self.expr, x)
    }

    /// Returns the symbolic first derivative as a new equation.
    pub fn derivative(&self) -> ExprResult<Self> {
        let expr = differentiate(&self.expr)?;
        Ok(Self {
            source: expr.render(self.variable),
            variable: self.variable,
            expr,
        })
    }

    /// Evaluates the first derivative at `x`.
    ///
    /// Equivalent to `self.derivative()?.evaluate(x)`; when evaluating at many
    /// points, compute [`Equation::derivative`] once instead.
    pub fn evaluate_derivative(&self, x: f64) -> ExprResult<f64> {
        self.derivative()?.evaluate(x)
    }

    /// Renders the expression with each variable occurrence replaced by `(x)`.
    pub fn render_at(&self, x: f64) -> String {
        self.expr.render_at(x)
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expr.render(self.variable))
    }
}

impl FromStr for Equation {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_and_evaluate() {
        let eq = Equation::parse("  x^2 - 4 ").unwrap();
        assert_eq!(eq.source(), "x^2 - 4");
        assert_relative_eq!(eq.evaluate(3.0).unwrap(), 5.0);
    }

    #[test]
    fn test_derivative_is_equation() {
        let eq: Equation = "x^3 - x - 2".parse().unwrap();
        let d = eq.derivative().unwrap();
        assert_eq!(d.source(), "3 * x^2 - 1");
        assert_relative_eq!(d.evaluate(1.5).unwrap(), 5.75);
        assert_relative_eq!(eq.evaluate_derivative(1.5).unwrap(), 5.75);
    }

    #[test]
    fn test_custom_variable() {
        let eq = Equation::parse_in("T^2 - 2", 't').unwrap();
        assert_eq!(eq.variable(), 't');
        assert_eq!(eq.to_string(), "t^2 - 2");
        assert_eq!(eq.derivative().unwrap().to_string(), "2 * t");
        assert!(Equation::parse_in("x", '1').is_err());
    }

    #[test]
    fn test_render_at() {
        let eq = Equation::parse("x^3 - x - 2").unwrap();
        assert_eq!(eq.render_at(1.5217), "(1.5217)^3 - (1.5217) - 2");
    }

    #[test]
    fn test_parse_error_surfaces() {
        assert!(matches!(
            Equation::parse("x^"),
            Err(ExprError::Parse { .. })
        ));
    }

    #[test]
    fn test_oversized_input_is_a_parse_error() {
        let deep = format!("{}x{}", "(".repeat(20_000), ")".repeat(20_000));
        assert!(matches!(Equation::parse(&deep), Err(ExprError::Parse { .. })));

        let long = vec!["x"; 200_000].join("+");
        assert!(matches!(Equation::parse(&long), Err(ExprError::Parse { .. })));
    }

    #[test]
    fn test_longest_accepted_sum_evaluates() {
        let eq = Equation::parse(&vec!["x"; 512].join("+")).unwrap();
        assert_relative_eq!(eq.evaluate(2.0).unwrap(), 1024.0);
        assert_relative_eq!(eq.evaluate_derivative(1.0).unwrap(), 512.0);
        assert!(!eq.derivative().unwrap().to_string().is_empty());
    }
}
