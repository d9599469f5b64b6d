//! Interpreter over [`Expr`] trees.

use crate::ast::{BinOp, Expr};
use crate::error::{EvalFault, ExprError, ExprResult};

/// Evaluates `expr` with the variable bound to `x`.
///
/// Every intermediate result is checked; a division by zero, a result outside
/// the reals, or an overflow fails with [`ExprError::Evaluation`] instead of
/// propagating `NaN` or infinity.
pub fn evaluate(expr: &Expr, x: f64) -> ExprResult<f64> {
    let value = match expr {
        Expr::Num(v) => *v,
        Expr::Var => x,
        Expr::Neg(inner) => -evaluate(inner, x)?,
        Expr::Binary { op, lhs, rhs } => {
            let a = evaluate(lhs, x)?;
            let b = evaluate(rhs, x)?;
            apply(*op, a, b).map_err(|fault| ExprError::evaluation(x, fault))?
        }
    };
    check(value).map_err(|fault| ExprError::evaluation(x, fault))
}

fn apply(op: BinOp, a: f64, b: f64) -> Result<f64, EvalFault> {
    match op {
        BinOp::Add => Ok(a + b),
        BinOp::Sub => Ok(a - b),
        BinOp::Mul => Ok(a * b),
        BinOp::Div => {
            if b == 0.0 {
                Err(EvalFault::DivisionByZero)
            } else {
                Ok(a / b)
            }
        }
        BinOp::Pow => {
            if a == 0.0 && b < 0.0 {
                return Err(EvalFault::DivisionByZero);
            }
            Ok(a.powf(b))
        }
    }
}

fn check(value: f64) -> Result<f64, EvalFault> {
    if value.is_nan() {
        Err(EvalFault::Domain)
    } else if value.is_infinite() {
        Err(EvalFault::Overflow)
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use approx::assert_relative_eq;

    fn eval(source: &str, x: f64) -> ExprResult<f64> {
        evaluate(&parse(source, 'x')?, x)
    }

    #[test]
    fn test_polynomials() {
        assert_relative_eq!(eval("x^2 - 4", 3.0).unwrap(), 5.0);
        assert_relative_eq!(eval("x^3 - x - 2", 1.5).unwrap(), -0.125);
        assert_relative_eq!(eval("3x^2 + 2x - 1", 2.0).unwrap(), 15.0);
    }

    #[test]
    fn test_operator_semantics() {
        assert_relative_eq!(eval("2^3^2", 0.0).unwrap(), 512.0);
        assert_relative_eq!(eval("-x^2", 3.0).unwrap(), -9.0);
        assert_relative_eq!(eval("8 / 4 / 2", 0.0).unwrap(), 1.0);
        assert_relative_eq!(eval("2(x + 1)", 1.0).unwrap(), 4.0);
        assert_relative_eq!(eval("(x + 1)2", 1.0).unwrap(), 4.0);
        assert_relative_eq!(eval("2^-1", 0.0).unwrap(), 0.5);
    }

    #[test]
    fn test_negative_substitution() {
        // The variable is substituted as a parenthesized value, so (-2)^2 = 4.
        assert_relative_eq!(eval("x^2", -2.0).unwrap(), 4.0);
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            eval("1 / x", 0.0).unwrap_err(),
            ExprError::evaluation(0.0, EvalFault::DivisionByZero)
        );
        assert_eq!(
            eval("x^-1", 0.0).unwrap_err(),
            ExprError::evaluation(0.0, EvalFault::DivisionByZero)
        );
    }

    #[test]
    fn test_domain_error() {
        assert_eq!(
            eval("x^0.5", -4.0).unwrap_err(),
            ExprError::evaluation(-4.0, EvalFault::Domain)
        );
    }

    #[test]
    fn test_overflow() {
        assert_eq!(
            eval("10^x", 400.0).unwrap_err(),
            ExprError::evaluation(400.0, EvalFault::Overflow)
        );
    }
}
