//! Symbolic first derivative as a tree transformation.
//!
//! Supported rules:
//!
//! - Constant and variable
//! - Sum, difference and negation
//! - Product rule: `d(u*v) = u'*v + u*v'`
//! - Quotient rule: `d(u/v) = (u'*v - u*v') / v^2`
//! - Power rule with constant exponent: `d(u^n) = n*u^(n-1)*u'`
//! - Exponential with constant positive base: `d(a^v) = a^v*ln(a)*v'`
//!
//! `ln(a)` is folded into a literal because the grammar has no logarithm.
//! A variable raised to a variable exponent (`x^x`) and a non-positive
//! constant base under a variable exponent are rejected.
//!
//! The node constructors below fold literal arithmetic and the identities
//! `0*u`, `1*u`, `u+0`, `u^1` so the rendered result stays readable. No
//! further simplification is attempted.

use crate::ast::{BinOp, Expr};
use crate::error::{ExprError, ExprResult};
use crate::eval::evaluate;

/// Differentiates `expr` with respect to its variable.
pub fn differentiate(expr: &Expr) -> ExprResult<Expr> {
    match expr {
        Expr::Num(_) => Ok(Expr::Num(0.0)),
        Expr::Var => Ok(Expr::Num(1.0)),
        Expr::Neg(inner) => Ok(neg(differentiate(inner)?)),
        Expr::Binary { op, lhs, rhs } => {
            let (u, v) = (lhs.as_ref(), rhs.as_ref());
            match op {
                BinOp::Add => Ok(add(differentiate(u)?, differentiate(v)?)),
                BinOp::Sub => Ok(sub(differentiate(u)?, differentiate(v)?)),
                BinOp::Mul => {
                    let du = differentiate(u)?;
                    let dv = differentiate(v)?;
                    Ok(add(mul(du, v.clone()), mul(u.clone(), dv)))
                }
                BinOp::Div => {
                    let du = differentiate(u)?;
                    let dv = differentiate(v)?;
                    let numerator = sub(mul(du, v.clone()), mul(u.clone(), dv));
                    Ok(div(numerator, pow(v.clone(), Expr::Num(2.0))))
                }
                BinOp::Pow => differentiate_pow(expr, u, v),
            }
        }
    }
}

fn differentiate_pow(node: &Expr, base: &Expr, exponent: &Expr) -> ExprResult<Expr> {
    match (base.contains_var(), exponent.contains_var()) {
        (false, false) => Ok(Expr::Num(0.0)),
        (true, false) => {
            let n = constant_value(exponent)?;
            let du = differentiate(base)?;
            Ok(mul(
                mul(Expr::Num(n), pow(base.clone(), Expr::Num(n - 1.0))),
                du,
            ))
        }
        (false, true) => {
            let a = constant_value(base)?;
            if a <= 0.0 {
                return Err(ExprError::derivative(format!(
                    "{node} (non-positive base under a variable exponent)"
                )));
            }
            let dv = differentiate(exponent)?;
            Ok(mul(mul(node.clone(), Expr::Num(a.ln())), dv))
        }
        (true, true) => Err(ExprError::derivative(format!(
            "{node} (variable base with variable exponent)"
        ))),
    }
}

/// Folds a variable-free subtree to its value.
fn constant_value(expr: &Expr) -> ExprResult<f64> {
    evaluate(expr, 0.0)
        .map_err(|_| ExprError::derivative(format!("{expr} (undefined constant)")))
}

fn neg(e: Expr) -> Expr {
    match e {
        Expr::Num(v) => Expr::Num(-v),
        Expr::Neg(inner) => *inner,
        other => Expr::Neg(Box::new(other)),
    }
}

fn add(a: Expr, b: Expr) -> Expr {
    match (a.as_num(), b.as_num()) {
        (Some(x), Some(y)) => Expr::Num(x + y),
        (Some(x), _) if x == 0.0 => b,
        (_, Some(y)) if y == 0.0 => a,
        _ => Expr::binary(BinOp::Add, a, b),
    }
}

fn sub(a: Expr, b: Expr) -> Expr {
    match (a.as_num(), b.as_num()) {
        (Some(x), Some(y)) => Expr::Num(x - y),
        (_, Some(y)) if y == 0.0 => a,
        (Some(x), _) if x == 0.0 => neg(b),
        _ => Expr::binary(BinOp::Sub, a, b),
    }
}

fn mul(a: Expr, b: Expr) -> Expr {
    match (a.as_num(), b.as_num()) {
        (Some(x), Some(y)) => Expr::Num(x * y),
        (Some(x), _) | (_, Some(x)) if x == 0.0 => Expr::Num(0.0),
        (Some(x), _) if x == 1.0 => b,
        (_, Some(y)) if y == 1.0 => a,
        _ => Expr::binary(BinOp::Mul, a, b),
    }
}

fn div(a: Expr, b: Expr) -> Expr {
    match (a.as_num(), b.as_num()) {
        (Some(x), Some(y)) if y != 0.0 => Expr::Num(x / y),
        (Some(x), _) if x == 0.0 => Expr::Num(0.0),
        (_, Some(y)) if y == 1.0 => a,
        _ => Expr::binary(BinOp::Div, a, b),
    }
}

fn pow(base: Expr, exponent: Expr) -> Expr {
    match (base.as_num(), exponent.as_num()) {
        (Some(x), Some(y)) if x.powf(y).is_finite() => Expr::Num(x.powf(y)),
        (_, Some(y)) if y == 0.0 => Expr::Num(1.0),
        (_, Some(y)) if y == 1.0 => base,
        _ => Expr::binary(BinOp::Pow, base, exponent),
    }
}
