//! Abstract syntax tree for single-variable expressions.
//!
//! Nodes are immutable values; differentiation builds new trees. The
//! `Display` impl prints with the minimum parentheses needed to reparse to the
//! same tree, and [`Expr::render_at`] prints with each variable occurrence
//! replaced by a parenthesized value.

use std::fmt;

/// Binary operators supported by the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication (explicit or implicit).
    Mul,
    /// Division.
    Div,
    /// Exponentiation (right associative).
    Pow,
}

impl BinOp {
    /// Binding strength; higher binds tighter.
    #[must_use]
    pub fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
            Self::Pow => 4,
        }
    }

    /// Operator symbol.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        }
    }
}

/// Precedence of unary negation: between `*` and `^`.
const NEG_PRECEDENCE: u8 = 3;

/// Expression tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal.
    Num(f64),
    /// The free variable.
    Var,
    /// Unary negation.
    Neg(Box<Expr>),
    /// Binary operation.
    Binary {
        /// Operator.
        op: BinOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
}

impl Expr {
    /// Builds a binary node.
    #[must_use]
    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Returns true if the variable occurs anywhere in this subtree.
    #[must_use]
    pub fn contains_var(&self) -> bool {
        match self {
            Self::Num(_) => false,
            Self::Var => true,
            Self::Neg(inner) => inner.contains_var(),
            Self::Binary { lhs, rhs, .. } => lhs.contains_var() || rhs.contains_var(),
        }
    }

    /// Returns the literal value if this node is a number.
    #[must_use]
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Self::Num(v) => Some(*v),
            _ => None,
        }
    }

    /// Renders the expression using `symbol` for the variable.
    #[must_use]
    pub fn render(&self, symbol: char) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write_expr(&mut out, self, VarText::Symbol(symbol), 0, Side::None);
        out
    }

    /// Renders the expression with every variable occurrence replaced by `(value)`.
    #[must_use]
    pub fn render_at(&self, value: f64) -> String {
        let mut out = String::new();
        let _ = write_expr(&mut out, self, VarText::Value(value), 0, Side::None);
        out
    }

    fn precedence(&self) -> u8 {
        match self {
            Self::Num(_) | Self::Var => u8::MAX,
            Self::Neg(_) => NEG_PRECEDENCE,
            Self::Binary { op, .. } => op.precedence(),
        }
    }
}

#[derive(Clone, Copy)]
enum VarText {
    Symbol(char),
    Value(f64),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    None,
    Left,
    Right,
}

fn needs_parens(child: &Expr, parent_prec: u8, side: Side) -> bool {
    if let Expr::Num(v) = child {
        return v.is_sign_negative() && parent_prec > 0;
    }
    let prec = child.precedence();
    if prec < parent_prec {
        return true;
    }
    if prec > parent_prec || prec == u8::MAX {
        return false;
    }
    // Equal precedence: left-associative operators need parens on the right,
    // `^` (right-associative) needs them on the left.
    match side {
        Side::None => false,
        Side::Left => parent_prec == BinOp::Pow.precedence(),
        Side::Right => parent_prec != BinOp::Pow.precedence(),
    }
}

fn write_expr<W: fmt::Write>(
    out: &mut W,
    expr: &Expr,
    var: VarText,
    parent_prec: u8,
    side: Side,
) -> fmt::Result {
    let parens = needs_parens(expr, parent_prec, side);
    if parens {
        out.write_char('(')?;
    }
    match expr {
        Expr::Num(v) => write!(out, "{v}")?,
        Expr::Var => match var {
            VarText::Symbol(symbol) => out.write_char(symbol)?,
            VarText::Value(v) => write!(out, "({v})")?,
        },
        Expr::Neg(inner) => {
            out.write_char('-')?;
            write_expr(out, inner, var, NEG_PRECEDENCE, Side::Right)?;
        }
        Expr::Binary { op, lhs, rhs } => {
            let prec = op.precedence();
            write_expr(out, lhs, var, prec, Side::Left)?;
            if *op == BinOp::Pow {
                out.write_str(op.symbol())?;
            } else {
                write!(out, " {} ", op.symbol())?;
            }
            write_expr(out, rhs, var, prec, Side::Right)?;
        }
    }
    if parens {
        out.write_char(')')?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(f, self, VarText::Symbol('x'), 0, Side::None)
    }
}
