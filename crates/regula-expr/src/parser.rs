//! Recursive-descent parser producing an [`Expr`] tree.
//!
//! Grammar, lowest to highest binding:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary | <implicit> power)*
//! unary   := ('-' | '+') unary | power
//! power   := primary ('^' unary)?
//! primary := number | variable | '(' expr ')'
//! ```
//!
//! Implicit multiplication applies when a factor is directly followed by a
//! number, the variable or an opening parenthesis (`2(x+1)`, `(x+1)2`, `3x^2`).
//!
//! Input is limited to [`MAX_SOURCE_LEN`] bytes and [`MAX_DEPTH`] levels of
//! nested parentheses, signs and exponents, so evaluating, differentiating and
//! printing the resulting tree stays within a bounded recursion depth.

use crate::ast::{BinOp, Expr};
use crate::error::{ExprError, ExprResult};
use crate::lexer::{tokenize, Spanned, Token};

/// Longest accepted expression text, in bytes.
pub const MAX_SOURCE_LEN: usize = 1024;

/// Deepest accepted nesting of parentheses, signs and exponents.
pub const MAX_DEPTH: usize = 128;

/// Parses `source` into an expression tree over `variable`.
pub fn parse(source: &str, variable: char) -> ExprResult<Expr> {
    if source.len() > MAX_SOURCE_LEN {
        return Err(ExprError::parse(
            MAX_SOURCE_LEN,
            format!("expression longer than {MAX_SOURCE_LEN} characters"),
        ));
    }

    let tokens = tokenize(source, variable)?;
    if tokens.is_empty() {
        return Err(ExprError::parse(0, "empty expression"));
    }

    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        end: source.len(),
        depth: 0,
    };
    let expr = parser.expr()?;

    if let Some(extra) = parser.peek() {
        let message = match extra.token {
            Token::RParen => "unbalanced ')'".to_string(),
            other => format!("unexpected {}", describe(other)),
        };
        return Err(ExprError::parse(extra.position, message));
    }

    Ok(expr)
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    end: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Spanned> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Spanned> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: Token) -> bool {
        match self.peek() {
            Some(s) if s.token == expected => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn expr(&mut self) -> ExprResult<Expr> {
        let mut lhs = self.term()?;
        loop {
            let op = if self.eat(Token::Plus) {
                BinOp::Add
            } else if self.eat(Token::Minus) {
                BinOp::Sub
            } else {
                break;
            };
            let rhs = self.term()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn term(&mut self) -> ExprResult<Expr> {
        let mut lhs = self.unary()?;
        loop {
            if self.eat(Token::Star) {
                let rhs = self.unary()?;
                lhs = Expr::binary(BinOp::Mul, lhs, rhs);
            } else if self.eat(Token::Slash) {
                let rhs = self.unary()?;
                lhs = Expr::binary(BinOp::Div, lhs, rhs);
            } else if self.starts_primary() {
                let rhs = self.power()?;
                lhs = Expr::binary(BinOp::Mul, lhs, rhs);
            } else {
                break;
            }
        }
        Ok(lhs)
    }

    // Every nested construct passes through here: parenthesized groups via
    // `expr`, sign chains and exponents.
    fn unary(&mut self) -> ExprResult<Expr> {
        if self.depth >= MAX_DEPTH {
            let position = self.peek().map_or(self.end, |s| s.position);
            return Err(ExprError::parse(position, "expression nested too deeply"));
        }
        self.depth += 1;
        let result = self.signed();
        self.depth -= 1;
        result
    }

    fn signed(&mut self) -> ExprResult<Expr> {
        if self.eat(Token::Minus) {
            let inner = self.unary()?;
            return Ok(Expr::Neg(Box::new(inner)));
        }
        if self.eat(Token::Plus) {
            return self.unary();
        }
        self.power()
    }

    fn power(&mut self) -> ExprResult<Expr> {
        let base = self.primary()?;
        if self.eat(Token::Caret) {
            // Right-associative, and allows a signed exponent: 2^-3.
            let exponent = self.unary()?;
            return Ok(Expr::binary(BinOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> ExprResult<Expr> {
        let Some(spanned) = self.bump() else {
            return Err(ExprError::parse(self.end, "unexpected end of expression"));
        };
        match spanned.token {
            Token::Number(v) => Ok(Expr::Num(v)),
            Token::Variable => Ok(Expr::Var),
            Token::LParen => {
                let inner = self.expr()?;
                if !self.eat(Token::RParen) {
                    let position = self.peek().map_or(self.end, |s| s.position);
                    return Err(ExprError::parse(position, "missing ')'"));
                }
                Ok(inner)
            }
            other => Err(ExprError::parse(
                spanned.position,
                format!("unexpected {}", describe(other)),
            )),
        }
    }

    fn starts_primary(&self) -> bool {
        matches!(
            self.peek().map(|s| s.token),
            Some(Token::Number(_) | Token::Variable | Token::LParen)
        )
    }
}

fn describe(token: Token) -> String {
    match token {
        Token::Number(v) => format!("number {v}"),
        Token::Variable => "variable".to_string(),
        Token::Plus => "'+'".to_string(),
        Token::Minus => "'-'".to_string(),
        Token::Star => "'*'".to_string(),
        Token::Slash => "'/'".to_string(),
        Token::Caret => "'^'".to_string(),
        Token::LParen => "'('".to_string(),
        Token::RParen => "')'".to_string(),
    }
}
