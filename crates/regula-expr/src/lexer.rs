//! Tokenizer for single-variable arithmetic expressions.

use crate::error::{ExprError, ExprResult};

/// A lexical token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// Numeric literal.
    Number(f64),
    /// The free variable.
    Variable,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `^`
    Caret,
    /// `(`
    LParen,
    /// `)`
    RParen,
}

/// A token together with its byte offset in the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spanned {
    /// The token.
    pub token: Token,
    /// Byte offset of the first character.
    pub position: usize,
}

/// Splits `source` into tokens. The variable symbol is matched case-insensitively.
pub fn tokenize(source: &str, variable: char) -> ExprResult<Vec<Spanned>> {
    let variable = variable.to_ascii_lowercase();
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let c = bytes[pos] as char;
        let start = pos;

        let token = match c {
            ' ' | '\t' | '\n' | '\r' => {
                pos += 1;
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '^' => Token::Caret,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '0'..='9' | '.' => {
                let (value, end) = scan_number(source, start)?;
                tokens.push(Spanned {
                    token: Token::Number(value),
                    position: start,
                });
                pos = end;
                continue;
            }
            c if c.to_ascii_lowercase() == variable => Token::Variable,
            _ => {
                let ch = source[start..].chars().next().unwrap_or(c);
                return Err(ExprError::parse(
                    start,
                    format!("unexpected character '{ch}'"),
                ));
            }
        };

        tokens.push(Spanned {
            token,
            position: start,
        });
        pos += 1;
    }

    log::trace!("tokenized {:?} into {} tokens", source, tokens.len());
    Ok(tokens)
}

/// Scans a numeric literal starting at `start`, returning its value and end offset.
fn scan_number(source: &str, start: usize) -> ExprResult<(f64, usize)> {
    let bytes = source.as_bytes();
    let mut end = start;
    let mut digits = 0;

    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return Err(ExprError::parse(start, "malformed number"));
    }

    // Exponent part, only when followed by digits so `2e` stays an error elsewhere.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut ahead = end + 1;
        if ahead < bytes.len() && (bytes[ahead] == b'+' || bytes[ahead] == b'-') {
            ahead += 1;
        }
        if ahead < bytes.len() && bytes[ahead].is_ascii_digit() {
            while ahead < bytes.len() && bytes[ahead].is_ascii_digit() {
                ahead += 1;
            }
            end = ahead;
        }
    }

    source[start..end]
        .parse::<f64>()
        .map(|value| (value, end))
        .map_err(|_| ExprError::parse(start, "malformed number"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source, 'x')
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    #[test]
    fn test_simple_expression() {
        assert_eq!(
            kinds("x^2 - 4"),
            vec![
                Token::Variable,
                Token::Caret,
                Token::Number(2.0),
                Token::Minus,
                Token::Number(4.0),
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(kinds("3.25"), vec![Token::Number(3.25)]);
        assert_eq!(kinds(".5"), vec![Token::Number(0.5)]);
        assert_eq!(kinds("1e-3"), vec![Token::Number(0.001)]);
        assert_eq!(kinds("2E2"), vec![Token::Number(200.0)]);
    }

    #[test]
    fn test_uppercase_variable() {
        assert_eq!(kinds("X"), vec![Token::Variable]);
    }

    #[test]
    fn test_custom_variable() {
        let tokens = tokenize("2t", 't').unwrap();
        assert_eq!(tokens[1].token, Token::Variable);
        assert!(tokenize("2x", 't').is_err());
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("  x + 10", 'x').unwrap();
        assert_eq!(tokens[0].position, 2);
        assert_eq!(tokens[2].position, 6);
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("x # 2", 'x').unwrap_err();
        assert_eq!(err, ExprError::parse(2, "unexpected character '#'"));
    }

    #[test]
    fn test_lone_dot() {
        assert!(matches!(
            tokenize("x + .", 'x'),
            Err(ExprError::Parse { position: 4, .. })
        ));
    }
}
