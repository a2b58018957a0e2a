//! Restricted arithmetic grammar.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '%') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('^' unary)?
//! primary := number | identifier | '(' expr ')'
//! ```
//!
//! Numbers and variable references only. There are no calls, no assignment
//! inside an expression and no side effects; a line-level `name = expr` is
//! split off before the right-hand side is evaluated.

use super::scope::Scope;
use crate::parser::split_assignment;
use std::fmt;
use thiserror::Error;

/// Deepest nesting of parentheses and unary operators accepted.
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("invalid expression: empty")]
    Empty,
    #[error("invalid expression: unexpected `{found}` at column {column}")]
    UnexpectedChar { found: char, column: usize },
    #[error("invalid expression: malformed number `{0}`")]
    BadNumber(String),
    #[error("invalid expression: expected {expected}, found {found}")]
    Unexpected { expected: &'static str, found: String },
    #[error("undefined variable `{0}`")]
    UndefinedVariable(String),
    #[error("unknown function `{0}`")]
    UnknownFunction(String),
    #[error("invalid expression: nested too deeply")]
    TooDeep,
    #[error("invalid expression: result is not a finite number")]
    NonFinite,
}

type Result<T> = std::result::Result<T, ExprError>;

/// Evaluate one line of code against `scope`.
///
/// For `name = expr` only the right-hand side is evaluated; committing the
/// value is the caller's job.
pub fn evaluate<S: Scope + ?Sized>(expression: &str, scope: &S) -> Result<f64> {
    let body = match split_assignment(expression.trim()) {
        Some((_, rhs)) => rhs,
        None => expression,
    };
    evaluate_arithmetic(body, scope)
}

/// Evaluate a pure arithmetic expression (no assignment).
pub fn evaluate_arithmetic<S: Scope + ?Sized>(expression: &str, scope: &S) -> Result<f64> {
    let tokens = Lexer::new(expression).tokenize()?;
    if matches!(tokens.first(), Some(Token::Eof) | None) {
        return Err(ExprError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        scope,
    };
    let value = parser.expression()?;
    parser.expect_end()?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(ExprError::NonFinite)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    LParen,
    RParen,
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "`{n}`"),
            Self::Ident(name) => write!(f, "`{name}`"),
            Self::Plus => f.write_str("`+`"),
            Self::Minus => f.write_str("`-`"),
            Self::Star => f.write_str("`*`"),
            Self::Slash => f.write_str("`/`"),
            Self::Percent => f.write_str("`%`"),
            Self::Caret => f.write_str("`^`"),
            Self::LParen => f.write_str("`(`"),
            Self::RParen => f.write_str("`)`"),
            Self::Eof => f.write_str("end of input"),
        }
    }
}

struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token == Token::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        let Some(ch) = self.peek() else {
            return Ok(Token::Eof);
        };

        if ch.is_ascii_digit() || (ch == b'.' && self.peek_at(1).is_some_and(|b| b.is_ascii_digit()))
        {
            return self.scan_number();
        }
        if ch == b'_' || ch.is_ascii_alphabetic() {
            return Ok(self.scan_identifier());
        }

        let token = match ch {
            b'+' => Token::Plus,
            b'-' => Token::Minus,
            b'*' => Token::Star,
            b'/' => Token::Slash,
            b'%' => Token::Percent,
            b'^' => Token::Caret,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            _ => {
                let found = self.input[self.pos..].chars().next().unwrap_or('?');
                return Err(ExprError::UnexpectedChar {
                    found,
                    column: self.input[..self.pos].chars().count() + 1,
                });
            }
        };
        self.pos += 1;
        Ok(token)
    }

    fn scan_digits(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    fn scan_number(&mut self) -> Result<Token> {
        let start = self.pos;
        self.scan_digits();

        if self.peek() == Some(b'.') {
            self.pos += 1;
            self.scan_digits();
        }

        // Exponent only when digits follow, so `2e` stays `2` then `e`.
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let digits_at = match self.peek_at(1) {
                Some(b'+' | b'-') => 2,
                _ => 1,
            };
            if self.peek_at(digits_at).is_some_and(|b| b.is_ascii_digit()) {
                self.pos += digits_at;
                self.scan_digits();
            }
        }

        let text = &self.input[start..self.pos];
        text.parse()
            .map(Token::Number)
            .map_err(|_| ExprError::BadNumber(text.to_string()))
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| b == b'_' || b.is_ascii_alphanumeric())
        {
            self.pos += 1;
        }
        Token::Ident(self.input[start..self.pos].to_string())
    }
}

struct Parser<'s, S: Scope + ?Sized> {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    scope: &'s S,
}

impl<S: Scope + ?Sized> Parser<'_, S> {
    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn expect_end(&self) -> Result<()> {
        match self.peek() {
            Token::Eof => Ok(()),
            other => Err(ExprError::Unexpected {
                expected: "an operator",
                found: other.to_string(),
            }),
        }
    }

    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_DEPTH {
            return Err(ExprError::TooDeep);
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn expression(&mut self) -> Result<f64> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Token::Plus => {
                    self.advance();
                    value += self.term()?;
                }
                Token::Minus => {
                    self.advance();
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Token::Star => {
                    self.advance();
                    value *= self.unary()?;
                }
                Token::Slash => {
                    self.advance();
                    value /= self.unary()?;
                }
                Token::Percent => {
                    self.advance();
                    let divisor = self.unary()?;
                    // Floored modulo: the result takes the divisor's sign.
                    value -= divisor * (value / divisor).floor();
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<f64> {
        match self.peek() {
            Token::Minus => {
                self.advance();
                self.nested(|p| p.unary()).map(|v| -v)
            }
            Token::Plus => {
                self.advance();
                self.nested(|p| p.unary())
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<f64> {
        let base = self.primary()?;
        if *self.peek() == Token::Caret {
            self.advance();
            let exponent = self.nested(|p| p.unary())?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<f64> {
        match self.advance() {
            Token::Number(n) => Ok(n),
            Token::Ident(name) => {
                if *self.peek() == Token::LParen {
                    return Err(ExprError::UnknownFunction(name));
                }
                self.scope
                    .lookup(&name)
                    .ok_or(ExprError::UndefinedVariable(name))
            }
            Token::LParen => {
                let value = self.nested(|p| p.expression())?;
                match self.advance() {
                    Token::RParen => Ok(value),
                    other => Err(ExprError::Unexpected {
                        expected: "`)`",
                        found: other.to_string(),
                    }),
                }
            }
            other => Err(ExprError::Unexpected {
                expected: "a number, variable or `(`",
                found: other.to_string(),
            }),
        }
    }
}
