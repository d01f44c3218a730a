//! Expression parsing.
//!
//! Precedence, lowest to highest:
//!
//! 1. OR (left-associative)
//! 2. AND (left-associative)
//! 3. =, != (non-associative: at most one per level)
//! 4. <, <=, >, >= (non-associative: at most one per level)
//! 5. literals, identifiers and parenthesized arrays
//!
//! `a = b = c` is rejected on purpose; the second `=` is left for the caller,
//! which then fails on the missing `;`.

use super::ast::{BinaryOperator, Expr};
use super::error::ParseError;
use super::parser::Parser;
use super::token::TokenKind;

impl Parser {
    /// Parses an expression.
    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_or_expr()
    }

    fn parse_or_expr(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and_expr()?;
        while self.consume_keyword("OR") {
            let right = self.parse_and_expr()?;
            left = Expr::binary(left, BinaryOperator::Or, right);
        }
        Ok(left)
    }

    fn parse_and_expr(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_equality_expr()?;
        while self.consume_keyword("AND") {
            let right = self.parse_equality_expr()?;
            left = Expr::binary(left, BinaryOperator::And, right);
        }
        Ok(left)
    }

    fn parse_equality_expr(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_relational_expr()?;

        let op = match self.peek_kind() {
            Some(TokenKind::Eq) => BinaryOperator::Eq,
            Some(TokenKind::Neq) => BinaryOperator::Neq,
            _ => return Ok(left),
        };
        self.advance();

        let right = self.parse_relational_expr()?;
        Ok(Expr::binary(left, op, right))
    }

    fn parse_relational_expr(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_primary_expr()?;

        let op = match self.peek_kind() {
            Some(TokenKind::Lt) => BinaryOperator::Lt,
            Some(TokenKind::LtEq) => BinaryOperator::LtEq,
            Some(TokenKind::Gt) => BinaryOperator::Gt,
            Some(TokenKind::GtEq) => BinaryOperator::GtEq,
            _ => return Ok(left),
        };
        self.advance();

        let right = self.parse_primary_expr()?;
        Ok(Expr::binary(left, op, right))
    }

    /// Parses a literal, an identifier or an array.
    pub(crate) fn parse_primary_expr(&mut self) -> Result<Expr, ParseError> {
        let Some(token) = self.peek() else {
            return Err(self.unexpected("expression"));
        };

        let expr = match token.kind {
            TokenKind::Number => {
                let value = token
                    .text
                    .parse::<f64>()
                    .map_err(|_| ParseError::new("invalid number literal", token.position()))?;
                Expr::Number(value)
            }
            TokenKind::String => Expr::String(token.text.clone()),
            TokenKind::True => Expr::Boolean(true),
            TokenKind::False => Expr::Boolean(false),
            TokenKind::Identifier => Expr::Identifier(token.text.clone()),
            TokenKind::LParen => return self.parse_array(),
            _ => return Err(self.unexpected("expression")),
        };

        self.advance();
        Ok(expr)
    }

    /// Parses `'(' (primary (',' primary)*)? ')'`.
    pub(crate) fn parse_array(&mut self) -> Result<Expr, ParseError> {
        self.expect_token(TokenKind::LParen)?;

        let mut elements = Vec::new();
        if !self.check_token(TokenKind::RParen) {
            loop {
                elements.push(self.parse_primary_expr()?);
                if !self.consume_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect_token(TokenKind::RParen)?;
        Ok(Expr::Array(elements))
    }
}
