//! SQL syntax error types.
//!
//! This module provides the [`ParseError`] type for representing syntax errors
//! with the line/column of the offending token.

use std::fmt;

/// A 1-based line/column position in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Line number, starting at 1.
    pub line: u32,
    /// Column number, starting at 1.
    pub column: u32,
}

impl Position {
    /// Creates a new position.
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Syntax error with source position information.
///
/// Parsing stops at the first error; there is no recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Error message.
    pub message: String,
    /// Position of the token that triggered the error.
    pub position: Position,
}

impl ParseError {
    /// Creates a new syntax error at the given position.
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }

    /// Creates a new error for an unexpected token.
    pub fn unexpected_token(expected: &str, found: &str, position: Position) -> Self {
        Self::new(format!("expected {expected}, found {found}"), position)
    }

    /// Returns the 1-based line of the error.
    pub fn line(&self) -> u32 {
        self.position.line
    }

    /// Returns the 1-based column of the error.
    pub fn column(&self) -> u32 {
        self.position.column
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.position)
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_accessors() {
        let err = ParseError::new("test", Position::new(3, 7));
        assert_eq!(err.line(), 3);
        assert_eq!(err.column(), 7);
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::unexpected_token("';'", "identifier 'x'", Position::new(1, 5));
        assert_eq!(
            err.to_string(),
            "expected ';', found identifier 'x' at line 1, column 5"
        );
    }
}
