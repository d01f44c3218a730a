//! SQL front end.
//!
//! This module turns DSQL text into an Abstract Syntax Tree. The [`Lexer`]
//! produces positioned tokens and the handwritten recursive descent
//! [`Parser`] builds a [`SourceElements`] root from them.

mod ast;
mod error;
mod expr;
mod lexer;
mod parser;
mod token;

pub use ast::*;
pub use error::{ParseError, Position};
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::{Token, TokenKind};

/// Parses DSQL text into a program.
///
/// # Errors
///
/// Returns the first [`ParseError`] found in `input`.
pub fn parse(input: &str) -> Result<SourceElements, ParseError> {
    Parser::from_sql(input).parse()
}
