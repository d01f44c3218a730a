//! SQL token types.
//!
//! This module defines the [`Token`] struct produced by the lexer and consumed
//! by the parser. Keywords are not a token kind: `SELECT`, `FROM` and friends
//! arrive as plain identifiers and are recognized by the parser from their text.

use super::error::Position;

/// A token with its literal text and source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The token kind.
    pub kind: TokenKind,
    /// Literal text. For string literals this is the unescaped value; for
    /// error tokens it is the error message.
    pub text: String,
    /// 1-based line of the first character.
    pub line: u32,
    /// 1-based column of the first character.
    pub column: u32,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    /// Returns true if this is an end-of-input token.
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the position of this token.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Returns true if this is an identifier whose text matches `keyword`,
    /// ignoring ASCII case.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Identifier && self.text.eq_ignore_ascii_case(keyword)
    }

    /// Returns the display name for error messages.
    pub fn display_name(&self) -> String {
        match self.kind {
            TokenKind::Identifier => format!("identifier '{}'", self.text),
            TokenKind::Number => format!("number '{}'", self.text),
            TokenKind::String => format!("string '{}'", self.text),
            TokenKind::Error => self.text.clone(),
            _ => self.kind.display_name().to_string(),
        }
    }
}

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals and names
    /// Unquoted or double-quoted identifier, including keywords.
    Identifier,
    /// Numeric literal (e.g., 42, -1.5, 2e10).
    Number,
    /// Single-quoted string literal.
    String,
    /// `true` literal.
    True,
    /// `false` literal.
    False,

    // Punctuation
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// (
    LParen,
    /// )
    RParen,
    /// *
    Asterisk,

    // Comparison operators
    /// =
    Eq,
    /// != or <>
    Neq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,

    /// Line break. Insignificant to the grammar.
    Newline,
    /// Lexical error; the token text carries the message.
    Error,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Returns the display name for error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::True => "'TRUE'",
            TokenKind::False => "'FALSE'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Asterisk => "'*'",
            TokenKind::Eq => "'='",
            TokenKind::Neq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::LtEq => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::GtEq => "'>='",
            TokenKind::Newline => "newline",
            TokenKind::Error => "invalid token",
            TokenKind::Eof => "end of input",
        }
    }
}
