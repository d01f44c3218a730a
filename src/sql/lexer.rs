//! SQL lexer/tokenizer.
//!
//! The [`Lexer`] converts a SQL string into a stream of [`Token`]s carrying
//! line/column positions. It does not recognize keywords; those are left to
//! the parser.

use super::token::{Token, TokenKind};

/// SQL lexer that tokenizes input strings.
///
/// The lexer implements `Iterator<Item = Token>`. It handles:
/// - Identifiers (unquoted and double-quoted)
/// - Boolean literals (`true`/`false`, case-insensitive)
/// - Numeric literals with an optional leading minus
/// - String literals (single-quoted with '' escape)
/// - Comparison operators and punctuation
/// - Line breaks, emitted as `Newline` tokens
/// - Comments (-- line comments and /* */ block comments)
///
/// Lexical errors are returned as `TokenKind::Error` tokens rather than
/// being accumulated separately.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: u32,
    column: u32,
    /// Whether EOF has been returned.
    eof_returned: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            column: 1,
            eof_returned: false,
        }
    }

    /// Consumes the lexer and collects every token, ending with `Eof`.
    pub fn tokenize(self) -> Vec<Token> {
        self.collect()
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.input[self.pos..].starts_with(prefix)
    }

    /// Returns the character at `pos + offset` without consuming it.
    fn peek(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    /// Advances the position by `n` characters, tracking line and column.
    fn advance(&mut self, n: usize) {
        for _ in 0..n {
            if let Some(ch) = self.peek(0) {
                self.pos += ch.len_utf8();
                if ch == '\n' {
                    self.line += 1;
                    self.column = 1;
                } else {
                    self.column += 1;
                }
            }
        }
    }

    fn token(&self, kind: TokenKind, text: impl Into<String>, line: u32, column: u32) -> Token {
        Token::new(kind, text, line, column)
    }

    /// Skips blanks and comments.
    ///
    /// Returns `Some(Token)` if an error was encountered (e.g., unterminated block comment),
    /// `None` otherwise.
    fn skip_blanks_and_comments(&mut self) -> Option<Token> {
        loop {
            self.skip_blanks();
            match self.skip_comment() {
                Ok(true) => continue,
                Ok(false) => return None,
                Err(token) => return Some(token),
            }
        }
    }

    /// Skips whitespace except line breaks.
    fn skip_blanks(&mut self) {
        while self
            .peek(0)
            .is_some_and(|ch| ch.is_whitespace() && ch != '\n')
        {
            self.advance(1);
        }
    }

    /// Attempts to skip a comment.
    ///
    /// Returns `Ok(true)` if a comment was skipped, `Ok(false)` if no comment was present,
    /// or `Err(Token)` if an error occurred (e.g., unterminated block comment).
    fn skip_comment(&mut self) -> Result<bool, Token> {
        // Line comment: -- up to (not including) the line break
        if self.starts_with("--") {
            self.advance(2);
            while let Some(ch) = self.peek(0) {
                if ch == '\n' {
                    break;
                }
                self.advance(1);
            }
            return Ok(true);
        }

        // Block comment: /* to */
        if self.starts_with("/*") {
            let (line, column) = (self.line, self.column);
            self.advance(2);
            let mut depth = 1;
            while depth > 0 && !self.is_eof() {
                if self.starts_with("/*") {
                    depth += 1;
                    self.advance(2);
                } else if self.starts_with("*/") {
                    depth -= 1;
                    self.advance(2);
                } else {
                    self.advance(1);
                }
            }
            if depth > 0 {
                return Err(self.token(
                    TokenKind::Error,
                    "unterminated block comment",
                    line,
                    column,
                ));
            }
            return Ok(true);
        }

        Ok(false)
    }

    /// Scans the next token from the input.
    fn scan_token(&mut self) -> Token {
        if let Some(error_token) = self.skip_blanks_and_comments() {
            return error_token;
        }

        let (line, column) = (self.line, self.column);

        let Some(ch) = self.peek(0) else {
            return self.token(TokenKind::Eof, "", line, column);
        };

        if ch == '\n' {
            self.advance(1);
            return self.token(TokenKind::Newline, "\n", line, column);
        }

        if ch == '\'' {
            return self.scan_string_literal();
        }

        if ch == '"' {
            return self.scan_quoted_identifier();
        }

        // Number literal, optionally negative
        if ch.is_ascii_digit()
            || (ch == '-' && self.peek(1).is_some_and(|c| c.is_ascii_digit()))
        {
            return self.scan_number();
        }

        if is_ident_start(ch) {
            return self.scan_identifier();
        }

        self.scan_operator_or_punctuation()
    }

    fn scan_string_literal(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        self.advance(1); // consume opening quote

        let mut value = String::new();
        loop {
            match self.peek(0) {
                None => {
                    return self.token(
                        TokenKind::Error,
                        "unterminated string literal",
                        line,
                        column,
                    );
                }
                Some('\'') => {
                    self.advance(1);
                    // Check for escaped quote ('')
                    if self.peek(0) == Some('\'') {
                        value.push('\'');
                        self.advance(1);
                    } else {
                        break;
                    }
                }
                Some(ch) => {
                    value.push(ch);
                    self.advance(1);
                }
            }
        }

        self.token(TokenKind::String, value, line, column)
    }

    fn scan_quoted_identifier(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        self.advance(1); // consume opening quote

        let mut value = String::new();
        loop {
            match self.peek(0) {
                None => {
                    return self.token(
                        TokenKind::Error,
                        "unterminated quoted identifier",
                        line,
                        column,
                    );
                }
                Some('"') => {
                    self.advance(1);
                    // Check for escaped quote ("")
                    if self.peek(0) == Some('"') {
                        value.push('"');
                        self.advance(1);
                    } else {
                        break;
                    }
                }
                Some(ch) => {
                    value.push(ch);
                    self.advance(1);
                }
            }
        }

        self.token(TokenKind::Identifier, value, line, column)
    }

    fn skip_digits(&mut self) {
        while self.peek(0).is_some_and(|ch| ch.is_ascii_digit()) {
            self.advance(1);
        }
    }

    fn scan_number(&mut self) -> Token {
        let start = self.pos;
        let (line, column) = (self.line, self.column);

        if self.peek(0) == Some('-') {
            self.advance(1);
        }
        self.skip_digits();

        // Decimal point only counts when followed by a digit
        if self.peek(0) == Some('.') && self.peek(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance(1);
            self.skip_digits();
        }

        if let Some('e' | 'E') = self.peek(0) {
            self.advance(1);
            if let Some('+' | '-') = self.peek(0) {
                self.advance(1);
            }
            let exp_start = self.pos;
            self.skip_digits();
            if self.pos == exp_start {
                return self.token(TokenKind::Error, "invalid number literal", line, column);
            }
        }

        let text = &self.input[start..self.pos];
        self.token(TokenKind::Number, text, line, column)
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.pos;
        let (line, column) = (self.line, self.column);

        while self.peek(0).is_some_and(is_ident_continue) {
            self.advance(1);
        }

        let ident = &self.input[start..self.pos];
        let kind = if ident.eq_ignore_ascii_case("true") {
            TokenKind::True
        } else if ident.eq_ignore_ascii_case("false") {
            TokenKind::False
        } else {
            TokenKind::Identifier
        };
        self.token(kind, ident, line, column)
    }

    fn scan_operator_or_punctuation(&mut self) -> Token {
        let (line, column) = (self.line, self.column);

        // Two-character operators
        if let (Some(first), Some(second)) = (self.peek(0), self.peek(1)) {
            let kind = match (first, second) {
                ('<', '>') | ('!', '=') => Some(TokenKind::Neq),
                ('<', '=') => Some(TokenKind::LtEq),
                ('>', '=') => Some(TokenKind::GtEq),
                _ => None,
            };
            if let Some(kind) = kind {
                let text: String = [first, second].into_iter().collect();
                self.advance(2);
                return self.token(kind, text, line, column);
            }
        }

        let Some(ch) = self.peek(0) else {
            return self.token(TokenKind::Eof, "", line, column);
        };
        self.advance(1);
        let kind = match ch {
            '*' => TokenKind::Asterisk,
            '=' => TokenKind::Eq,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            _ => {
                return self.token(
                    TokenKind::Error,
                    format!("unexpected character '{ch}'"),
                    line,
                    column,
                );
            }
        };

        self.token(kind, ch.to_string(), line, column)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.eof_returned {
            return None;
        }

        let token = self.scan_token();
        if token.is_eof() {
            self.eof_returned = true;
        }
        Some(token)
    }
}

/// Returns true if the character can start an identifier.
fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

/// Returns true if the character can continue an identifier.
fn is_ident_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<TokenKind> {
        Lexer::new(input).map(|t| t.kind).collect()
    }

    fn texts(input: &str) -> Vec<String> {
        Lexer::new(input).map(|t| t.text).collect()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(lex(""), vec![TokenKind::Eof]);
        assert_eq!(lex("   \t "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_keywords_are_identifiers() {
        assert_eq!(
            lex("SELECT FROM where"),
            vec![
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
        assert_eq!(texts("SELECT from"), vec!["SELECT", "from", ""]);
    }

    #[test]
    fn test_booleans() {
        assert_eq!(
            lex("TRUE false True"),
            vec![
                TokenKind::True,
                TokenKind::False,
                TokenKind::True,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_quoted_identifiers() {
        assert_eq!(texts(r#""my table" "has""quotes""#), vec![
            "my table",
            "has\"quotes",
            ""
        ]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            texts("0 42 3.5 -7 1e10 2.5e-3"),
            vec!["0", "42", "3.5", "-7", "1e10", "2.5e-3", ""]
        );
        assert!(lex("1 2.5 -3").iter().take(3).all(|k| *k == TokenKind::Number));
    }

    #[test]
    fn test_string_literals() {
        let tokens: Vec<_> = Lexer::new("'hello' 'it''s' ''").collect();
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(tokens[1].text, "it's");
        assert_eq!(tokens[2].text, "");
    }

    #[test]
    fn test_operators_and_punctuation() {
        assert_eq!(
            lex("= != <> < <= > >= , ; ( ) *"),
            vec![
                TokenKind::Eq,
                TokenKind::Neq,
                TokenKind::Neq,
                TokenKind::Lt,
                TokenKind::LtEq,
                TokenKind::Gt,
                TokenKind::GtEq,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Asterisk,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_newlines_are_tokens() {
        assert_eq!(
            lex("a\nb"),
            vec![
                TokenKind::Identifier,
                TokenKind::Newline,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            lex("a -- comment\nb /* outer /* nested */ */ c"),
            vec![
                TokenKind::Identifier,
                TokenKind::Newline,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_positions() {
        let tokens: Vec<_> = Lexer::new("SELECT *\n  FROM users").collect();
        let positions: Vec<_> = tokens.iter().map(|t| (t.line, t.column)).collect();
        assert_eq!(positions, vec![(1, 1), (1, 8), (1, 9), (2, 3), (2, 8), (2, 13)]);
    }

    #[test]
    fn test_errors() {
        let tokens: Vec<_> = Lexer::new("a @ 'open").collect();
        assert_eq!(tokens[1].kind, TokenKind::Error);
        assert_eq!(tokens[1].text, "unexpected character '@'");
        assert_eq!(tokens[2].kind, TokenKind::Error);
        assert_eq!(tokens[2].text, "unterminated string literal");
        assert!(tokens[3].is_eof());

        let tokens: Vec<_> = Lexer::new("1e").collect();
        assert_eq!(tokens[0].text, "invalid number literal");

        let tokens: Vec<_> = Lexer::new("/* open").collect();
        assert_eq!(tokens[0].text, "unterminated block comment");
    }

    #[test]
    fn test_non_ascii_characters() {
        let tokens = Lexer::new("a =é").tokenize();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Identifier, TokenKind::Eq, TokenKind::Error, TokenKind::Eof]
        );
        assert_eq!(tokens[2].text, "unexpected character 'é'");
        assert_eq!((tokens[2].line, tokens[2].column), (1, 4));

        let tokens = Lexer::new("€").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Error);
        assert_eq!(tokens[0].text, "unexpected character '€'");

        assert_eq!(lex("<€"), vec![TokenKind::Lt, TokenKind::Error, TokenKind::Eof]);
    }

    #[test]
    fn test_tokenize_ends_with_eof() {
        let tokens = Lexer::new("SELECT * FROM t;").tokenize();
        assert_eq!(tokens.len(), 6);
        assert!(tokens.last().is_some_and(Token::is_eof));
        assert_eq!(tokens.iter().filter(|t| t.is_eof()).count(), 1);

        let tokens = Lexer::new("").tokenize();
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
    }

    #[test]
    fn test_iterator_stops_after_eof() {
        let mut lexer = Lexer::new("SELECT");
        assert!(lexer.next().is_some()); // SELECT
        assert!(lexer.next().is_some()); // EOF
        assert!(lexer.next().is_none());
        assert!(lexer.next().is_none());
    }
}
