//! DSQL parser using recursive descent.
//!
//! The [`Parser`] converts a sequence of tokens into a [`SourceElements`] tree.
//! Statements are handled here; the expression precedence ladder lives in
//! `expr.rs`.

use super::ast::*;
use super::error::{ParseError, Position};
use super::lexer::Lexer;
use super::token::{Token, TokenKind};

/// Recursive descent parser with one token of lookahead.
///
/// Grammar:
///
/// ```text
/// program     := (statement ';')+ EOF
/// statement   := select | insert
/// select      := 'SELECT' ('*' | column_list) 'FROM' identifier
///                ('WHERE' expression)? ('GROUP' 'BY' column_list)?
/// insert      := 'INSERT' 'INTO' identifier ('(' column_list ')')? 'VALUES' array
/// column_list := identifier (',' identifier)*
/// ```
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Creates a parser over an already tokenized input.
    ///
    /// Newline tokens are dropped here and never reach the grammar.
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        let tokens = tokens
            .into_iter()
            .filter(|t| t.kind != TokenKind::Newline)
            .collect();
        Self { tokens, pos: 0 }
    }

    /// Creates a parser for the given SQL text.
    pub fn from_sql(input: &str) -> Self {
        Self::new(Lexer::new(input))
    }

    /// Parses the whole token sequence.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] at the first token that violates the grammar.
    /// No partial tree is ever returned.
    pub fn parse(&mut self) -> Result<SourceElements, ParseError> {
        let mut statements = vec![self.parse_source_element()?];
        while !self.is_eof() {
            statements.push(self.parse_source_element()?);
        }

        log::trace!("parsed {} statement(s)", statements.len());
        Ok(SourceElements { statements })
    }

    /// Parses a statement and its mandatory terminator.
    fn parse_source_element(&mut self) -> Result<Statement, ParseError> {
        let stmt = self.parse_statement()?;
        self.expect_token(TokenKind::Semicolon)?;
        Ok(stmt)
    }

    /// Parses a single statement.
    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        if self.check_keyword("SELECT") {
            let select = self.parse_select_stmt()?;
            return Ok(Statement::Select(Box::new(select)));
        }

        if self.check_keyword("INSERT") {
            let insert = self.parse_insert_stmt()?;
            return Ok(Statement::Insert(Box::new(insert)));
        }

        Err(self.unexpected("statement"))
    }

    /// Parses a SELECT statement.
    fn parse_select_stmt(&mut self) -> Result<Select, ParseError> {
        self.expect_keyword("SELECT")?;

        let columns = if self.consume_token(TokenKind::Asterisk) {
            List::default()
        } else {
            self.parse_column_list()?
        };

        self.expect_keyword("FROM")?;
        let table = self.expect_identifier("table name")?;

        let condition = if self.consume_keyword("WHERE") {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let group_by = if self.consume_keyword("GROUP") {
            self.expect_keyword("BY")?;
            Some(self.parse_column_list()?)
        } else {
            None
        };

        Ok(Select {
            table,
            columns,
            condition,
            group_by,
        })
    }

    /// Parses an INSERT statement.
    fn parse_insert_stmt(&mut self) -> Result<Insert, ParseError> {
        self.expect_keyword("INSERT")?;
        self.expect_keyword("INTO")?;
        let table = self.expect_identifier("table name")?;

        // Optional column list
        let columns = if self.consume_token(TokenKind::LParen) {
            let columns = self.parse_column_list()?;
            self.expect_token(TokenKind::RParen)?;
            Some(columns)
        } else {
            None
        };

        self.expect_keyword("VALUES")?;
        let values = self.parse_array()?;

        Ok(Insert {
            table,
            columns,
            values,
        })
    }

    /// Parses a comma-separated list of identifiers.
    fn parse_column_list(&mut self) -> Result<List, ParseError> {
        let mut items = vec![self.expect_identifier("column name")?];
        while self.consume_token(TokenKind::Comma) {
            items.push(self.expect_identifier("column name")?);
        }
        Ok(List { items })
    }

    // ==================== Helper methods ====================

    /// Returns true if at end of tokens.
    pub(crate) fn is_eof(&self) -> bool {
        self.peek().is_none_or(|t| t.is_eof())
    }

    /// Peeks at the current token.
    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Peeks at the kind of the current token.
    pub(crate) fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    /// Advances to the next token.
    pub(crate) fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Returns the position of the current token.
    ///
    /// A stream without an end marker reports the position of its last token.
    pub(crate) fn current_position(&self) -> Position {
        self.peek()
            .or_else(|| self.tokens.last())
            .map_or(Position::new(1, 1), Token::position)
    }

    /// Returns a display name for the current token.
    pub(crate) fn current_token_name(&self) -> String {
        self.peek()
            .map_or("end of input".to_string(), Token::display_name)
    }

    /// Builds the error for an unexpected current token.
    ///
    /// Lexical error tokens surface their own message instead.
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) if token.kind == TokenKind::Error => {
                ParseError::new(token.text.clone(), token.position())
            }
            _ => ParseError::unexpected_token(
                expected,
                &self.current_token_name(),
                self.current_position(),
            ),
        }
    }

    /// Checks if the current token is the given keyword.
    pub(crate) fn check_keyword(&self, keyword: &str) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(keyword))
    }

    /// Consumes the current token if it's the given keyword.
    pub(crate) fn consume_keyword(&mut self, keyword: &str) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects a specific keyword, returning an error if not found.
    pub(crate) fn expect_keyword(&mut self, keyword: &str) -> Result<(), ParseError> {
        if self.consume_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("keyword '{keyword}'")))
        }
    }

    /// Checks if the current token has the given kind.
    pub(crate) fn check_token(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Consumes the current token if it has the given kind.
    pub(crate) fn consume_token(&mut self, kind: TokenKind) -> bool {
        if self.check_token(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects a token of the given kind, returning an error if not found.
    pub(crate) fn expect_token(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.consume_token(kind) {
            Ok(())
        } else {
            Err(self.unexpected(kind.display_name()))
        }
    }

    /// Expects an identifier, returning its text.
    pub(crate) fn expect_identifier(&mut self, what: &str) -> Result<String, ParseError> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::Identifier => {
                let name = token.text.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected(what)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(sql: &str) -> Result<SourceElements, ParseError> {
        Parser::from_sql(sql).parse()
    }

    fn parse_one(sql: &str) -> Statement {
        let mut program = parse(sql).unwrap();
        assert_eq!(program.statements.len(), 1);
        program.statements.remove(0)
    }

    #[test]
    fn test_select_wildcard() {
        match parse_one("SELECT * FROM t;") {
            Statement::Select(s) => {
                assert_eq!(s.table, "t");
                assert!(s.columns.is_empty());
                assert!(s.condition.is_none());
                assert!(s.group_by.is_none());
            }
            _ => panic!("expected SELECT"),
        }
    }

    #[test]
    fn test_select_columns() {
        match parse_one("SELECT id, name FROM users;") {
            Statement::Select(s) => {
                assert_eq!(s.columns, List::new(["id", "name"]));
                assert_eq!(s.table, "users");
            }
            _ => panic!("expected SELECT"),
        }
    }

    #[test]
    fn test_select_where_and() {
        match parse_one("SELECT a, b FROM t WHERE a = 1 AND b != 2;") {
            Statement::Select(s) => {
                let expected = Expr::binary(
                    Expr::binary(
                        Expr::Identifier("a".into()),
                        BinaryOperator::Eq,
                        Expr::Number(1.0),
                    ),
                    BinaryOperator::And,
                    Expr::binary(
                        Expr::Identifier("b".into()),
                        BinaryOperator::Neq,
                        Expr::Number(2.0),
                    ),
                );
                assert_eq!(s.condition, Some(expected));
            }
            _ => panic!("expected SELECT"),
        }
    }

    #[test]
    fn test_select_group_by() {
        match parse_one("SELECT dept FROM emp GROUP BY dept, role;") {
            Statement::Select(s) => {
                assert_eq!(s.group_by, Some(List::new(["dept", "role"])));
            }
            _ => panic!("expected SELECT"),
        }
    }

    #[test]
    fn test_lowercase_keywords() {
        assert!(parse("select * from t where a = 1 group by a;").is_ok());
    }

    #[test]
    fn test_insert() {
        match parse_one("INSERT INTO t VALUES (1, 'x', TRUE);") {
            Statement::Insert(i) => {
                assert_eq!(i.table, "t");
                assert!(i.columns.is_none());
                assert_eq!(
                    i.values,
                    Expr::Array(vec![
                        Expr::Number(1.0),
                        Expr::String("x".into()),
                        Expr::Boolean(true),
                    ])
                );
            }
            _ => panic!("expected INSERT"),
        }
    }

    #[test]
    fn test_insert_with_columns() {
        match parse_one("INSERT INTO t (a, b) VALUES (1, 2);") {
            Statement::Insert(i) => {
                assert_eq!(i.columns, Some(List::new(["a", "b"])));
            }
            _ => panic!("expected INSERT"),
        }
    }

    #[test]
    fn test_insert_empty_values() {
        match parse_one("INSERT INTO t VALUES ();") {
            Statement::Insert(i) => assert_eq!(i.values, Expr::Array(vec![])),
            _ => panic!("expected INSERT"),
        }
    }

    #[test]
    fn test_statement_count_and_order() {
        let program = parse("SELECT * FROM a;\nINSERT INTO b VALUES (1);\nSELECT x FROM c;").unwrap();
        assert_eq!(program.statements.len(), 3);
        assert!(matches!(&program.statements[0], Statement::Select(s) if s.table == "a"));
        assert!(matches!(&program.statements[1], Statement::Insert(i) if i.table == "b"));
        assert!(matches!(&program.statements[2], Statement::Select(s) if s.table == "c"));
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse("SELECT * FROM t\nSELECT * FROM u;").unwrap_err();
        assert_eq!(err.position, Position::new(2, 1));
        assert!(err.message.contains("';'"));

        let err = parse("SELECT * FROM t").unwrap_err();
        assert!(err.message.contains("end of input"));
    }

    #[test]
    fn test_unknown_statement() {
        let err = parse("UPDATE t;").unwrap_err();
        assert_eq!(err.message, "expected statement, found identifier 'UPDATE'");
        assert_eq!(err.position, Position::new(1, 1));
    }

    #[test]
    fn test_empty_input() {
        let err = parse("").unwrap_err();
        assert!(err.message.contains("statement"));
        assert!(parse("\n\n").is_err());
    }

    #[test]
    fn test_double_semicolon() {
        assert!(parse("SELECT * FROM t;;").is_err());
    }

    #[test]
    fn test_missing_from() {
        let err = parse("SELECT a users;").unwrap_err();
        assert!(err.message.contains("keyword 'FROM'"));
        assert_eq!(err.position, Position::new(1, 10));
    }

    #[test]
    fn test_missing_table_name() {
        let err = parse("SELECT * FROM 42;").unwrap_err();
        assert_eq!(err.message, "expected table name, found number '42'");
    }

    #[test]
    fn test_group_without_by() {
        assert!(parse("SELECT * FROM t GROUP a;").is_err());
    }

    #[test]
    fn test_insert_requires_array() {
        let err = parse("INSERT INTO t VALUES 1;").unwrap_err();
        assert!(err.message.contains("'('"));
    }

    #[test]
    fn test_lexical_error_surfaces() {
        let err = parse("SELECT * FROM t WHERE a = 'open;").unwrap_err();
        assert_eq!(err.message, "unterminated string literal");
        assert_eq!(err.position, Position::new(1, 27));
    }

    #[test]
    fn test_non_ascii_is_parse_error() {
        let err = parse("SELECT * FROM t WHERE a =é;").unwrap_err();
        assert_eq!(err.message, "unexpected character 'é'");
        assert_eq!(err.position, Position::new(1, 26));

        let err = parse("SELECT * FROM t WHERE a = €;").unwrap_err();
        assert_eq!(err.message, "unexpected character '€'");
        assert_eq!(err.position, Position::new(1, 27));
    }

    #[test]
    fn test_newlines_ignored() {
        let program = parse("SELECT\n*\nFROM\nt\n;\n").unwrap();
        assert_eq!(program.statements.len(), 1);
    }
}
