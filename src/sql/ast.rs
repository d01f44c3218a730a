//! Abstract Syntax Tree (AST) for DSQL programs.
//!
//! This module defines the data structures that represent parsed statements.
//! The AST is produced by the parser and never mutated afterwards; the
//! evaluator walks it through the borrowed [`NodeRef`] view.

use std::fmt;

/// Root of a parsed program: statements in execution order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceElements {
    pub statements: Vec<Statement>,
}

/// A top-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// SELECT statement.
    Select(Box<Select>),
    /// INSERT statement.
    Insert(Box<Insert>),
}

/// SELECT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    /// Table name.
    pub table: String,
    /// Projected columns. `SELECT *` is an empty list.
    pub columns: List,
    /// WHERE expression.
    pub condition: Option<Expr>,
    /// GROUP BY columns.
    pub group_by: Option<List>,
}

/// INSERT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    /// Table name.
    pub table: String,
    /// Explicit column list, if one was written.
    pub columns: Option<List>,
    /// The `VALUES (...)` array.
    pub values: Expr,
}

/// An ordered list of names (projection or GROUP BY columns).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct List {
    pub items: Vec<String>,
}

impl List {
    /// Creates a list from anything yielding names.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Column reference.
    Identifier(String),
    /// Numeric literal.
    Number(f64),
    /// String literal.
    String(String),
    /// Boolean literal.
    Boolean(bool),
    /// Parenthesized value list.
    Array(Vec<Expr>),
    /// Logical or comparison operation.
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
}

impl Expr {
    /// Builds a binary operation node.
    pub fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Self {
        Expr::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }
}

/// Binary operators. Logical and comparison operators share one node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Or,
    And,
    Eq,
    Neq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl BinaryOperator {
    /// Returns the normalized operator text carried by condition values.
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::Or => "or",
            BinaryOperator::And => "and",
            BinaryOperator::Eq => "=",
            BinaryOperator::Neq => "!=",
            BinaryOperator::Lt => "<",
            BinaryOperator::LtEq => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::GtEq => ">=",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowed view over any AST node.
///
/// This is what the evaluator dispatches on and what extension hooks receive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    SourceElements(&'a SourceElements),
    Select(&'a Select),
    Insert(&'a Insert),
    List(&'a List),
    Expr(&'a Expr),
}

impl<'a> NodeRef<'a> {
    /// Returns the node kind name (`"Select"`, `"BinaryOp"`, ...).
    pub fn kind(&self) -> &'static str {
        match self {
            NodeRef::SourceElements(_) => "SourceElements",
            NodeRef::Select(_) => "Select",
            NodeRef::Insert(_) => "Insert",
            NodeRef::List(_) => "List",
            NodeRef::Expr(Expr::Identifier(_)) => "Identifier",
            NodeRef::Expr(Expr::Number(_)) => "Number",
            NodeRef::Expr(Expr::String(_)) => "String",
            NodeRef::Expr(Expr::Boolean(_)) => "Boolean",
            NodeRef::Expr(Expr::Array(_)) => "Array",
            NodeRef::Expr(Expr::BinaryOp { .. }) => "BinaryOp",
        }
    }
}

impl<'a> From<&'a Statement> for NodeRef<'a> {
    fn from(stmt: &'a Statement) -> Self {
        match stmt {
            Statement::Select(s) => NodeRef::Select(s),
            Statement::Insert(i) => NodeRef::Insert(i),
        }
    }
}

impl<'a> From<&'a Expr> for NodeRef<'a> {
    fn from(expr: &'a Expr) -> Self {
        NodeRef::Expr(expr)
    }
}

impl<'a> From<&'a SourceElements> for NodeRef<'a> {
    fn from(root: &'a SourceElements) -> Self {
        NodeRef::SourceElements(root)
    }
}

impl<'a> From<&'a List> for NodeRef<'a> {
    fn from(list: &'a List) -> Self {
        NodeRef::List(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kind() {
        let expr = Expr::binary(
            Expr::Identifier("a".into()),
            BinaryOperator::Eq,
            Expr::Number(1.0),
        );
        assert_eq!(NodeRef::from(&expr).kind(), "BinaryOp");
        assert_eq!(NodeRef::Expr(&Expr::Array(vec![])).kind(), "Array");

        let list = List::new(["a", "b"]);
        assert_eq!(NodeRef::from(&list).kind(), "List");
    }

    #[test]
    fn test_operator_text() {
        assert_eq!(BinaryOperator::And.as_str(), "and");
        assert_eq!(BinaryOperator::Neq.to_string(), "!=");
    }
}
