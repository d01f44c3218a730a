//! Runtime values produced by the evaluator.
//!
//! [`Scalar`] is the closed set of literal values, [`Row`] an ordered mapping
//! from column name to scalar, and [`Value`] everything a node visit can yield.

use std::cmp::Ordering;
use std::fmt;

/// A literal value stored in rows and compared by conditions.
#[derive(Debug, Clone)]
pub enum Scalar {
    /// Double-precision number.
    Number(f64),
    /// Text.
    String(String),
    /// Boolean (true/false).
    Boolean(bool),
}

impl Scalar {
    /// Returns the type name used in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Scalar::Number(_) => "number",
            Scalar::String(_) => "string",
            Scalar::Boolean(_) => "boolean",
        }
    }
}

/// Strict equality: values of different types are never equal.
impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Number(a), Scalar::Number(b)) => a == b,
            (Scalar::String(a), Scalar::String(b)) => a == b,
            (Scalar::Boolean(a), Scalar::Boolean(b)) => a == b,
            _ => false,
        }
    }
}

/// Only values of the same type are ordered; NaN is unordered.
impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Scalar::Number(a), Scalar::Number(b)) => a.partial_cmp(b),
            (Scalar::String(a), Scalar::String(b)) => Some(a.cmp(b)),
            (Scalar::Boolean(a), Scalar::Boolean(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Scalar::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Number(f64::from(n))
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Boolean(b)
    }
}

/// A data row: column names mapped to scalars, in column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    columns: Vec<(String, Scalar)>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a column by name.
    pub fn get(&self, column: &str) -> Option<&Scalar> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Sets a column, keeping its position if it already exists.
    pub fn set(&mut self, column: impl Into<String>, value: Scalar) {
        let column = column.into();
        match self.columns.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => *slot = value,
            None => self.columns.push((column, value)),
        }
    }

    /// Iterates over `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns a row with only the requested columns, in request order.
    ///
    /// Columns the row does not have are skipped.
    pub fn project(&self, columns: &[String]) -> Row {
        let columns = columns
            .iter()
            .filter_map(|name| self.get(name).map(|v| (name.clone(), v.clone())))
            .collect();
        Row { columns }
    }
}

impl<K: Into<String>, V: Into<Scalar>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.set(k, v.into());
        }
        row
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        write!(f, "}}")
    }
}

/// A predicate built from a `BinaryOp` node: `{left, op, right}`.
///
/// For comparisons `left` is a column name and `right` a literal; for
/// `and`/`or` both sides are nested conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub left: Value,
    pub op: String,
    pub right: Value,
}

impl Condition {
    /// Creates a condition.
    pub fn new(left: impl Into<Value>, op: impl Into<String>, right: impl Into<Value>) -> Self {
        Self {
            left: left.into(),
            op: op.into(),
            right: right.into(),
        }
    }

    /// Shorthand for a `column <op> literal` comparison.
    pub fn compare(column: &str, op: &str, value: impl Into<Scalar>) -> Self {
        Self::new(Value::Name(column.to_string()), op, Value::Scalar(value.into()))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.op, self.right)
    }
}

/// The result of visiting a node.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Nothing: an absent subtree, or the result of an INSERT.
    #[default]
    Null,
    /// Literal value.
    Scalar(Scalar),
    /// Bare name produced by an identifier.
    Name(String),
    /// Names produced by a list node.
    List(Vec<String>),
    /// Values produced by an array node.
    Array(Vec<Value>),
    /// Predicate produced by a binary operation.
    Condition(Box<Condition>),
    /// Rows returned by a SELECT.
    Rows(Vec<Row>),
}

impl Value {
    /// Returns the variant name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Scalar(s) => s.type_name(),
            Value::Name(_) => "name",
            Value::List(_) => "list",
            Value::Array(_) => "array",
            Value::Condition(_) => "condition",
            Value::Rows(_) => "rows",
        }
    }

    /// Returns the rows of a SELECT result.
    pub fn as_rows(&self) -> Option<&[Row]> {
        match self {
            Value::Rows(rows) => Some(rows),
            _ => None,
        }
    }

    /// Converts this value into a scalar suitable for storage.
    ///
    /// Names are taken literally as strings.
    pub fn into_scalar(self) -> Option<Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            Value::Name(n) => Some(Scalar::String(n)),
            _ => None,
        }
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<Condition> for Value {
    fn from(c: Condition) -> Self {
        Value::Condition(Box::new(c))
    }
}

impl From<Vec<Row>> for Value {
    fn from(rows: Vec<Row>) -> Self {
        Value::Rows(rows)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Scalar(s) => write!(f, "{s}"),
            Value::Name(n) => write!(f, "{n}"),
            Value::List(items) => write!(f, "[{}]", items.join(", ")),
            Value::Array(values) => {
                write!(f, "(")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, ")")
            }
            Value::Condition(c) => write!(f, "{c}"),
            Value::Rows(rows) => {
                write!(f, "[")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{row}")?;
                }
                write!(f, "]")
            }
        }
    }
}
