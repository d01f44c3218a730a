//! Row filtering with condition values.
//!
//! [`evaluate`] interprets a [`Condition`] built by the evaluator against one
//! [`Row`]. It is pure and total: unknown operators and malformed operands
//! fail closed to `false` instead of erroring.

use std::cmp::Ordering;

use super::value::{Condition, Row, Scalar, Value};

/// Evaluates a condition against a row.
///
/// Rules, first match wins:
/// 1. no condition: `true`
/// 2. `and`: both sides must hold
/// 3. `or`: either side must hold
/// 4. `=`, `!=`, `<`, `<=`, `>`, `>=`: compare `row[left]` with `right`
/// 5. anything else: `false`
pub fn evaluate(condition: Option<&Condition>, row: &Row) -> bool {
    let Some(condition) = condition else {
        return true;
    };

    match condition.op.as_str() {
        "and" => holds(&condition.left, row) && holds(&condition.right, row),
        "or" => holds(&condition.left, row) || holds(&condition.right, row),
        op @ ("=" | "!=" | "<" | "<=" | ">" | ">=") => {
            compare(lookup(&condition.left, row), op, &condition.right)
        }
        _ => false,
    }
}

/// Evaluates one side of `and`/`or`.
///
/// An absent operand is no filter; any non-condition operand fails closed.
fn holds(operand: &Value, row: &Row) -> bool {
    match operand {
        Value::Null => true,
        Value::Condition(c) => evaluate(Some(c.as_ref()), row),
        _ => false,
    }
}

/// Resolves the left side of a comparison to the row's value, if any.
fn lookup<'r>(left: &Value, row: &'r Row) -> Option<&'r Scalar> {
    match left {
        Value::Name(column) => row.get(column),
        _ => None,
    }
}

/// Native strict comparison without coercion.
///
/// A missing column or a non-scalar right side is unequal to everything and
/// unordered.
fn compare(actual: Option<&Scalar>, op: &str, expected: &Value) -> bool {
    let expected = match expected {
        Value::Scalar(s) => Some(s.clone()),
        Value::Name(n) => Some(Scalar::String(n.clone())),
        _ => None,
    };

    let (Some(actual), Some(expected)) = (actual, expected.as_ref()) else {
        return op == "!=";
    };

    match op {
        "=" => actual == expected,
        "!=" => actual != expected,
        _ => {
            let Some(ordering) = actual.partial_cmp(expected) else {
                return false;
            };
            match op {
                "<" => ordering == Ordering::Less,
                "<=" => ordering != Ordering::Greater,
                ">" => ordering == Ordering::Greater,
                ">=" => ordering != Ordering::Less,
                _ => false,
            }
        }
    }
}
