//! Evaluator errors.

use crate::backend::BackendError;

use super::extension::ExtensionError;

/// Errors that abort an evaluation run.
#[derive(Debug)]
pub enum EvalError {
    /// The backend rejected a SELECT or INSERT. Passed through unchanged.
    Backend(BackendError),

    /// A `before_visit` or `after_visit` hook failed.
    Extension(ExtensionError),

    /// A WHERE expression did not evaluate to a condition.
    InvalidCondition { found: String },

    /// An INSERT value is not a scalar.
    InvalidValue { found: String },
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::Backend(e) => write!(f, "{e}"),
            EvalError::Extension(e) => write!(f, "{e}"),
            EvalError::InvalidCondition { found } => {
                write!(f, "WHERE clause must be a condition, found {found}")
            }
            EvalError::InvalidValue { found } => {
                write!(f, "INSERT value must be a scalar, found {found}")
            }
        }
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EvalError::Backend(e) => Some(e),
            EvalError::Extension(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BackendError> for EvalError {
    fn from(e: BackendError) -> Self {
        EvalError::Backend(e)
    }
}

impl From<ExtensionError> for EvalError {
    fn from(e: ExtensionError) -> Self {
        EvalError::Extension(e)
    }
}
