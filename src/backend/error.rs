//! Backend errors.

/// Errors raised by a [`Backend`](super::Backend).
///
/// The evaluator treats these as opaque and hands them back to the caller
/// of `run` unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendError {
    /// The table does not exist.
    TableNotFound { name: String },

    /// An explicit INSERT column does not exist in the table.
    ColumnNotFound { table: String, column: String },

    /// An explicit INSERT column list names the same column twice.
    DuplicateColumn { column: String },

    /// The number of values does not match the number of target columns.
    ArityMismatch {
        /// Number of target columns.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },

    /// Any other backend-specific failure.
    Other(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::TableNotFound { name } => {
                write!(f, "table \"{name}\" does not exist")
            }
            BackendError::ColumnNotFound { table, column } => {
                write!(f, "column \"{column}\" of table \"{table}\" does not exist")
            }
            BackendError::DuplicateColumn { column } => {
                write!(f, "column \"{column}\" specified more than once")
            }
            BackendError::ArityMismatch { expected, actual } => {
                write!(
                    f,
                    "value count does not match column count: expected {expected}, got {actual}"
                )
            }
            BackendError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for BackendError {}
