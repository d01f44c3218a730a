//! Backend trait definition.

use std::future::Future;

use crate::backend::BackendError;
use crate::eval::{Condition, Row, Scalar};

/// Data access interface consumed by the evaluator.
///
/// The evaluator never touches data itself: every SELECT and INSERT becomes
/// one call on this trait. Implementations include:
/// - `MemoryBackend`: named in-memory tables
///
/// # Design Decisions
///
/// 1. **Async trait**: Uses `async fn` in impls (Rust 1.75+); every call is
///    awaited before the next statement starts, so an INSERT is visible to the
///    SELECTs that follow it.
///
/// 2. **Opaque errors**: The evaluator propagates [`BackendError`] unchanged.
///    It performs no retries and no rollback.
///
/// 3. **Filtering is the backend's job**: `select` receives the condition
///    value and applies it with [`crate::eval::evaluate`].
pub trait Backend: Send + Sync {
    /// Returns the rows of `table` that satisfy `condition`.
    ///
    /// # Arguments
    ///
    /// * `table` - Table name
    /// * `columns` - Projection; empty means every column
    /// * `condition` - Row filter, `None` for no filter
    /// * `group_by` - Grouping columns, if the statement has a GROUP BY
    ///
    /// # Errors
    ///
    /// Backend-defined, e.g. `BackendError::TableNotFound`.
    fn select(
        &self,
        table: &str,
        columns: &[String],
        condition: Option<&Condition>,
        group_by: Option<&[String]>,
    ) -> impl Future<Output = Result<Vec<Row>, BackendError>> + Send;

    /// Appends one row to `table`.
    ///
    /// # Arguments
    ///
    /// * `table` - Table name
    /// * `columns` - Target columns; empty means the table's schema order
    /// * `values` - One value per target column
    ///
    /// # Errors
    ///
    /// Backend-defined, e.g. `BackendError::ArityMismatch`.
    fn insert(
        &self,
        table: &str,
        columns: &[String],
        values: &[Scalar],
    ) -> impl Future<Output = Result<(), BackendError>> + Send;
}

impl<B: Backend> Backend for std::sync::Arc<B> {
    fn select(
        &self,
        table: &str,
        columns: &[String],
        condition: Option<&Condition>,
        group_by: Option<&[String]>,
    ) -> impl Future<Output = Result<Vec<Row>, BackendError>> + Send {
        (**self).select(table, columns, condition, group_by)
    }

    fn insert(
        &self,
        table: &str,
        columns: &[String],
        values: &[Scalar],
    ) -> impl Future<Output = Result<(), BackendError>> + Send {
        (**self).insert(table, columns, values)
    }
}
