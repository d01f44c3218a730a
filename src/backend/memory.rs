//! In-memory backend implementation.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::backend::{Backend, BackendError};
use crate::eval::{evaluate, Condition, Row, Scalar};

/// A named table: its column schema plus rows in insertion order.
#[derive(Debug, Clone, Default)]
struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

/// In-memory backend holding tables in a `HashMap`.
///
/// Uses `parking_lot::RwLock` so concurrent SELECTs only take a read lock.
/// No lock is held across an `.await`. Nothing is persistent: all data is
/// lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: RwLock<HashMap<String, Table>>,
}

impl MemoryBackend {
    /// Creates a backend with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates (or replaces) an empty table with the given column schema.
    pub fn create_table<I, S>(&self, name: &str, columns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let table = Table {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        };
        self.tables.write().insert(name.to_string(), table);
    }

    /// Builder form of [`create_table`](Self::create_table) that also loads rows.
    pub fn with_table<I, S>(self, name: &str, columns: I, rows: Vec<Row>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.create_table(name, columns);
        if let Some(table) = self.tables.write().get_mut(name) {
            table.rows = rows;
        }
        self
    }

    /// Returns a snapshot of every row in `table`.
    pub fn rows(&self, table: &str) -> Option<Vec<Row>> {
        self.tables.read().get(table).map(|t| t.rows.clone())
    }
}

impl Backend for MemoryBackend {
    async fn select(
        &self,
        table: &str,
        columns: &[String],
        condition: Option<&Condition>,
        group_by: Option<&[String]>,
    ) -> Result<Vec<Row>, BackendError> {
        let tables = self.tables.read();
        let data = tables.get(table).ok_or_else(|| BackendError::TableNotFound {
            name: table.to_string(),
        })?;

        let mut matched: Vec<&Row> = data
            .rows
            .iter()
            .filter(|row| evaluate(condition, row))
            .collect();

        if let Some(keys) = group_by.filter(|keys| !keys.is_empty()) {
            matched = first_of_each_group(matched, keys);
        }

        let result: Vec<Row> = if columns.is_empty() {
            matched.into_iter().cloned().collect()
        } else {
            matched.into_iter().map(|row| row.project(columns)).collect()
        };

        log::debug!("select from {table}: {} row(s)", result.len());
        Ok(result)
    }

    async fn insert(
        &self,
        table: &str,
        columns: &[String],
        values: &[Scalar],
    ) -> Result<(), BackendError> {
        let mut tables = self.tables.write();
        let data = tables
            .get_mut(table)
            .ok_or_else(|| BackendError::TableNotFound {
                name: table.to_string(),
            })?;

        let targets = if columns.is_empty() {
            data.columns.clone()
        } else {
            if let Some(unknown) = columns.iter().find(|c| !data.columns.contains(c)) {
                return Err(BackendError::ColumnNotFound {
                    table: table.to_string(),
                    column: unknown.clone(),
                });
            }
            if let Some(duplicate) = columns
                .iter()
                .enumerate()
                .find_map(|(i, c)| columns[..i].contains(c).then_some(c))
            {
                return Err(BackendError::DuplicateColumn {
                    column: duplicate.clone(),
                });
            }
            columns.to_vec()
        };

        if targets.len() != values.len() {
            return Err(BackendError::ArityMismatch {
                expected: targets.len(),
                actual: values.len(),
            });
        }

        let mut row = Row::new();
        for (column, value) in targets.into_iter().zip(values) {
            row.set(column, value.clone());
        }
        data.rows.push(row);

        log::debug!("insert into {table}: {} row(s) total", data.rows.len());
        Ok(())
    }
}

/// Keeps the first row of every distinct group key, in scan order.
fn first_of_each_group<'r>(rows: Vec<&'r Row>, keys: &[String]) -> Vec<&'r Row> {
    let mut seen: Vec<Vec<Option<&Scalar>>> = Vec::new();
    let mut groups = Vec::new();

    for row in rows {
        let key: Vec<Option<&Scalar>> = keys.iter().map(|k| row.get(k)).collect();
        if !seen.contains(&key) {
            seen.push(key);
            groups.push(row);
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, age: i32, password: &str) -> Row {
        [
            ("name", Scalar::from(name)),
            ("age", Scalar::from(age)),
            ("password", Scalar::from(password)),
        ]
        .into_iter()
        .collect()
    }

    fn backend() -> MemoryBackend {
        MemoryBackend::new().with_table(
            "user",
            ["name", "age", "password"],
            vec![
                user("brian", 24, "secret1"),
                user("kithinji", 25, "secret2"),
                user("mutwiri", 26, "secret3"),
            ],
        )
    }

    #[tokio::test]
    async fn test_select_all() {
        let rows = backend().select("user", &[], None, None).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], user("brian", 24, "secret1"));
    }

    #[tokio::test]
    async fn test_select_filter_and_project() {
        let cond = Condition::compare("age", ">", 24);
        let rows = backend()
            .select("user", &["name".to_string()], Some(&cond), None)
            .await
            .unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.to_string()).collect();
        assert_eq!(names, vec!["{name: 'kithinji'}", "{name: 'mutwiri'}"]);
    }

    #[tokio::test]
    async fn test_select_unknown_table() {
        let err = backend().select("post", &[], None, None).await.unwrap_err();
        assert_eq!(err, BackendError::TableNotFound { name: "post".into() });
    }

    #[tokio::test]
    async fn test_select_group_by() {
        let backend = MemoryBackend::new().with_table(
            "emp",
            ["dept", "name"],
            vec![
                [("dept", "eng"), ("name", "a")].into_iter().collect(),
                [("dept", "ops"), ("name", "b")].into_iter().collect(),
                [("dept", "eng"), ("name", "c")].into_iter().collect(),
            ],
        );
        let group_by = vec!["dept".to_string()];
        let rows = backend
            .select("emp", &["dept".to_string()], None, Some(&group_by))
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("dept"), Some(&Scalar::from("eng")));
        assert_eq!(rows[1].get("dept"), Some(&Scalar::from("ops")));
    }

    #[tokio::test]
    async fn test_insert_schema_order() {
        let backend = backend();
        let values = [Scalar::from("yvonne"), Scalar::from(13), Scalar::from("fire")];
        backend.insert("user", &[], &values).await.unwrap();

        let rows = backend.rows("user").unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3], user("yvonne", 13, "fire"));
    }

    #[tokio::test]
    async fn test_insert_explicit_columns() {
        let backend = backend();
        let columns = ["age".to_string(), "name".to_string()];
        backend
            .insert("user", &columns, &[Scalar::from(30), Scalar::from("zed")])
            .await
            .unwrap();

        let rows = backend.rows("user").unwrap();
        assert_eq!(rows[3].to_string(), "{age: 30, name: 'zed'}");
    }

    #[tokio::test]
    async fn test_insert_errors() {
        let backend = backend();

        let err = backend
            .insert("user", &[], &[Scalar::from("only")])
            .await
            .unwrap_err();
        assert_eq!(err, BackendError::ArityMismatch { expected: 3, actual: 1 });

        let err = backend
            .insert("user", &["email".to_string()], &[Scalar::from("x")])
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::ColumnNotFound { .. }));

        let err = backend.insert("nope", &[], &[]).await.unwrap_err();
        assert!(matches!(err, BackendError::TableNotFound { .. }));

        assert_eq!(backend.rows("user").unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_insert_duplicate_column() {
        let backend = backend();
        let columns = ["name".to_string(), "name".to_string()];
        let err = backend
            .insert("user", &columns, &[Scalar::from("a"), Scalar::from("b")])
            .await
            .unwrap_err();
        assert_eq!(err, BackendError::DuplicateColumn { column: "name".into() });
        assert_eq!(err.to_string(), "column \"name\" specified more than once");
        assert_eq!(backend.rows("user").unwrap().len(), 3);
    }
}
