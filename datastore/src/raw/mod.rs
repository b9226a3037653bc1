//! Raw store access
//!
//! A [`RawStore`] executes already-generated SQL against one physical
//! connection and knows nothing about record lifecycles. There is one
//! implementation per supported dialect.

use async_trait::async_trait;
use sqlx::migrate::{MigrateError, Migrator};
use type_mapping::SqlValue;

use crate::dialect::Dialect;
use crate::schema::Column;

// Shared argument binding for the dialect-specific query types
macro_rules! bind_sql_value {
    ($query:expr, $value:expr) => {
        match $value {
            SqlValue::Null => $query.bind(Option::<String>::None),
            SqlValue::Integer(i) => $query.bind(*i),
            SqlValue::Real(f) => $query.bind(*f),
            SqlValue::Boolean(b) => $query.bind(*b),
            SqlValue::Text(s) => $query.bind(s.clone()),
            SqlValue::Timestamp(dt) => $query.bind(*dt),
        }
    };
}

// Shared row decoding, driven by the declared column kind
macro_rules! decode_sql_value {
    ($row:expr, $column:expr) => {{
        let name = $column.name;
        match $column.kind {
            ColumnKind::Integer => $row.try_get::<Option<i64>, _>(name).map(SqlValue::from),
            ColumnKind::Real => $row.try_get::<Option<f64>, _>(name).map(SqlValue::from),
            ColumnKind::Boolean => $row.try_get::<Option<bool>, _>(name).map(SqlValue::from),
            ColumnKind::Text => $row.try_get::<Option<String>, _>(name).map(SqlValue::from),
            ColumnKind::Timestamp => $row
                .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name)
                .map(SqlValue::from),
        }
    }};
}

pub mod mysql;
pub mod sqlite;

pub use mysql::MySqlStore;
pub use sqlite::SqliteStore;

/// Outcome of a statement that returns no rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecResult {
    pub rows_affected: u64,
    /// Key generated by the statement, when the store reports one
    pub last_insert_id: Option<u64>,
}

/// Dialect-bound statement execution over a single connection
#[async_trait]
pub trait RawStore: Send + Sync + std::fmt::Debug {
    fn dialect(&self) -> Dialect;

    /// Run a statement that returns no rows
    async fn execute(&self, sql: &str, args: &[SqlValue]) -> Result<ExecResult, sqlx::Error>;

    /// Run a query and decode every row into one value per column, in
    /// the order `columns` lists them
    async fn fetch(
        &self,
        sql: &str,
        args: &[SqlValue],
        columns: &[Column],
    ) -> Result<Vec<Vec<SqlValue>>, sqlx::Error>;

    /// Validate that the connection is usable
    async fn ping(&self) -> Result<(), sqlx::Error>;

    async fn run_migrations(&self, migrator: &Migrator) -> Result<(), MigrateError>;

    async fn close(&self);
}

/// Open the store for `dialect`
pub async fn connect(
    dialect: Dialect,
    dsn: &str,
    acquire_timeout: std::time::Duration,
) -> Result<Box<dyn RawStore>, sqlx::Error> {
    Ok(match dialect {
        Dialect::Sqlite => Box::new(SqliteStore::connect(dsn, acquire_timeout).await?),
        Dialect::MySql => Box::new(MySqlStore::connect(dsn, acquire_timeout).await?),
    })
}
