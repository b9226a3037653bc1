//! SQLite store

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, Sqlite};
use type_mapping::{ColumnKind, SqlValue};

use super::{ExecResult, RawStore};
use crate::dialect::Dialect;
use crate::schema::Column;

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect to `dsn`, which is either a `sqlite:` URL or a bare file
    /// path (created when missing). `:memory:` opens a private in-memory
    /// database.
    pub async fn connect(dsn: &str, acquire_timeout: Duration) -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            // An in-memory database lives only as long as its connection
            .idle_timeout(None)
            .max_lifetime(None)
            .acquire_timeout(acquire_timeout)
            .connect_with(Self::connect_options(dsn)?)
            .await?;

        crate::debug_log!("[SQLITE] Connected to {}", dsn);
        Ok(Self { pool })
    }

    fn connect_options(dsn: &str) -> Result<SqliteConnectOptions, sqlx::Error> {
        let dsn = dsn.trim();
        if dsn == ":memory:" {
            SqliteConnectOptions::from_str("sqlite::memory:")
        } else if dsn.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(dsn)
        } else {
            Ok(SqliteConnectOptions::new()
                .filename(dsn)
                .create_if_missing(true))
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn bind_all<'q>(mut query: SqliteQuery<'q>, args: &[SqlValue]) -> SqliteQuery<'q> {
        for value in args {
            query = bind_sql_value!(query, value);
        }
        query
    }

    fn decode_row(row: &SqliteRow, columns: &[Column]) -> Result<Vec<SqlValue>, sqlx::Error> {
        columns
            .iter()
            .map(|column| decode_sql_value!(row, column))
            .collect()
    }
}

#[async_trait]
impl RawStore for SqliteStore {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    async fn execute(&self, sql: &str, args: &[SqlValue]) -> Result<ExecResult, sqlx::Error> {
        crate::trace_log!("[SQLITE] {} ({} args)", sql, args.len());
        let result = Self::bind_all(sqlx::query(sql), args)
            .execute(&self.pool)
            .await?;

        Ok(ExecResult {
            rows_affected: result.rows_affected(),
            last_insert_id: u64::try_from(result.last_insert_rowid())
                .ok()
                .filter(|id| *id > 0),
        })
    }

    async fn fetch(
        &self,
        sql: &str,
        args: &[SqlValue],
        columns: &[Column],
    ) -> Result<Vec<Vec<SqlValue>>, sqlx::Error> {
        crate::trace_log!("[SQLITE] {} ({} args)", sql, args.len());
        let rows = Self::bind_all(sqlx::query(sql), args)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| Self::decode_row(row, columns))
            .collect()
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn run_migrations(&self, migrator: &Migrator) -> Result<(), MigrateError> {
        migrator.run(&self.pool).await
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
