//! SQL generation
//!
//! Statements are assembled from a [`TableSchema`] whose identifiers were
//! validated at registration; values always travel as bind parameters.

use crate::dialect::Dialect;
use crate::schema::{Column, TableSchema};

pub struct SqlGenerator;

impl SqlGenerator {
    /// `INSERT INTO t (c1, c2) VALUES (?, ?)` for the given columns
    pub fn insert(dialect: Dialect, schema: &TableSchema, columns: &[&Column]) -> String {
        let names = columns
            .iter()
            .map(|c| dialect.quote_identifier(c.name))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = vec![dialect.placeholder(); columns.len()].join(", ");

        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            dialect.quote_identifier(schema.table()),
            names,
            placeholders
        )
    }

    /// `UPDATE t SET data = ? ... WHERE key = ? ...`
    ///
    /// Arguments bind data columns first, then key columns, both in
    /// declaration order.
    pub fn update(dialect: Dialect, schema: &TableSchema) -> String {
        let assignments = schema
            .data_columns()
            .map(|c| format!("{} = {}", dialect.quote_identifier(c.name), dialect.placeholder()))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "UPDATE {} SET {} WHERE {}",
            dialect.quote_identifier(schema.table()),
            assignments,
            Self::key_predicate(dialect, schema)
        )
    }

    /// `SELECT c1, c2 FROM t [WHERE predicate]` listing every mapped column
    pub fn select(dialect: Dialect, schema: &TableSchema, predicate: Option<&str>) -> String {
        let columns = schema
            .columns()
            .iter()
            .map(|c| dialect.quote_identifier(c.name))
            .collect::<Vec<_>>()
            .join(", ");

        let mut sql = format!(
            "SELECT {} FROM {}",
            columns,
            dialect.quote_identifier(schema.table())
        );
        if let Some(predicate) = predicate.map(Self::strip_where).filter(|p| !p.is_empty()) {
            sql.push_str(" WHERE ");
            sql.push_str(predicate);
        }
        sql
    }

    /// Equality on every key column, joined with AND
    pub fn key_predicate(dialect: Dialect, schema: &TableSchema) -> String {
        schema
            .key_columns()
            .map(|c| format!("{} = {}", dialect.quote_identifier(c.name), dialect.placeholder()))
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    /// Extend a caller predicate so rows in the deleted state are skipped.
    ///
    /// The caller's predicate is parenthesized so an `OR` inside it cannot
    /// escape the filter. The status code is bound as the last argument.
    pub fn visible_predicate(dialect: Dialect, status_column: &str, predicate: &str) -> String {
        let filter = format!(
            "{} <> {}",
            dialect.quote_identifier(status_column),
            dialect.placeholder()
        );
        let predicate = Self::strip_where(predicate);
        if predicate.is_empty() {
            filter
        } else {
            format!("({}) AND {}", predicate, filter)
        }
    }

    /// Accept predicates written with or without a leading `WHERE`
    fn strip_where(predicate: &str) -> &str {
        let trimmed = predicate.trim();
        let bytes = trimmed.as_bytes();
        let keyword = bytes.len() > 5
            && bytes[..5].eq_ignore_ascii_case(b"where")
            && bytes[5].is_ascii_whitespace();
        if keyword {
            trimmed[5..].trim_start()
        } else {
            trimmed
        }
    }
}
