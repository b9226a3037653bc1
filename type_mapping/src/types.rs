//! Column value definitions
//!
//! This module provides the SQL value model used for statement arguments
//! and row contents, plus the column kinds that drive conversions.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::errors::MappingError;

/// Storage class of a column, independent of dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    Integer,
    Real,
    Boolean,
    Text,
    /// Stored normalized to UTC
    Timestamp,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Integer => "integer",
            ColumnKind::Real => "real",
            ColumnKind::Boolean => "boolean",
            ColumnKind::Text => "text",
            ColumnKind::Timestamp => "timestamp",
        }
    }
}

/// A single statement argument or row cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            SqlValue::Null => "null",
            SqlValue::Integer(_) => "integer",
            SqlValue::Real(_) => "real",
            SqlValue::Boolean(_) => "boolean",
            SqlValue::Text(_) => "text",
            SqlValue::Timestamp(_) => "timestamp",
        }
    }

    /// Convert a serialized record field into the value stored for a column of `kind`
    pub fn from_json(kind: ColumnKind, column: &str, value: &Value) -> Result<Self, MappingError> {
        let mismatch = || MappingError::TypeMismatch {
            column: column.to_string(),
            expected: kind.as_str(),
            found: json_kind(value),
        };

        if value.is_null() {
            return Ok(SqlValue::Null);
        }

        match kind {
            ColumnKind::Integer => match value {
                Value::Number(n) => {
                    if let Some(i) = n.as_i64() {
                        Ok(SqlValue::Integer(i))
                    } else if n.as_u64().is_some() {
                        Err(MappingError::OutOfRange {
                            column: column.to_string(),
                            value: n.to_string(),
                        })
                    } else {
                        Err(mismatch())
                    }
                }
                Value::Bool(b) => Ok(SqlValue::Integer(i64::from(*b))),
                _ => Err(mismatch()),
            },
            ColumnKind::Real => value.as_f64().map(SqlValue::Real).ok_or_else(mismatch),
            ColumnKind::Boolean => value.as_bool().map(SqlValue::Boolean).ok_or_else(mismatch),
            ColumnKind::Text => value
                .as_str()
                .map(|s| SqlValue::Text(s.to_string()))
                .ok_or_else(mismatch),
            ColumnKind::Timestamp => {
                let text = value.as_str().ok_or_else(mismatch)?;
                DateTime::parse_from_rfc3339(text)
                    .map(|dt| SqlValue::Timestamp(dt.with_timezone(&Utc)))
                    .map_err(|source| MappingError::InvalidTimestamp {
                        column: column.to_string(),
                        value: text.to_string(),
                        source,
                    })
            }
        }
    }

    /// Convert a row cell back into the shape serde expects for the record field
    pub fn into_json(self) -> Value {
        match self {
            SqlValue::Null => Value::Null,
            SqlValue::Integer(i) => Value::from(i),
            SqlValue::Real(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            SqlValue::Boolean(b) => Value::Bool(b),
            SqlValue::Text(s) => Value::String(s),
            SqlValue::Timestamp(dt) => {
                Value::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => write!(f, "NULL"),
            SqlValue::Integer(i) => write!(f, "{}", i),
            SqlValue::Real(r) => write!(f, "{}", r),
            SqlValue::Boolean(b) => write!(f, "{}", b),
            SqlValue::Text(s) => write!(f, "'{}'", s),
            SqlValue::Timestamp(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

/// Convert basic Rust types to SqlValue
impl From<String> for SqlValue {
    fn from(val: String) -> Self {
        SqlValue::Text(val)
    }
}

impl From<&str> for SqlValue {
    fn from(val: &str) -> Self {
        SqlValue::Text(val.to_string())
    }
}

impl From<i32> for SqlValue {
    fn from(val: i32) -> Self {
        SqlValue::Integer(i64::from(val))
    }
}

impl From<i64> for SqlValue {
    fn from(val: i64) -> Self {
        SqlValue::Integer(val)
    }
}

impl From<u32> for SqlValue {
    fn from(val: u32) -> Self {
        SqlValue::Integer(i64::from(val))
    }
}

impl From<u64> for SqlValue {
    fn from(val: u64) -> Self {
        // Note: generated keys never exceed i64::MAX, larger values saturate
        SqlValue::Integer(i64::try_from(val).unwrap_or(i64::MAX))
    }
}

impl From<f64> for SqlValue {
    fn from(val: f64) -> Self {
        SqlValue::Real(val)
    }
}

impl From<bool> for SqlValue {
    fn from(val: bool) -> Self {
        SqlValue::Boolean(val)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(val: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(val)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(val: Option<T>) -> Self {
        val.map(Into::into).unwrap_or(SqlValue::Null)
    }
}
