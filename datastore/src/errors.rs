use thiserror::Error;
use type_mapping::MappingError;

use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum DataStoreError {
    #[error("Connection error for driver '{driver}': {source}")]
    Connection {
        driver: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Unsupported database driver: {0}")]
    UnsupportedDriver(String),

    #[error("A record with the same primary key ({keys}) is already active in table '{table}'")]
    DuplicateActiveKey { table: String, keys: String },

    #[error("No records in table '{table}' were affected by the update operation")]
    NoRowsAffected { table: String },

    #[error("More than one matching record ({count}) was found in table '{table}'")]
    AmbiguousResult { table: String, count: usize },

    #[error("Database error during {operation} on '{table}': {source}")]
    Database {
        table: String,
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Mapping error on '{table}': {source}")]
    Mapping {
        table: String,
        #[source]
        source: MappingError,
    },

    #[error("Type {0} has not been registered with a table")]
    UnregisteredType(&'static str),

    #[error("Invalid schema for '{table}': {reason}")]
    InvalidSchema { table: String, reason: String },

    #[error("Table '{table}' declares {expected} key column(s) but the record supplied {found}")]
    KeyMismatch {
        table: String,
        expected: usize,
        found: usize,
    },

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl DataStoreError {
    pub fn database_operation(table: &str, operation: &'static str, source: sqlx::Error) -> Self {
        Self::Database {
            table: table.to_string(),
            operation,
            source,
        }
    }

    pub fn mapping(table: &str, source: MappingError) -> Self {
        Self::Mapping {
            table: table.to_string(),
            source,
        }
    }

    pub fn invalid_schema(table: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            table: table.to_string(),
            reason: reason.into(),
        }
    }

    pub fn identifier(table: &str, source: ValidationError) -> Self {
        Self::invalid_schema(table, source.to_string())
    }

    /// The underlying driver error, if this failure came from the store itself
    pub fn driver_error(&self) -> Option<&sqlx::Error> {
        match self {
            Self::Connection { source, .. } | Self::Database { source, .. } => Some(source),
            _ => None,
        }
    }
}
