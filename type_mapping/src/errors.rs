//! Error types for value mapping

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MappingError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Record must serialize to an object, got {0}")]
    NotAnObject(&'static str),

    #[error("Record has no field for column '{0}'")]
    MissingField(String),

    #[error("Column '{column}' expects {expected}, got {found}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Column '{column}' value {value} is out of range")]
    OutOfRange { column: String, value: String },

    #[error("Column '{column}' holds an invalid timestamp '{value}': {source}")]
    InvalidTimestamp {
        column: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
