//! Convenience re-exports for common datastore usage

// Capability traits
pub use crate::traits::{
    CreationTimeRecorder, DeletionTimeRecorder, LastUpdateTimeRecorder, LogicallyDeletable,
    Record, StatusRecorder,
};

// Error types
pub use crate::errors::DataStoreError;

// Records and schema
pub use crate::base_record::{BaseRecord, INVALID_ID};
pub use crate::schema::{Column, ColumnRole, TableSchema};
pub use crate::status::StatusCode;

// Engine and raw access
pub use crate::dialect::Dialect;
pub use crate::raw::RawStore;
pub use crate::store::{DataStore, SqlMapper};

// Column values
pub use type_mapping::{ColumnKind, SqlValue};

// Common external dependencies that are frequently used
pub use serde::{Deserialize, Serialize};
