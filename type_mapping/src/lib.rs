//! Unified value mapping between Rust records and SQL columns
//! This crate provides the column value model shared by the codewiz store
//! and the conversions that carry record fields in and out of rows.

pub mod errors;
pub mod serialize;
pub mod types;

pub use errors::MappingError;
pub use serialize::{deserialize_from_columns, serialize_to_columns};
pub use types::{ColumnKind, SqlValue};
