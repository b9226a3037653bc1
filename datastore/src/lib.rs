//! Datastore - record persistence layer for codewiz
//!
//! This crate provides the capability traits records opt into, a reusable
//! [`BaseRecord`], the raw SQL mapper for SQLite and MySQL, and the
//! [`DataStore`] engine that layers soft deletion, audit timestamps and
//! failure rollback over it.
//!
//! ```rust,no_run
//! use datastore::prelude::*;
//!
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! struct Spell {
//!     #[serde(flatten)]
//!     base: BaseRecord,
//!     #[serde(rename = "Name")]
//!     name: String,
//! }
//!
//! impl Record for Spell {
//!     fn columns() -> Vec<Column> {
//!         let mut columns = BaseRecord::columns();
//!         columns.push(Column::text("Name"));
//!         columns
//!     }
//!
//!     datastore::delegate_base_record!(base);
//! }
//!
//! # async fn run() -> Result<(), DataStoreError> {
//! let mut store = DataStore::open("sqlite3", "sqlite::memory:").await?;
//! store.register_type::<Spell>("Spells")?;
//!
//! let mut spell = Spell { name: "Fireball".to_string(), ..Default::default() };
//! store.insert(&mut spell).await?;
//! store.delete(&mut spell).await?;
//! assert!(store.get::<Spell>("Name = ?", &["Fireball".into()]).await?.is_none());
//! # Ok(())
//! # }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod base_record;
pub mod clock;
pub mod dialect;
pub mod errors;
pub mod prelude;
pub mod raw;
pub mod schema;
pub mod sql_generation;
pub mod status;
pub mod store;
pub mod traits;
pub mod validation;

pub use base_record::{BaseRecord, INVALID_ID};
pub use dialect::Dialect;
pub use errors::DataStoreError;
pub use raw::{ExecResult, MySqlStore, RawStore, SqliteStore};
pub use schema::{Column, ColumnRole, TableSchema};
pub use status::StatusCode;
pub use store::{DataStore, SqlMapper};
pub use traits::*;
pub use validation::{ValidatedColumnName, ValidatedTableName, ValidationError};

pub use type_mapping::{ColumnKind, SqlValue};
