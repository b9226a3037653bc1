//! Capability traits
//!
//! Each trait is a narrow accessor pair. Any record type qualifies for the
//! matching engine behavior purely by implementing it, whatever else the
//! type looks like.

use chrono::{DateTime, Utc};
use type_mapping::SqlValue;

use crate::status::StatusCode;

/// Records that carry a lifecycle status
pub trait StatusRecorder {
    fn status(&self) -> StatusCode;
    fn set_status(&mut self, status: StatusCode);
}

/// Records that remember when they first became active
pub trait CreationTimeRecorder {
    fn creation_time(&self) -> Option<DateTime<Utc>>;
    fn set_creation_time(&mut self, time: Option<DateTime<Utc>>);
}

/// Records that remember their last successful update
pub trait LastUpdateTimeRecorder {
    fn last_update_time(&self) -> Option<DateTime<Utc>>;
    fn set_last_update_time(&mut self, time: Option<DateTime<Utc>>);
}

/// Records that remember when they were logically deleted
pub trait DeletionTimeRecorder {
    fn deletion_time(&self) -> Option<DateTime<Utc>>;
    fn set_deletion_time(&mut self, time: Option<DateTime<Utc>>);
}

/// Records that are hidden rather than removed when deleted.
///
/// Implementing this makes `insert` look for an existing row with the same
/// key first, and makes `select`/`get` skip rows whose status column holds
/// [`StatusCode::Deleted`].
pub trait LogicallyDeletable: StatusRecorder {
    /// Primary key values, in the order the table's key columns are declared
    fn keys(&self) -> Vec<SqlValue>;

    /// Column holding the status code
    fn status_column(&self) -> &'static str;
}
