//! Turnkey record fields
//!
//! [`BaseRecord`] holds a numeric primary key plus status and audit
//! timestamps, and implements every capability trait. Record types embed it
//! with `#[serde(flatten)]` and forward the capability accessors to it with
//! [`delegate_base_record!`](crate::delegate_base_record), or implement any
//! accessor themselves to change its behavior.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use type_mapping::SqlValue;

use crate::schema::Column;
use crate::status::StatusCode;
use crate::traits::{
    CreationTimeRecorder, DeletionTimeRecorder, LastUpdateTimeRecorder, LogicallyDeletable,
    Record, StatusRecorder,
};

/// Key value of a record the store has not assigned a key to yet
pub const INVALID_ID: u64 = 0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseRecord {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "Status")]
    pub status: StatusCode,
    #[serde(rename = "CreationTime")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(rename = "LastModified")]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(rename = "DeletionTime")]
    pub deletion_time: Option<DateTime<Utc>>,
}

impl BaseRecord {
    pub const ID_COLUMN: &'static str = "ID";
    pub const STATUS_COLUMN: &'static str = "Status";
    pub const CREATION_TIME_COLUMN: &'static str = "CreationTime";
    pub const LAST_MODIFIED_COLUMN: &'static str = "LastModified";
    pub const DELETION_TIME_COLUMN: &'static str = "DeletionTime";

    pub fn new() -> Self {
        Self {
            id: INVALID_ID,
            ..Default::default()
        }
    }

    /// Column bindings for the embedded fields; composing types extend this list
    pub fn columns() -> Vec<Column> {
        vec![
            Column::auto_key(Self::ID_COLUMN),
            Column::integer(Self::STATUS_COLUMN),
            Column::timestamp(Self::CREATION_TIME_COLUMN),
            Column::timestamp(Self::LAST_MODIFIED_COLUMN),
            Column::timestamp(Self::DELETION_TIME_COLUMN),
        ]
    }

    pub fn has_key(&self) -> bool {
        self.id != INVALID_ID
    }
}

impl StatusRecorder for BaseRecord {
    fn status(&self) -> StatusCode {
        self.status
    }

    fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }
}

impl CreationTimeRecorder for BaseRecord {
    fn creation_time(&self) -> Option<DateTime<Utc>> {
        self.creation_time
    }

    fn set_creation_time(&mut self, time: Option<DateTime<Utc>>) {
        self.creation_time = time;
    }
}

impl LastUpdateTimeRecorder for BaseRecord {
    fn last_update_time(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    fn set_last_update_time(&mut self, time: Option<DateTime<Utc>>) {
        self.last_modified = time;
    }
}

impl DeletionTimeRecorder for BaseRecord {
    fn deletion_time(&self) -> Option<DateTime<Utc>> {
        self.deletion_time
    }

    fn set_deletion_time(&mut self, time: Option<DateTime<Utc>>) {
        self.deletion_time = time;
    }
}

impl LogicallyDeletable for BaseRecord {
    fn keys(&self) -> Vec<SqlValue> {
        vec![SqlValue::from(self.id)]
    }

    fn status_column(&self) -> &'static str {
        Self::STATUS_COLUMN
    }
}

impl Record for BaseRecord {
    fn columns() -> Vec<Column> {
        BaseRecord::columns()
    }

    crate::delegate_base_record!(self);
}

/// Forward every capability accessor of [`Record`](crate::Record) to an
/// embedded [`BaseRecord`] field.
///
/// Use inside an `impl Record for ...` block, naming the field:
///
/// ```rust,ignore
/// impl Record for Wizard {
///     fn columns() -> Vec<Column> { /* ... */ }
///
///     datastore::delegate_base_record!(base);
/// }
/// ```
#[macro_export]
macro_rules! delegate_base_record {
    (self) => {
        fn set_generated_key(&mut self, key: u64) {
            self.id = key;
        }

        fn as_status_recorder(&mut self) -> Option<&mut dyn $crate::traits::StatusRecorder> {
            Some(self)
        }

        fn as_creation_time_recorder(
            &mut self,
        ) -> Option<&mut dyn $crate::traits::CreationTimeRecorder> {
            Some(self)
        }

        fn as_last_update_time_recorder(
            &mut self,
        ) -> Option<&mut dyn $crate::traits::LastUpdateTimeRecorder> {
            Some(self)
        }

        fn as_deletion_time_recorder(
            &mut self,
        ) -> Option<&mut dyn $crate::traits::DeletionTimeRecorder> {
            Some(self)
        }

        fn as_logically_deletable(&self) -> Option<&dyn $crate::traits::LogicallyDeletable> {
            Some(self)
        }
    };
    ($field:ident) => {
        fn set_generated_key(&mut self, key: u64) {
            self.$field.id = key;
        }

        fn as_status_recorder(&mut self) -> Option<&mut dyn $crate::traits::StatusRecorder> {
            Some(&mut self.$field)
        }

        fn as_creation_time_recorder(
            &mut self,
        ) -> Option<&mut dyn $crate::traits::CreationTimeRecorder> {
            Some(&mut self.$field)
        }

        fn as_last_update_time_recorder(
            &mut self,
        ) -> Option<&mut dyn $crate::traits::LastUpdateTimeRecorder> {
            Some(&mut self.$field)
        }

        fn as_deletion_time_recorder(
            &mut self,
        ) -> Option<&mut dyn $crate::traits::DeletionTimeRecorder> {
            Some(&mut self.$field)
        }

        fn as_logically_deletable(&self) -> Option<&dyn $crate::traits::LogicallyDeletable> {
            Some(&self.$field)
        }
    };
}
