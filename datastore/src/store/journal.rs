//! Field journal
//!
//! Records the value each capability field held before an operation
//! touched it, so a failed operation can put the record back exactly as
//! the caller handed it over.

use chrono::{DateTime, Utc};

use crate::status::StatusCode;
use crate::traits::Record;

type Timestamp = Option<DateTime<Utc>>;

/// Earliest value of every field changed through it. Setting a field twice
/// keeps the first remembered value.
#[derive(Debug, Default)]
pub(crate) struct FieldJournal {
    status: Option<StatusCode>,
    creation_time: Option<Timestamp>,
    last_update_time: Option<Timestamp>,
    deletion_time: Option<Timestamp>,
}

impl FieldJournal {
    pub fn set_status<T: Record>(&mut self, record: &mut T, status: StatusCode) {
        if let Some(recorder) = record.as_status_recorder() {
            if self.status.is_none() {
                self.status = Some(recorder.status());
            }
            recorder.set_status(status);
        }
    }

    pub fn set_creation_time<T: Record>(&mut self, record: &mut T, time: Timestamp) {
        if let Some(recorder) = record.as_creation_time_recorder() {
            if self.creation_time.is_none() {
                self.creation_time = Some(recorder.creation_time());
            }
            recorder.set_creation_time(time);
        }
    }

    pub fn set_last_update_time<T: Record>(&mut self, record: &mut T, time: Timestamp) {
        if let Some(recorder) = record.as_last_update_time_recorder() {
            if self.last_update_time.is_none() {
                self.last_update_time = Some(recorder.last_update_time());
            }
            recorder.set_last_update_time(time);
        }
    }

    pub fn set_deletion_time<T: Record>(&mut self, record: &mut T, time: Timestamp) {
        if let Some(recorder) = record.as_deletion_time_recorder() {
            if self.deletion_time.is_none() {
                self.deletion_time = Some(recorder.deletion_time());
            }
            recorder.set_deletion_time(time);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.creation_time.is_none()
            && self.last_update_time.is_none()
            && self.deletion_time.is_none()
    }

    /// Restore every remembered field
    pub fn revert<T: Record>(self, record: &mut T) {
        if let (Some(status), Some(recorder)) = (self.status, record.as_status_recorder()) {
            recorder.set_status(status);
        }
        if let (Some(time), Some(recorder)) =
            (self.creation_time, record.as_creation_time_recorder())
        {
            recorder.set_creation_time(time);
        }
        if let (Some(time), Some(recorder)) =
            (self.last_update_time, record.as_last_update_time_recorder())
        {
            recorder.set_last_update_time(time);
        }
        if let (Some(time), Some(recorder)) =
            (self.deletion_time, record.as_deletion_time_recorder())
        {
            recorder.set_deletion_time(time);
        }
    }
}
