use serde::de::DeserializeOwned;
use serde::Serialize;

use super::capabilities::{
    CreationTimeRecorder, DeletionTimeRecorder, LastUpdateTimeRecorder, LogicallyDeletable,
    StatusRecorder,
};
use crate::schema::Column;

/// A value the engine can persist.
///
/// Fields travel through serde: every column returned by [`Record::columns`]
/// must match a serialized field name (use `#[serde(rename = "...")]`).
///
/// The `as_*` accessors are how the engine detects capabilities. They return
/// `None` by default; a type that supports a capability returns itself (or
/// the component that implements it). Types composing a [`BaseRecord`]
/// usually get all of them from [`delegate_base_record!`].
///
/// [`BaseRecord`]: crate::BaseRecord
/// [`delegate_base_record!`]: crate::delegate_base_record
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Column bindings for this type, read once at registration
    fn columns() -> Vec<Column>;

    /// Store the key generated by the database on first physical insert
    fn set_generated_key(&mut self, _key: u64) {}

    fn as_status_recorder(&mut self) -> Option<&mut dyn StatusRecorder> {
        None
    }

    fn as_creation_time_recorder(&mut self) -> Option<&mut dyn CreationTimeRecorder> {
        None
    }

    fn as_last_update_time_recorder(&mut self) -> Option<&mut dyn LastUpdateTimeRecorder> {
        None
    }

    fn as_deletion_time_recorder(&mut self) -> Option<&mut dyn DeletionTimeRecorder> {
        None
    }

    fn as_logically_deletable(&self) -> Option<&dyn LogicallyDeletable> {
        None
    }
}
