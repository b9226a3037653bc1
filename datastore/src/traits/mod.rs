//! Traits for record persistence
//!
//! A record type opts into engine behavior by implementing any subset of
//! the capability traits and exposing them through [`Record`]. None are
//! required; the engine checks each one independently on every operation.

pub mod capabilities;
pub mod record;

// Re-export all public items for convenience
pub use capabilities::{
    CreationTimeRecorder, DeletionTimeRecorder, LastUpdateTimeRecorder, LogicallyDeletable,
    StatusRecorder,
};
pub use record::Record;
