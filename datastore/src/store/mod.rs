//! Record stores
//!
//! [`SqlMapper`] is the raw mapper; [`DataStore`] is the engine callers use.

pub mod engine;
mod journal;
pub mod mapper;

pub use engine::{DataStore, DEFAULT_CONNECT_TIMEOUT};
pub use mapper::SqlMapper;
