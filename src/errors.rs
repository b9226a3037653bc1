//! Error types for the codewiz crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodewizError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Datastore error: {0}")]
    DataStore(#[from] datastore::DataStoreError),
}
