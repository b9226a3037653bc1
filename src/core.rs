//! Core codewiz functionality
//!
//! [`Codewiz`] opens the record store described by the configuration,
//! registers every model table and hands out the model DAOs.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::DatabaseConfig;
use datastore::DataStore;

use crate::errors::CodewizError;
use crate::models::{self, UserDao, WizardDao};

/// Coordinator owning the datastore connection
#[derive(Debug)]
pub struct Codewiz {
    store: DataStore,
    migrations_path: PathBuf,
}

impl Codewiz {
    /// Open the configured store and register the model tables
    pub async fn new(config: &DatabaseConfig) -> Result<Self, CodewizError> {
        let mut store = DataStore::connect(
            &config.driver,
            &config.dsn,
            Duration::from_secs(config.connect_timeout_seconds),
        )
        .await?;
        models::register(&mut store)?;

        Ok(Self {
            store,
            migrations_path: PathBuf::from(&config.migrations_path),
        })
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn migrations_path(&self) -> &Path {
        &self.migrations_path
    }

    pub fn users(&self) -> UserDao<'_> {
        UserDao::new(&self.store)
    }

    pub fn wizards(&self) -> WizardDao<'_> {
        WizardDao::new(&self.store)
    }

    /// Registered table names, sorted
    pub fn tables(&self) -> Vec<&str> {
        self.store.mapper().tables()
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), CodewizError> {
        self.store.health_check().await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.store.close().await;
    }
}
