//! Database migration functionality
//!
//! Migrations are plain SQL files kept per driver under the configured
//! migrations path (`<path>/sqlite3`, `<path>/mysql`). They run once,
//! before the models are used.

use crate::core::Codewiz;
use crate::errors::CodewizError;

impl Codewiz {
    /// Apply every pending migration for the configured driver
    pub async fn migrate(&self) -> Result<(), CodewizError> {
        let directory = self.migrations_path().join(self.store().driver());
        tracing::info!("Applying migrations from {}", directory.display());

        self.store()
            .apply_migrations(self.migrations_path())
            .await?;

        tracing::info!("Migrations up to date");
        Ok(())
    }
}
