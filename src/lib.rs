//! # Codewiz
//!
//! Record persistence for the codewiz game server. Records are stored in
//! SQLite or MySQL through the [`datastore`] engine, which stamps audit
//! times, deletes logically and restores in-memory fields when a write
//! fails.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use codewiz::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new(
//!         "sqlite3".to_string(),
//!         "codewiz.db".to_string(),
//!         "migrations".to_string(),
//!         30,
//!     );
//!
//!     let codewiz = Codewiz::new(&config).await?;
//!     codewiz.migrate().await?;
//!
//!     let mut user = User::new("merlin", "$2a$10$...", "merlin@camelot.uk");
//!     let errors = UserValidator::new(codewiz.users()).validate(&user).await?;
//!     if errors.is_empty() {
//!         codewiz.users().insert(&mut user).await?;
//!     }
//!
//!     let mut wizard = Wizard::new("Merlin", "M", user.id());
//!     codewiz.wizards().insert(&mut wizard).await?;
//!
//!     codewiz.wizards().delete(&mut wizard).await?;
//!     assert!(codewiz.wizards().get_by_id(wizard.id()).await?.is_none());
//!
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod errors;
pub mod migration;
pub mod models;
pub mod prelude;

// Re-export the main public types for convenience
pub use crate::core::Codewiz;
pub use crate::errors::CodewizError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, LogConfig};

// Re-export internal crates used by the public API
pub use datastore;
pub use type_mapping;

// Re-export external dependencies used in public API
pub use sqlx;
