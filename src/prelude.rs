//! Convenience re-exports for common codewiz usage
//!
//! ```rust
//! use codewiz::prelude::*;
//! ```

// Core codewiz components
pub use crate::core::Codewiz;
pub use crate::errors::CodewizError;
pub use crate::models::{
    Role, User, UserDao, UserValidator, ValidationErrors, Wizard, WizardDao, WizardValidator,
};

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, LogConfig};

// Re-export commonly used datastore types for convenience
pub use datastore::prelude::*;

// Common external dependencies
pub use sqlx;
pub use tokio;
