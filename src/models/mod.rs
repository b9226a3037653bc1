//! Record models
//!
//! Each model pairs a record type with a DAO over the shared
//! [`DataStore`] and a validator run before saving.

pub mod users;
pub mod validation;
pub mod wizards;

use datastore::{DataStore, DataStoreError};

pub use users::{Role, User, UserDao, UserValidator};
pub use validation::ValidationErrors;
pub use wizards::{Wizard, WizardDao, WizardValidator};

/// Bind every model type to its table
pub fn register(store: &mut DataStore) -> Result<(), DataStoreError> {
    store.register_type::<User>(users::TABLE)?;
    store.register_type::<Wizard>(wizards::TABLE)?;
    Ok(())
}
