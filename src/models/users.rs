//! User accounts

use datastore::prelude::*;

use super::validation::ValidationErrors;

pub const TABLE: &str = "Users";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    pub base: BaseRecord,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Email")]
    pub email: String,
    /// Opaque password hash produced by the caller
    #[serde(rename = "Password")]
    pub hashed_password: String,
}

impl User {
    pub fn new(username: &str, hashed_password: &str, email: &str) -> Self {
        Self {
            username: username.to_string(),
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
            ..Default::default()
        }
    }

    pub fn id(&self) -> u64 {
        self.base.id
    }
}

impl Record for User {
    fn columns() -> Vec<Column> {
        let mut columns = BaseRecord::columns();
        columns.extend([
            Column::text("Username"),
            Column::text("Email"),
            Column::text("Password"),
        ]);
        columns
    }

    datastore::delegate_base_record!(base);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Visitor,
    Standard,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Visitor => "visitor",
            Role::Standard => "standard",
            Role::Admin => "admin",
        }
    }
}

/// Roles granted to a request made by `user`; anonymous requests are visitors
pub fn roles(user: Option<&User>) -> Vec<Role> {
    match user {
        None => vec![Role::Visitor],
        Some(_) => vec![Role::Standard],
    }
}

/// Data access for [`User`] records
#[derive(Debug, Clone, Copy)]
pub struct UserDao<'a> {
    store: &'a DataStore,
}

impl<'a> UserDao<'a> {
    pub fn new(store: &'a DataStore) -> Self {
        Self { store }
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Option<User>, DataStoreError> {
        self.store.get("ID = ?", &[id.into()]).await
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, DataStoreError> {
        self.store.get("Username = ?", &[username.into()]).await
    }

    pub async fn insert(&self, user: &mut User) -> Result<(), DataStoreError> {
        self.store.insert(user).await
    }

    pub async fn update(&self, user: &mut User) -> Result<(), DataStoreError> {
        self.store.update(user).await
    }

    pub async fn delete(&self, user: &mut User) -> Result<(), DataStoreError> {
        self.store.delete(user).await
    }
}

/// Checks a [`User`] before it is saved
#[derive(Debug, Clone, Copy)]
pub struct UserValidator<'a> {
    dao: UserDao<'a>,
}

impl<'a> UserValidator<'a> {
    pub fn new(dao: UserDao<'a>) -> Self {
        Self { dao }
    }

    /// Field problems with `user`. Store failures are returned as errors,
    /// not as validation messages.
    pub async fn validate(&self, user: &User) -> Result<ValidationErrors, DataStoreError> {
        let mut errors = ValidationErrors::new();

        if user.username.is_empty() {
            errors.add("Username", "Username must be provided.");
        }

        if user.hashed_password.is_empty() {
            errors.add("Password", "Password must be provided.");
        }

        if user.email.is_empty() {
            errors.add("Email", "Email must be provided.");
        } else if !is_email_address(&user.email) {
            errors.add("Email", "Invalid email address.");
        }

        if !user.username.is_empty() {
            if let Some(saved) = self.dao.get_by_username(&user.username).await? {
                if saved.id() != user.id() {
                    errors.add("Username", "A user with this username already exists.");
                }
            }
        }

        Ok(errors)
    }
}

/// `local@domain.tld` with no whitespace and non-empty domain labels.
/// Stricter than RFC 5322 on purpose: bare hosts such as `user@localhost`
/// and display-name forms are rejected.
fn is_email_address(address: &str) -> bool {
    if address.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}
