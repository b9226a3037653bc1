//! SQL dialects supported by the raw mapper

use crate::errors::DataStoreError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    MySql,
    Sqlite,
}

impl Dialect {
    /// Pick the dialect for a driver name (`sqlite3`, `sqlite`, `mysql`)
    pub fn from_driver(driver: &str) -> Result<Self, DataStoreError> {
        match driver.trim().to_ascii_lowercase().as_str() {
            "sqlite3" | "sqlite" => Ok(Dialect::Sqlite),
            "mysql" => Ok(Dialect::MySql),
            _ => Err(DataStoreError::UnsupportedDriver(driver.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::MySql => "mysql",
            Dialect::Sqlite => "sqlite",
        }
    }

    /// Directory holding this dialect's migrations, whichever driver alias
    /// opened the store
    pub fn migrations_dir(&self) -> &'static str {
        match self {
            Dialect::MySql => "mysql",
            Dialect::Sqlite => "sqlite3",
        }
    }

    /// Quote an identifier that has already passed validation
    pub fn quote_identifier(&self, identifier: &str) -> String {
        match self {
            Dialect::MySql => format!("`{}`", identifier),
            Dialect::Sqlite => format!("\"{}\"", identifier),
        }
    }

    /// Bind parameter marker; both dialects use positional `?`
    pub fn placeholder(&self) -> &'static str {
        "?"
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
