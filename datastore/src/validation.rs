//! Identifier validation
//!
//! Table and column names are spliced into generated SQL, so every
//! identifier a schema declares is checked once at registration time.

use std::fmt;
use thiserror::Error;

/// Longest identifier MySQL accepts; SQLite has no limit
pub const MAX_IDENTIFIER_LENGTH: usize = 64;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("identifier is empty")]
    Empty,

    #[error("identifier '{name}' has {length} characters (max {max_length})")]
    TooLong {
        name: String,
        length: usize,
        max_length: usize,
    },

    #[error("identifier '{0}' must start with an ASCII letter or underscore")]
    InvalidStartCharacter(String),

    #[error("identifier '{0}' may only contain ASCII letters, digits and underscores")]
    InvalidCharacters(String),

    #[error("identifier '{0}' is a reserved SQL keyword")]
    ReservedKeyword(String),
}

/// Table name that passed [`validate_identifier`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedTableName(String);

impl ValidatedTableName {
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        validate_identifier(name).map(|()| Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidatedTableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Column name that passed [`validate_identifier`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedColumnName(String);

impl ValidatedColumnName {
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        validate_identifier(name).map(|()| Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidatedColumnName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Accept plain ASCII identifiers that need no escaping in either dialect
pub fn validate_identifier(name: &str) -> Result<(), ValidationError> {
    let mut chars = name.chars();
    let first = chars.next().ok_or(ValidationError::Empty)?;

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(ValidationError::TooLong {
            name: name.to_string(),
            length: name.len(),
            max_length: MAX_IDENTIFIER_LENGTH,
        });
    }
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(ValidationError::InvalidStartCharacter(name.to_string()));
    }
    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_')) {
        return Err(ValidationError::InvalidCharacters(name.to_string()));
    }
    if is_reserved_keyword(name) {
        return Err(ValidationError::ReservedKeyword(name.to_string()));
    }
    Ok(())
}

/// Words reserved by MySQL or SQLite that a mapped record is likely to
/// collide with. Common field names such as `Status`, `Name` and `Value`
/// are deliberately absent.
const RESERVED_KEYWORDS: &[&str] = &[
    "ADD", "ALL", "ALTER", "AND", "AS", "ATTACH", "AUTOINCREMENT", "AUTO_INCREMENT",
    "BETWEEN", "BY", "CASE", "CHECK", "COLUMN", "COMMIT", "CONSTRAINT", "CREATE", "CROSS",
    "DATABASE", "DATABASES", "DEFAULT", "DELETE", "DESCRIBE", "DETACH", "DISTINCT", "DROP",
    "ELSE", "END", "EXISTS", "EXPLAIN", "FALSE", "FOREIGN", "FROM", "FULL", "GLOB", "GROUP",
    "HAVING", "IF", "IGNORE", "IN", "INDEX", "INNER", "INSERT", "INTO", "IS", "JOIN", "KEY",
    "KEYS", "LEFT", "LIKE", "LIMIT", "LOCK", "NOT", "NULL", "OFFSET", "ON", "OR", "ORDER",
    "OUTER", "PRAGMA", "PRIMARY", "REFERENCES", "REGEXP", "REINDEX", "RENAME", "REPLACE",
    "RIGHT", "ROLLBACK", "ROWID", "SCHEMA", "SELECT", "SET", "SHOW", "TABLE", "THEN", "TO",
    "TRANSACTION", "TRUE", "UNION", "UNIQUE", "UNSIGNED", "UPDATE", "USE", "VACUUM", "VALUES",
    "VIEW", "WHEN", "WHERE", "WITH",
];

fn is_reserved_keyword(name: &str) -> bool {
    RESERVED_KEYWORDS
        .iter()
        .any(|keyword| keyword.eq_ignore_ascii_case(name))
}
