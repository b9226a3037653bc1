//! Record lifecycle status

use serde::{Deserialize, Serialize};
use std::fmt;
use type_mapping::SqlValue;

/// Lifecycle state of a record, stored as an integer code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum StatusCode {
    /// Not yet inserted. Never persisted.
    #[default]
    Transient,
    Active,
    /// Persisted but hidden from standard queries
    Deleted,
}

impl StatusCode {
    pub const fn code(self) -> u8 {
        match self {
            StatusCode::Transient => 0,
            StatusCode::Active => 1,
            StatusCode::Deleted => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(StatusCode::Transient),
            1 => Some(StatusCode::Active),
            2 => Some(StatusCode::Deleted),
            _ => None,
        }
    }
}

impl From<StatusCode> for u8 {
    fn from(status: StatusCode) -> Self {
        status.code()
    }
}

impl TryFrom<u8> for StatusCode {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        StatusCode::from_code(code).ok_or_else(|| format!("unknown status code {}", code))
    }
}

impl From<StatusCode> for SqlValue {
    fn from(status: StatusCode) -> Self {
        SqlValue::Integer(i64::from(status.code()))
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCode::Transient => write!(f, "transient"),
            StatusCode::Active => write!(f, "active"),
            StatusCode::Deleted => write!(f, "deleted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_transient() {
        assert_eq!(StatusCode::default(), StatusCode::Transient);
    }

    #[test]
    fn test_serializes_as_integer_code() {
        assert_eq!(serde_json::to_value(StatusCode::Deleted).unwrap(), serde_json::json!(2));
        let status: StatusCode = serde_json::from_value(serde_json::json!(1)).unwrap();
        assert_eq!(status, StatusCode::Active);
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert!(serde_json::from_value::<StatusCode>(serde_json::json!(7)).is_err());
        assert_eq!(StatusCode::from_code(3), None);
    }
}
