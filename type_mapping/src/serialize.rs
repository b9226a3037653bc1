//! Serialization utilities
//!
//! This module converts records to and from column values. Records go
//! through `serde_json` so any serde-shaped struct can be mapped; the
//! column list decides which fields are read and how they are typed.

use crate::errors::MappingError;
use crate::types::{ColumnKind, SqlValue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Serialize `record` and extract one value per column, in column order
pub fn serialize_to_columns<'a, T, I>(record: &T, columns: I) -> Result<Vec<SqlValue>, MappingError>
where
    T: Serialize,
    I: IntoIterator<Item = (&'a str, ColumnKind)>,
{
    let object = match serde_json::to_value(record)? {
        Value::Object(map) => map,
        Value::Array(_) => return Err(MappingError::NotAnObject("array")),
        Value::Null => return Err(MappingError::NotAnObject("null")),
        _ => return Err(MappingError::NotAnObject("scalar")),
    };

    columns
        .into_iter()
        .map(|(name, kind)| {
            let value = object
                .get(name)
                .ok_or_else(|| MappingError::MissingField(name.to_string()))?;
            SqlValue::from_json(kind, name, value)
        })
        .collect()
}

/// Rebuild a record from named column values
pub fn deserialize_from_columns<'a, T, I>(cells: I) -> Result<T, MappingError>
where
    T: DeserializeOwned,
    I: IntoIterator<Item = (&'a str, SqlValue)>,
{
    let mut object = Map::new();
    for (name, value) in cells {
        object.insert(name.to_string(), value.into_json());
    }
    Ok(serde_json::from_value(Value::Object(object))?)
}
