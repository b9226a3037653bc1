//! Table schema descriptors
//!
//! A [`TableSchema`] is built once per record type at registration and
//! drives every generated statement for that type.

use std::collections::HashSet;

use type_mapping::{deserialize_from_columns, serialize_to_columns, ColumnKind, SqlValue};

use crate::errors::DataStoreError;
use crate::traits::Record;
use crate::validation::{ValidatedColumnName, ValidatedTableName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    /// Integer primary key assigned by the store on insert
    AutoKey,
    /// Primary key supplied by the record
    Key,
    Data,
}

/// Binding of one serialized record field to a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub role: ColumnRole,
}

impl Column {
    pub const fn new(name: &'static str, kind: ColumnKind, role: ColumnRole) -> Self {
        Self { name, kind, role }
    }

    pub const fn auto_key(name: &'static str) -> Self {
        Self::new(name, ColumnKind::Integer, ColumnRole::AutoKey)
    }

    pub const fn key(name: &'static str, kind: ColumnKind) -> Self {
        Self::new(name, kind, ColumnRole::Key)
    }

    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, ColumnKind::Integer, ColumnRole::Data)
    }

    pub const fn real(name: &'static str) -> Self {
        Self::new(name, ColumnKind::Real, ColumnRole::Data)
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self::new(name, ColumnKind::Boolean, ColumnRole::Data)
    }

    pub const fn text(name: &'static str) -> Self {
        Self::new(name, ColumnKind::Text, ColumnRole::Data)
    }

    pub const fn timestamp(name: &'static str) -> Self {
        Self::new(name, ColumnKind::Timestamp, ColumnRole::Data)
    }

    pub fn is_key(&self) -> bool {
        matches!(self.role, ColumnRole::AutoKey | ColumnRole::Key)
    }
}

/// Validated mapping of a record type onto a table
#[derive(Debug, Clone)]
pub struct TableSchema {
    table: ValidatedTableName,
    type_name: &'static str,
    columns: Vec<Column>,
    status_column: Option<&'static str>,
}

impl TableSchema {
    /// Build and validate the schema for `T` bound to `table`.
    ///
    /// The status column is taken from a default-constructed `T`; a type
    /// whose default value is not logically deletable gets no visibility
    /// filter.
    pub fn for_type<T: Record + Default>(table: &str) -> Result<Self, DataStoreError> {
        let prototype = T::default();
        let status_column = prototype
            .as_logically_deletable()
            .map(|deletable| deletable.status_column());
        Self::new(table, std::any::type_name::<T>(), T::columns(), status_column)
    }

    pub fn new(
        table: &str,
        type_name: &'static str,
        columns: Vec<Column>,
        status_column: Option<&'static str>,
    ) -> Result<Self, DataStoreError> {
        let validated =
            ValidatedTableName::new(table).map_err(|e| DataStoreError::identifier(table, e))?;

        let mut seen = HashSet::new();
        for column in &columns {
            ValidatedColumnName::new(column.name)
                .map_err(|e| DataStoreError::identifier(table, e))?;
            if !seen.insert(column.name.to_ascii_lowercase()) {
                return Err(DataStoreError::invalid_schema(
                    table,
                    format!("column '{}' is declared more than once", column.name),
                ));
            }
        }

        let auto_keys: Vec<&Column> = columns
            .iter()
            .filter(|c| c.role == ColumnRole::AutoKey)
            .collect();
        if auto_keys.len() > 1 {
            return Err(DataStoreError::invalid_schema(
                table,
                "at most one auto key column is allowed",
            ));
        }
        if auto_keys.iter().any(|c| c.kind != ColumnKind::Integer) {
            return Err(DataStoreError::invalid_schema(
                table,
                "auto key column must be an integer",
            ));
        }
        if !columns.iter().any(Column::is_key) {
            return Err(DataStoreError::invalid_schema(
                table,
                "at least one key column is required",
            ));
        }
        if !columns.iter().any(|c| !c.is_key()) {
            return Err(DataStoreError::invalid_schema(
                table,
                "at least one non-key column is required",
            ));
        }

        if let Some(status) = status_column {
            match columns.iter().find(|c| c.name == status) {
                Some(c) if c.kind == ColumnKind::Integer && !c.is_key() => {}
                Some(_) => {
                    return Err(DataStoreError::invalid_schema(
                        table,
                        format!("status column '{}' must be a non-key integer", status),
                    ))
                }
                None => {
                    return Err(DataStoreError::invalid_schema(
                        table,
                        format!("status column '{}' is not mapped", status),
                    ))
                }
            }
        }

        Ok(Self {
            table: validated,
            type_name,
            columns,
            status_column,
        })
    }

    pub fn table(&self) -> &str {
        self.table.as_str()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn key_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_key())
    }

    pub fn data_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.is_key())
    }

    pub fn auto_key(&self) -> Option<&Column> {
        self.columns.iter().find(|c| c.role == ColumnRole::AutoKey)
    }

    pub fn status_column(&self) -> Option<&'static str> {
        self.status_column
    }

    pub fn is_logically_deletable(&self) -> bool {
        self.status_column.is_some()
    }

    /// Column values of `record`, in declaration order
    pub fn values_of<T: Record>(&self, record: &T) -> Result<Vec<SqlValue>, DataStoreError> {
        serialize_to_columns(record, self.columns.iter().map(|c| (c.name, c.kind)))
            .map_err(|e| DataStoreError::mapping(self.table(), e))
    }

    /// Rebuild a record from a row fetched with this schema's column list
    pub fn record_from_row<T: Record>(&self, row: Vec<SqlValue>) -> Result<T, DataStoreError> {
        let cells = self.columns.iter().map(|c| c.name).zip(row);
        deserialize_from_columns(cells).map_err(|e| DataStoreError::mapping(self.table(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base_record::BaseRecord;

    fn schema(columns: Vec<Column>) -> Result<TableSchema, DataStoreError> {
        TableSchema::new("Things", "Thing", columns, None)
    }

    #[test]
    fn test_base_record_schema() {
        let schema = TableSchema::for_type::<BaseRecord>("Records").unwrap();
        assert_eq!(schema.table(), "Records");
        assert_eq!(schema.status_column(), Some("Status"));
        assert_eq!(schema.auto_key().map(|c| c.name), Some("ID"));
        assert_eq!(schema.key_columns().count(), 1);
        assert_eq!(schema.data_columns().count(), 4);
    }

    #[test]
    fn test_requires_key_column() {
        let err = schema(vec![Column::text("Name")]).unwrap_err();
        assert!(matches!(err, DataStoreError::InvalidSchema { .. }));
    }

    #[test]
    fn test_rejects_second_auto_key() {
        let err = schema(vec![
            Column::auto_key("ID"),
            Column::auto_key("OtherID"),
            Column::text("Name"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("at most one auto key"));
    }

    #[test]
    fn test_rejects_duplicate_column_names() {
        let err = schema(vec![
            Column::auto_key("ID"),
            Column::text("Name"),
            Column::text("name"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_rejects_unsafe_identifiers() {
        assert!(TableSchema::new("Things; --", "Thing", BaseRecord::columns(), None).is_err());
        assert!(schema(vec![Column::auto_key("ID"), Column::text("Na me")]).is_err());
    }

    #[test]
    fn test_status_column_must_be_mapped() {
        let err = TableSchema::new(
            "Things",
            "Thing",
            vec![Column::auto_key("ID"), Column::text("Name")],
            Some("Status"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("not mapped"));
    }

    #[test]
    fn test_row_round_trip_through_schema() {
        let schema = TableSchema::for_type::<BaseRecord>("Records").unwrap();
        let mut record = BaseRecord::new();
        record.id = 9;
        let values = schema.values_of(&record).unwrap();
        assert_eq!(values[0], SqlValue::Integer(9));
        let back: BaseRecord = schema.record_from_row(values).unwrap();
        assert_eq!(back, record);
    }
}
