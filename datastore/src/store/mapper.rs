//! Raw object mapper
//!
//! [`SqlMapper`] maps registered record types onto their tables and runs
//! plain insert, update and select statements. It has no notion of record
//! status: rows in every state are visible through it.

use std::any::{type_name, TypeId};
use std::collections::HashMap;

use type_mapping::SqlValue;

use crate::dialect::Dialect;
use crate::errors::DataStoreError;
use crate::raw::RawStore;
use crate::schema::{Column, ColumnRole, TableSchema};
use crate::sql_generation::SqlGenerator;
use crate::traits::Record;

#[derive(Debug)]
pub struct SqlMapper {
    store: Box<dyn RawStore>,
    tables: HashMap<TypeId, TableSchema>,
}

impl SqlMapper {
    pub fn new(store: Box<dyn RawStore>) -> Self {
        Self {
            store,
            tables: HashMap::new(),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.store.dialect()
    }

    pub fn store(&self) -> &dyn RawStore {
        self.store.as_ref()
    }

    /// Bind `T` to `table`, replacing any earlier binding for the type
    pub fn add_table_with_name<T: Record + Default>(
        &mut self,
        table: &str,
    ) -> Result<&TableSchema, DataStoreError> {
        let schema = TableSchema::for_type::<T>(table)?;

        if let Some(previous) = self.tables.get(&TypeId::of::<T>()) {
            tracing::warn!(
                "Type {} was already registered with table '{}'; rebinding to '{}'",
                schema.type_name(),
                previous.table(),
                schema.table()
            );
        }
        crate::debug_log!(
            "[MAPPER] Registered {} -> '{}' ({} columns)",
            schema.type_name(),
            schema.table(),
            schema.columns().len()
        );

        self.tables.insert(TypeId::of::<T>(), schema);
        self.schema::<T>()
    }

    pub fn schema<T: Record>(&self) -> Result<&TableSchema, DataStoreError> {
        self.tables
            .get(&TypeId::of::<T>())
            .ok_or(DataStoreError::UnregisteredType(type_name::<T>()))
    }

    /// Registered table names, sorted
    pub fn tables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.values().map(TableSchema::table).collect();
        names.sort_unstable();
        names
    }

    /// Physically insert `record`.
    ///
    /// A zero or null auto key is left out of the statement and the key the
    /// store generates is written back through [`Record::set_generated_key`].
    pub async fn insert<T: Record>(&self, record: &mut T) -> Result<(), DataStoreError> {
        let schema = self.schema::<T>()?;
        let values = schema.values_of(record)?;

        let mut generated = false;
        let (columns, args): (Vec<&Column>, Vec<SqlValue>) = schema
            .columns()
            .iter()
            .zip(values)
            .filter(|(column, value)| {
                let unassigned = column.role == ColumnRole::AutoKey
                    && matches!(value, SqlValue::Null | SqlValue::Integer(0));
                generated |= unassigned;
                !unassigned
            })
            .unzip();

        let sql = SqlGenerator::insert(self.dialect(), schema, &columns);
        crate::debug_log!("[MAPPER] INSERT into '{}'", schema.table());
        let result = self
            .store
            .execute(&sql, &args)
            .await
            .map_err(|e| DataStoreError::database_operation(schema.table(), "insert", e))?;

        if generated {
            if let Some(key) = result.last_insert_id {
                record.set_generated_key(key);
            }
        }
        Ok(())
    }

    /// Write every non-key column of `record` to the row matching its keys.
    /// Returns the number of rows affected.
    pub async fn update<T: Record>(&self, record: &T) -> Result<u64, DataStoreError> {
        let schema = self.schema::<T>()?;
        let values = schema.values_of(record)?;

        let mut args = Vec::with_capacity(values.len());
        let mut keys = Vec::new();
        for (column, value) in schema.columns().iter().zip(values) {
            if column.is_key() {
                keys.push(value);
            } else {
                args.push(value);
            }
        }
        args.extend(keys);

        let sql = SqlGenerator::update(self.dialect(), schema);
        let result = self
            .store
            .execute(&sql, &args)
            .await
            .map_err(|e| DataStoreError::database_operation(schema.table(), "update", e))?;

        crate::debug_log!(
            "[MAPPER] UPDATE '{}' affected {} row(s)",
            schema.table(),
            result.rows_affected
        );
        Ok(result.rows_affected)
    }

    /// Run a complete query and map its rows onto `T`.
    ///
    /// The result set must name every column mapped for `T`.
    pub async fn select<T: Record>(
        &self,
        sql: &str,
        args: &[SqlValue],
    ) -> Result<Vec<T>, DataStoreError> {
        let schema = self.schema::<T>()?;
        let rows = self
            .store
            .fetch(sql, args, schema.columns())
            .await
            .map_err(|e| DataStoreError::database_operation(schema.table(), "select", e))?;

        rows.into_iter()
            .map(|row| schema.record_from_row(row))
            .collect()
    }

    /// Select rows of `T`'s table matching `predicate`, in any status
    pub async fn select_where<T: Record>(
        &self,
        predicate: &str,
        args: &[SqlValue],
    ) -> Result<Vec<T>, DataStoreError> {
        let schema = self.schema::<T>()?;
        let sql = SqlGenerator::select(self.dialect(), schema, Some(predicate));
        self.select(&sql, args).await
    }

    /// Look up the row with the given key values, in any status
    pub async fn find_by_keys<T: Record>(
        &self,
        keys: &[SqlValue],
    ) -> Result<Option<T>, DataStoreError> {
        let schema = self.schema::<T>()?;
        let expected = schema.key_columns().count();
        if keys.len() != expected {
            return Err(DataStoreError::KeyMismatch {
                table: schema.table().to_string(),
                expected,
                found: keys.len(),
            });
        }

        let predicate = SqlGenerator::key_predicate(self.dialect(), schema);
        let mut rows = self.select_where::<T>(&predicate, keys).await?;
        Ok(rows.pop())
    }
}
