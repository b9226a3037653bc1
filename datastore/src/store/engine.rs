//! Persistence engine
//!
//! [`DataStore`] layers the record lifecycle over [`SqlMapper`]:
//! audit timestamps, logical deletion with reactivation, rejection of
//! duplicate active keys and rollback of in-memory changes when a write
//! fails.
//!
//! # Concurrency
//!
//! Each operation awaits its statements one after another on the store's
//! single connection. `insert` on a logically deletable record first looks
//! up the existing row and then writes, and the two steps are not atomic:
//! two concurrent inserts of the same key can both pass the lookup. The
//! store's own unique constraint on the key is what rejects the loser.

use std::path::Path;
use std::time::Duration;

use sqlx::migrate::Migrator;
use type_mapping::SqlValue;

use super::journal::FieldJournal;
use super::mapper::SqlMapper;
use crate::clock::now_utc;
use crate::dialect::Dialect;
use crate::errors::DataStoreError;
use crate::raw::{self, RawStore};
use crate::sql_generation::SqlGenerator;
use crate::status::StatusCode;
use crate::traits::Record;

/// Acquire timeout used by [`DataStore::open`]
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug)]
pub struct DataStore {
    driver: String,
    mapper: SqlMapper,
}

impl DataStore {
    /// Connect with the dialect named by `driver` (`sqlite3`, `sqlite` or
    /// `mysql`) and validate the connection
    pub async fn open(driver: &str, dsn: &str) -> Result<Self, DataStoreError> {
        Self::connect(driver, dsn, DEFAULT_CONNECT_TIMEOUT).await
    }

    pub async fn connect(
        driver: &str,
        dsn: &str,
        acquire_timeout: Duration,
    ) -> Result<Self, DataStoreError> {
        let dialect = Dialect::from_driver(driver)?;
        let connection_error = |source| DataStoreError::Connection {
            driver: driver.to_string(),
            source,
        };

        let store = raw::connect(dialect, dsn, acquire_timeout)
            .await
            .map_err(connection_error)?;
        if let Err(e) = store.ping().await {
            store.close().await;
            return Err(connection_error(e));
        }

        tracing::debug!("Opened {} datastore", dialect);
        Ok(Self::from_store(driver, store))
    }

    /// Wrap an already connected store
    pub fn from_store(driver: &str, store: Box<dyn RawStore>) -> Self {
        Self {
            driver: driver.trim().to_ascii_lowercase(),
            mapper: SqlMapper::new(store),
        }
    }

    /// Driver name the store was opened with, lower-cased
    pub fn driver(&self) -> &str {
        &self.driver
    }

    pub fn dialect(&self) -> Dialect {
        self.mapper.dialect()
    }

    /// Raw mapper, bypassing lifecycle handling and visibility filtering
    pub fn mapper(&self) -> &SqlMapper {
        &self.mapper
    }

    /// Bind a record type to a table. Must happen before any other
    /// operation on the type; registering again replaces the binding.
    pub fn register_type<T: Record + Default>(&mut self, table: &str) -> Result<(), DataStoreError> {
        self.mapper.add_table_with_name::<T>(table)?;
        Ok(())
    }

    /// Apply pending migrations from `<path>/<dialect directory>`, see
    /// [`Dialect::migrations_dir`]
    pub async fn apply_migrations(&self, path: impl AsRef<Path>) -> Result<(), DataStoreError> {
        let directory = path.as_ref().join(self.dialect().migrations_dir());
        let migrator = Migrator::new(directory).await?;
        self.mapper.store().run_migrations(&migrator).await?;
        Ok(())
    }

    /// Re-validate the connection
    pub async fn health_check(&self) -> Result<(), DataStoreError> {
        self.mapper
            .store()
            .ping()
            .await
            .map_err(|source| DataStoreError::Connection {
                driver: self.driver.clone(),
                source,
            })
    }

    pub async fn close(&self) {
        self.mapper.store().close().await;
    }

    /// Make `record` active and persist it.
    ///
    /// Status becomes active and the creation and last update times are
    /// stamped. For a logically deletable record, an existing row with the
    /// same keys decides what happens: a deleted row is reactivated through
    /// [`update`](Self::update) (its deletion time cleared), an active row
    /// fails with [`DataStoreError::DuplicateActiveKey`] without writing.
    /// Otherwise, a transient row included, the record is physically
    /// inserted and receives its generated key.
    ///
    /// On failure every field changed here is restored.
    pub async fn insert<T: Record>(&self, record: &mut T) -> Result<(), DataStoreError> {
        let now = now_utc();
        let mut journal = FieldJournal::default();
        journal.set_status(record, StatusCode::Active);
        journal.set_creation_time(record, Some(now));
        journal.set_last_update_time(record, Some(now));

        let result = self.insert_or_reactivate(record, &mut journal).await;
        if let Err(e) = &result {
            self.rollback(record, journal, "insert", e);
        }
        result
    }

    async fn insert_or_reactivate<T: Record>(
        &self,
        record: &mut T,
        journal: &mut FieldJournal,
    ) -> Result<(), DataStoreError> {
        let keys = record.as_logically_deletable().map(|deletable| deletable.keys());

        if let Some(keys) = keys {
            if let Some(existing) = self.mapper.find_by_keys::<T>(&keys).await? {
                let existing_status = existing
                    .as_logically_deletable()
                    .map(|deletable| deletable.status());

                match existing_status {
                    Some(StatusCode::Deleted) => {
                        crate::debug_log!(
                            "[DATASTORE] Reactivating deleted row ({})",
                            join_keys(&keys)
                        );
                        journal.set_deletion_time(record, None);
                        return self.update(record).await;
                    }
                    Some(StatusCode::Active) => {
                        return Err(DataStoreError::DuplicateActiveKey {
                            table: self.table_name::<T>(),
                            keys: join_keys(&keys),
                        });
                    }
                    // a row that never became active is left to the store's key constraint
                    _ => {}
                }
            }
        }

        self.mapper.insert(record).await
    }

    /// Persist the current field values of `record`, stamping its last
    /// update time. Status and creation time are left alone.
    ///
    /// An update that matches no row fails with
    /// [`DataStoreError::NoRowsAffected`].
    pub async fn update<T: Record>(&self, record: &mut T) -> Result<(), DataStoreError> {
        let mut journal = FieldJournal::default();
        journal.set_last_update_time(record, Some(now_utc()));

        let result = match self.mapper.update(&*record).await {
            Ok(0) => Err(DataStoreError::NoRowsAffected {
                table: self.table_name::<T>(),
            }),
            Ok(_) => Ok(()),
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            self.rollback(record, journal, "update", e);
        }
        result
    }

    /// Logically delete `record`: mark it deleted, stamp its deletion time
    /// and persist it through [`update`](Self::update). The row stays in the
    /// table.
    pub async fn delete<T: Record>(&self, record: &mut T) -> Result<(), DataStoreError> {
        let mut journal = FieldJournal::default();
        journal.set_status(record, StatusCode::Deleted);
        journal.set_deletion_time(record, Some(now_utc()));

        let result = self.update(record).await;
        if let Err(e) = &result {
            self.rollback(record, journal, "delete", e);
        }
        result
    }

    /// Records of type `T` matching `predicate` (with or without a leading
    /// `WHERE`; empty matches everything). Deleted rows of logically
    /// deletable types are never returned.
    pub async fn select<T: Record>(
        &self,
        predicate: &str,
        args: &[SqlValue],
    ) -> Result<Vec<T>, DataStoreError> {
        let schema = self.mapper.schema::<T>()?;

        match schema.status_column() {
            Some(status_column) => {
                let predicate =
                    SqlGenerator::visible_predicate(self.dialect(), status_column, predicate);
                let mut args = args.to_vec();
                args.push(StatusCode::Deleted.into());
                self.mapper.select_where::<T>(&predicate, &args).await
            }
            None => self.mapper.select_where::<T>(predicate, args).await,
        }
    }

    /// The single record matching `predicate`, `None` when nothing matches.
    /// More than one match fails with [`DataStoreError::AmbiguousResult`].
    pub async fn get<T: Record>(
        &self,
        predicate: &str,
        args: &[SqlValue],
    ) -> Result<Option<T>, DataStoreError> {
        let mut records = self.select::<T>(predicate, args).await?;
        match records.len() {
            0 | 1 => Ok(records.pop()),
            count => Err(DataStoreError::AmbiguousResult {
                table: self.table_name::<T>(),
                count,
            }),
        }
    }

    fn table_name<T: Record>(&self) -> String {
        self.mapper
            .schema::<T>()
            .map(|schema| schema.table().to_string())
            .unwrap_or_else(|_| std::any::type_name::<T>().to_string())
    }

    fn rollback<T: Record>(
        &self,
        record: &mut T,
        journal: FieldJournal,
        operation: &'static str,
        error: &DataStoreError,
    ) {
        if journal.is_empty() {
            return;
        }
        tracing::warn!(
            "{} of {} failed, restoring record fields: {}",
            operation,
            self.table_name::<T>(),
            error
        );
        journal.revert(record);
    }
}

fn join_keys(keys: &[SqlValue]) -> String {
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
