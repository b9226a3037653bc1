//! Integration tests for records that implement only some capabilities
//!
//! The engine checks each capability on its own, so records without a
//! status, without timestamps, or with a composite key must all behave.

use chrono::{DateTime, Utc};
use codewiz::prelude::*;

async fn store_with(ddl: &str) -> DataStore {
    let store = DataStore::open("sqlite", "sqlite::memory:").await.unwrap();
    store.mapper().store().execute(ddl, &[]).await.unwrap();
    store
}

/// No capabilities at all
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Note {
    #[serde(rename = "Slug")]
    slug: String,
    #[serde(rename = "Body")]
    body: String,
}

impl Record for Note {
    fn columns() -> Vec<Column> {
        vec![Column::key("Slug", ColumnKind::Text), Column::text("Body")]
    }
}

#[tokio::test]
async fn test_plain_record_is_persisted_as_is() {
    let mut store =
        store_with("CREATE TABLE Notes (Slug VARCHAR(64) PRIMARY KEY, Body TEXT)").await;
    store.register_type::<Note>("Notes").unwrap();
    assert!(!store.mapper().schema::<Note>().unwrap().is_logically_deletable());

    let mut note = Note {
        slug: "spells".to_string(),
        body: "fireball".to_string(),
    };
    store.insert(&mut note).await.unwrap();

    // no lookup guards the insert; the store's own key constraint rejects it
    let err = store.insert(&mut note.clone()).await.unwrap_err();
    assert!(err.driver_error().is_some());

    // without a status there is nothing to mark, so the row stays visible
    store.delete(&mut note).await.unwrap();
    let found: Option<Note> = store.get("Slug = ?", &["spells".into()]).await.unwrap();
    assert_eq!(found, Some(note));
}

/// Audit timestamps without a status
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Counter {
    #[serde(rename = "ID")]
    id: u64,
    #[serde(rename = "Hits")]
    hits: i64,
    #[serde(rename = "Created")]
    created: Option<DateTime<Utc>>,
    #[serde(rename = "Touched")]
    touched: Option<DateTime<Utc>>,
}

impl CreationTimeRecorder for Counter {
    fn creation_time(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    fn set_creation_time(&mut self, time: Option<DateTime<Utc>>) {
        self.created = time;
    }
}

impl LastUpdateTimeRecorder for Counter {
    fn last_update_time(&self) -> Option<DateTime<Utc>> {
        self.touched
    }

    fn set_last_update_time(&mut self, time: Option<DateTime<Utc>>) {
        self.touched = time;
    }
}

impl Record for Counter {
    fn columns() -> Vec<Column> {
        vec![
            Column::auto_key("ID"),
            Column::integer("Hits"),
            Column::timestamp("Created"),
            Column::timestamp("Touched"),
        ]
    }

    fn set_generated_key(&mut self, key: u64) {
        self.id = key;
    }

    fn as_creation_time_recorder(&mut self) -> Option<&mut dyn CreationTimeRecorder> {
        Some(self)
    }

    fn as_last_update_time_recorder(&mut self) -> Option<&mut dyn LastUpdateTimeRecorder> {
        Some(self)
    }
}

#[tokio::test]
async fn test_timestamps_without_status() {
    let mut store = store_with(
        "CREATE TABLE Counters (ID INTEGER PRIMARY KEY, Hits INTEGER, Created DATETIME, Touched DATETIME)",
    )
    .await;
    store.register_type::<Counter>("Counters").unwrap();

    let mut counter = Counter::default();
    store.insert(&mut counter).await.unwrap();
    assert_eq!(counter.id, 1);
    assert!(counter.created.is_some());
    assert_eq!(counter.created, counter.touched);

    counter.hits = 3;
    store.update(&mut counter).await.unwrap();
    assert!(counter.touched >= counter.created);

    let stored: Counter = store.get("ID = ?", &[1.into()]).await.unwrap().unwrap();
    assert_eq!(stored, counter);
}

/// Composite key and a status, no timestamps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Grant {
    #[serde(rename = "Owner")]
    owner: i64,
    #[serde(rename = "Scope")]
    scope: String,
    #[serde(rename = "State")]
    state: StatusCode,
}

impl StatusRecorder for Grant {
    fn status(&self) -> StatusCode {
        self.state
    }

    fn set_status(&mut self, status: StatusCode) {
        self.state = status;
    }
}

impl LogicallyDeletable for Grant {
    fn keys(&self) -> Vec<SqlValue> {
        vec![self.owner.into(), self.scope.as_str().into()]
    }

    fn status_column(&self) -> &'static str {
        "State"
    }
}

impl Record for Grant {
    fn columns() -> Vec<Column> {
        vec![
            Column::key("Owner", ColumnKind::Integer),
            Column::key("Scope", ColumnKind::Text),
            Column::integer("State"),
        ]
    }

    fn as_status_recorder(&mut self) -> Option<&mut dyn StatusRecorder> {
        Some(self)
    }

    fn as_logically_deletable(&self) -> Option<&dyn LogicallyDeletable> {
        Some(self)
    }
}

fn grant(owner: i64, scope: &str) -> Grant {
    Grant {
        owner,
        scope: scope.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_composite_key_lifecycle() {
    let mut store = store_with(
        "CREATE TABLE Grants (Owner INTEGER, Scope TEXT, State INTEGER NOT NULL, PRIMARY KEY (Owner, Scope))",
    )
    .await;
    store.register_type::<Grant>("Grants").unwrap();

    let mut read = grant(1, "read");
    store.insert(&mut read).await.unwrap();
    store.insert(&mut grant(1, "write")).await.unwrap();
    assert_eq!(read.state, StatusCode::Active);

    let err = store.insert(&mut grant(1, "read")).await.unwrap_err();
    match err {
        DataStoreError::DuplicateActiveKey { table, keys } => {
            assert_eq!(table, "Grants");
            assert_eq!(keys, "1, 'read'");
        }
        other => panic!("expected duplicate active key, got {:?}", other),
    }

    store.delete(&mut read).await.unwrap();
    let visible: Vec<Grant> = store.select("Owner = ?", &[1.into()]).await.unwrap();
    assert_eq!(visible, vec![Grant { state: StatusCode::Active, ..grant(1, "write") }]);

    let mut again = grant(1, "read");
    store.insert(&mut again).await.unwrap();
    let visible: Vec<Grant> = store.select("Owner = ?", &[1.into()]).await.unwrap();
    assert_eq!(visible.len(), 2);
}

/// Embeds the base record but keeps no deletion time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Ledger {
    #[serde(flatten)]
    base: BaseRecord,
    #[serde(rename = "Entry")]
    entry: String,
}

impl Record for Ledger {
    fn columns() -> Vec<Column> {
        let mut columns = BaseRecord::columns();
        columns.push(Column::text("Entry"));
        columns
    }

    fn set_generated_key(&mut self, key: u64) {
        self.base.id = key;
    }

    fn as_status_recorder(&mut self) -> Option<&mut dyn StatusRecorder> {
        Some(&mut self.base)
    }

    fn as_creation_time_recorder(&mut self) -> Option<&mut dyn CreationTimeRecorder> {
        Some(&mut self.base)
    }

    fn as_last_update_time_recorder(&mut self) -> Option<&mut dyn LastUpdateTimeRecorder> {
        Some(&mut self.base)
    }

    fn as_logically_deletable(&self) -> Option<&dyn LogicallyDeletable> {
        Some(&self.base)
    }
}

#[tokio::test]
async fn test_shadowed_accessor_changes_behavior() {
    let mut store = store_with(
        "CREATE TABLE Ledger (ID INTEGER PRIMARY KEY, Status INTEGER NOT NULL, \
         CreationTime DATETIME, LastModified DATETIME, DeletionTime DATETIME, Entry TEXT)",
    )
    .await;
    store.register_type::<Ledger>("Ledger").unwrap();

    let mut entry = Ledger {
        entry: "opening balance".to_string(),
        ..Default::default()
    };
    store.insert(&mut entry).await.unwrap();
    store.delete(&mut entry).await.unwrap();

    assert_eq!(entry.base.status, StatusCode::Deleted);
    assert!(entry.base.deletion_time.is_none());

    let raw = store
        .mapper()
        .find_by_keys::<Ledger>(&[entry.base.id.into()])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(raw.base.status, StatusCode::Deleted);
    assert!(raw.base.deletion_time.is_none());
}

#[tokio::test]
async fn test_key_count_must_match_schema() {
    let mut store = store_with(
        "CREATE TABLE Grants (Owner INTEGER, Scope TEXT, State INTEGER NOT NULL, PRIMARY KEY (Owner, Scope))",
    )
    .await;
    store.register_type::<Grant>("Grants").unwrap();

    let err = store
        .mapper()
        .find_by_keys::<Grant>(&[1.into()])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DataStoreError::KeyMismatch {
            expected: 2,
            found: 1,
            ..
        }
    ));
}

#[tokio::test]
async fn test_invalid_registration_is_rejected() {
    let mut store = DataStore::open("sqlite3", "sqlite::memory:").await.unwrap();
    let err = store.register_type::<Note>("Notes; DROP TABLE Users").unwrap_err();
    assert!(matches!(err, DataStoreError::InvalidSchema { .. }));
    assert!(store.mapper().tables().is_empty());
}

#[tokio::test]
async fn test_transient_row_is_not_treated_as_active() {
    let mut store = store_with(
        "CREATE TABLE Grants (Owner INTEGER, Scope TEXT, State INTEGER NOT NULL, PRIMARY KEY (Owner, Scope))",
    )
    .await;
    store.register_type::<Grant>("Grants").unwrap();

    // written around the lifecycle, so the row keeps the transient status
    let mut stray = grant(2, "read");
    store.mapper().insert(&mut stray).await.unwrap();

    let mut again = grant(2, "read");
    let err = store.insert(&mut again).await.unwrap_err();
    assert!(!matches!(err, DataStoreError::DuplicateActiveKey { .. }));
    assert!(err.driver_error().is_some());
    assert_eq!(again.state, StatusCode::Transient);
}
