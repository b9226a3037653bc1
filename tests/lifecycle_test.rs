//! Integration tests for the record lifecycle
//!
//! Insert, update, delete and reactivation of soft-deletable records,
//! visibility filtering and rollback, against in-memory SQLite.

use chrono::{DateTime, Utc};
use codewiz::datastore::clock::now_utc;
use codewiz::prelude::*;

const CREATE_TEST_TABLE: &str = "CREATE TABLE Test (
    ID INTEGER PRIMARY KEY,
    Status INTEGER NOT NULL,
    CreationTime DATETIME,
    LastModified DATETIME,
    DeletionTime DATETIME,
    Name VARCHAR(255),
    Value INTEGER CHECK (Value > 0)
)";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct TestRecord {
    #[serde(flatten)]
    base: BaseRecord,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Value")]
    value: i64,
}

impl Record for TestRecord {
    fn columns() -> Vec<Column> {
        let mut columns = BaseRecord::columns();
        columns.push(Column::text("Name"));
        columns.push(Column::integer("Value"));
        columns
    }

    codewiz::datastore::delegate_base_record!(base);
}

fn record(name: &str, value: i64) -> TestRecord {
    TestRecord {
        name: name.to_string(),
        value,
        ..Default::default()
    }
}

async fn setup_store() -> DataStore {
    let mut store = DataStore::open("sqlite3", "sqlite::memory:")
        .await
        .expect("in-memory SQLite should open");
    store
        .mapper()
        .store()
        .execute(CREATE_TEST_TABLE, &[])
        .await
        .expect("test table should be created");
    store.register_type::<TestRecord>("Test").unwrap();
    store
}

/// Rows regardless of status, straight from the raw mapper
async fn raw_rows(store: &DataStore, predicate: &str, args: &[SqlValue]) -> Vec<TestRecord> {
    store
        .mapper()
        .select_where::<TestRecord>(predicate, args)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_insert_fresh_record() {
    let store = setup_store().await;
    let mut r = record("ABC", 20);

    store.insert(&mut r).await.unwrap();

    assert_eq!(r.base.status, StatusCode::Active);
    assert!(r.base.id != INVALID_ID);
    let created = r.base.creation_time.expect("creation time stamped");
    assert_eq!(r.base.last_modified, Some(created));
    assert!(r.base.deletion_time.is_none());

    let stored: TestRecord = store.get("ID = ?", &[r.base.id.into()]).await.unwrap().unwrap();
    assert_eq!(stored, r);
}

#[tokio::test]
async fn test_insert_twice_is_duplicate_active_key() {
    let store = setup_store().await;
    let mut r = record("ABC", 20);
    store.insert(&mut r).await.unwrap();
    let after_first = r.clone();

    let err = store.insert(&mut r).await.unwrap_err();

    assert!(matches!(err, DataStoreError::DuplicateActiveKey { .. }));
    assert_eq!(r, after_first);
    assert_eq!(raw_rows(&store, "", &[]).await.len(), 1);
}

#[tokio::test]
async fn test_insert_reactivates_deleted_row() {
    let store = setup_store().await;

    let mut persisted = record("ABC", 20);
    persisted.base.status = StatusCode::Deleted;
    persisted.base.deletion_time = Some(now_utc());
    store.mapper().insert(&mut persisted).await.unwrap();
    let key = persisted.base.id;
    assert!(key != INVALID_ID);

    let mut incoming = record("ABC", 25);
    incoming.base.id = key;
    store.insert(&mut incoming).await.unwrap();

    assert_eq!(incoming.base.id, key);
    assert_eq!(incoming.base.status, StatusCode::Active);

    let rows = raw_rows(&store, "ID = ?", &[key.into()]).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].base.status, StatusCode::Active);
    assert_eq!(rows[0].value, 25);
}

#[tokio::test]
async fn test_reactivation_clears_deletion_time() {
    let store = setup_store().await;
    let mut r = record("ABC", 20);
    store.insert(&mut r).await.unwrap();
    store.delete(&mut r).await.unwrap();
    assert!(r.base.deletion_time.is_some());

    store.insert(&mut r).await.unwrap();

    assert_eq!(r.base.status, StatusCode::Active);
    assert!(r.base.deletion_time.is_none());
    let stored: TestRecord = store.get("ID = ?", &[r.base.id.into()]).await.unwrap().unwrap();
    assert!(stored.base.deletion_time.is_none());
}

#[tokio::test]
async fn test_delete_hides_record_from_select() {
    let store = setup_store().await;
    let mut r = record("ABC", 20);
    store.insert(&mut r).await.unwrap();

    let before_delete = now_utc();
    store.delete(&mut r).await.unwrap();

    assert_eq!(r.base.status, StatusCode::Deleted);
    assert!(r.base.deletion_time.unwrap() >= before_delete);

    let visible: Vec<TestRecord> = store.select("WHERE Value = 20", &[]).await.unwrap();
    assert!(visible.is_empty());
    assert!(store.get::<TestRecord>("Value = ?", &[20.into()]).await.unwrap().is_none());

    let raw = raw_rows(&store, "Value = 20", &[]).await;
    assert_eq!(raw.len(), 1);
    assert_eq!(raw[0].base.status, StatusCode::Deleted);
}

#[tokio::test]
async fn test_deleted_rows_stay_hidden_behind_or_predicates() {
    let store = setup_store().await;
    let mut kept = record("kept", 1);
    let mut gone = record("gone", 2);
    store.insert(&mut kept).await.unwrap();
    store.insert(&mut gone).await.unwrap();
    store.delete(&mut gone).await.unwrap();

    let rows: Vec<TestRecord> = store
        .select("Name = ? OR Name = ?", &["kept".into(), "gone".into()])
        .await
        .unwrap();
    assert_eq!(rows, vec![kept.clone()]);

    let all: Vec<TestRecord> = store.select("", &[]).await.unwrap();
    assert_eq!(all, vec![kept]);
}

#[tokio::test]
async fn test_update_refreshes_last_modified_only() {
    let store = setup_store().await;
    let mut r = record("ABC", 20);
    store.insert(&mut r).await.unwrap();
    let created = r.base.creation_time;
    let mut previous: DateTime<Utc> = r.base.last_modified.unwrap();

    for value in 21..24 {
        r.value = value;
        store.update(&mut r).await.unwrap();

        let modified = r.base.last_modified.unwrap();
        assert!(modified >= previous);
        assert!(modified >= created.unwrap());
        previous = modified;
    }

    assert_eq!(r.base.status, StatusCode::Active);
    assert_eq!(r.base.creation_time, created);
    let stored: TestRecord = store.get("ID = ?", &[r.base.id.into()]).await.unwrap().unwrap();
    assert_eq!(stored.value, 23);
    assert_eq!(stored.base.last_modified, Some(previous));
}

#[tokio::test]
async fn test_update_of_missing_row_is_no_rows_affected() {
    let store = setup_store().await;
    let mut r = record("ghost", 20);
    r.base.id = 4242;
    r.base.last_modified = None;

    let err = store.update(&mut r).await.unwrap_err();

    assert!(matches!(err, DataStoreError::NoRowsAffected { ref table } if table == "Test"));
    assert!(r.base.last_modified.is_none());
}

#[tokio::test]
async fn test_failed_update_restores_last_modified() {
    let store = setup_store().await;
    let mut r = record("ABC", 20);
    store.insert(&mut r).await.unwrap();
    let modified = r.base.last_modified;

    r.value = -5;
    let err = store.update(&mut r).await.unwrap_err();

    assert!(err.driver_error().is_some());
    assert_eq!(r.base.last_modified, modified);
}

#[tokio::test]
async fn test_failed_insert_restores_fields() {
    let store = setup_store().await;
    let mut r = record("ABC", -1);
    let before = r.clone();

    assert!(store.insert(&mut r).await.is_err());

    assert_eq!(r, before);
}

#[tokio::test]
async fn test_failed_delete_restores_fields() {
    let store = setup_store().await;
    let mut r = record("ghost", 20);
    r.base.id = 77;
    let before = r.clone();

    let err = store.delete(&mut r).await.unwrap_err();

    assert!(matches!(err, DataStoreError::NoRowsAffected { .. }));
    assert_eq!(r, before);
}

#[tokio::test]
async fn test_get_with_several_matches_is_ambiguous() {
    let store = setup_store().await;
    for name in ["a", "b", "c"] {
        store.insert(&mut record(name, 10)).await.unwrap();
    }

    let err = store
        .get::<TestRecord>("Value = ?", &[10.into()])
        .await
        .unwrap_err();

    assert!(matches!(err, DataStoreError::AmbiguousResult { count: 3, .. }));
}

#[tokio::test]
async fn test_get_without_match_is_none() {
    let store = setup_store().await;
    let found = store
        .get::<TestRecord>("Name = ?", &["nobody".into()])
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_register_type_again_rebinds_table() {
    let mut store = setup_store().await;
    store
        .mapper()
        .store()
        .execute(
            "CREATE TABLE Archive (ID INTEGER PRIMARY KEY, Status INTEGER NOT NULL, \
             CreationTime DATETIME, LastModified DATETIME, DeletionTime DATETIME, \
             Name VARCHAR(255), Value INTEGER)",
            &[],
        )
        .await
        .unwrap();

    store.register_type::<TestRecord>("Archive").unwrap();
    store.insert(&mut record("moved", 3)).await.unwrap();

    assert_eq!(store.mapper().tables(), vec!["Archive"]);
    assert_eq!(
        store.mapper().schema::<TestRecord>().unwrap().table(),
        "Archive"
    );
    assert!(raw_rows(&store, "", &[]).await.len() == 1);
}
