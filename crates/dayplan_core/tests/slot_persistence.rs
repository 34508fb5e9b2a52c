use dayplan_core::db::migrations::{apply_migrations, latest_version};
use dayplan_core::db::{open_db, open_db_in_memory, DbError};
use dayplan_core::{
    SlotRepository, SqliteSlotRepository, TaskStore, DAY_MARKER_SLOT_KEY, TASKS_SLOT_KEY,
};
use rusqlite::Connection;

#[test]
fn open_applies_migrations_and_mirrors_user_version() {
    let conn = open_db_in_memory().unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
    assert!(latest_version() > 0);
}

#[test]
fn reapplying_migrations_is_a_noop() {
    let mut conn = open_db_in_memory().unwrap();
    apply_migrations(&mut conn).unwrap();
    apply_migrations(&mut conn).unwrap();
}

#[test]
fn newer_schema_versions_are_rejected() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA user_version = 99;").unwrap();

    let err = apply_migrations(&mut conn).unwrap_err();
    assert!(matches!(
        err,
        DbError::UnsupportedSchemaVersion {
            db_version: 99,
            ..
        }
    ));
}

#[test]
fn sqlite_slots_get_set_overwrite_and_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::new(&conn);

    assert_eq!(repo.get_slot("missing").unwrap(), None);

    repo.set_slot("k", "one").unwrap();
    repo.set_slot("k", "two").unwrap();
    assert_eq!(repo.get_slot("k").unwrap().as_deref(), Some("two"));

    repo.delete_slot("k").unwrap();
    assert_eq!(repo.get_slot("k").unwrap(), None);
}

#[test]
fn store_state_survives_a_database_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("dayplan.sqlite3");

    let saved = {
        let conn = open_db(&db_path).unwrap();
        let repo = SqliteSlotRepository::new(&conn);
        let mut store = TaskStore::new(repo);
        store.save_day_marker("2024-01-01").unwrap();
        store.set_task(9, "standup").unwrap();
        store.set_task(14, "Write report").unwrap();
        store.toggle_complete(14).unwrap();
        store.tasks().clone()
    };

    let conn = open_db(&db_path).unwrap();
    let repo = SqliteSlotRepository::new(&conn);
    let mut store = TaskStore::new(repo);
    let marker = store.load();

    assert_eq!(marker.as_deref(), Some("2024-01-01"));
    assert_eq!(store.tasks(), &saved);
    assert!(store.task(14).unwrap().completed);
}

#[test]
fn persisted_blob_uses_the_documented_slot_keys_and_shape() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::new(&conn);
    {
        let mut store = TaskStore::new(&repo);
        store.set_task(14, "Write report").unwrap();
        store.save_day_marker("2024-01-01").unwrap();
    }

    let blob = repo.get_slot(TASKS_SLOT_KEY).unwrap().unwrap();
    assert_eq!(blob, r#"{"14":{"text":"Write report","completed":false}}"#);
    assert_eq!(
        repo.get_slot(DAY_MARKER_SLOT_KEY).unwrap().as_deref(),
        Some("2024-01-01")
    );
}
