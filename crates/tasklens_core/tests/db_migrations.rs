use rusqlite::Connection;
use tasklens_core::db::migrations::latest_version;
use tasklens_core::db::{open_db, open_db_in_memory, DbError};
use tasklens_core::{KeyValueRepository, RepoError, SqliteKeyValueRepository};

#[test]
fn open_db_in_memory_creates_kv_store() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_store");
}

#[test]
fn reopening_a_file_database_keeps_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasklens.db");

    let first = open_db(&path).unwrap();
    SqliteKeyValueRepository::try_new(&first)
        .unwrap()
        .set("greeting", "hello")
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second), latest_version());
    let repo = SqliteKeyValueRepository::try_new(&second).unwrap();
    assert_eq!(repo.get("greeting").unwrap().as_deref(), Some("hello"));

    repo.set("greeting", "bye").unwrap();
    assert_eq!(repo.get("greeting").unwrap().as_deref(), Some("bye"));
    repo.remove("greeting").unwrap();
    assert_eq!(repo.get("greeting").unwrap(), None);
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unmigrated_connection_is_refused_by_repository() {
    let conn = Connection::open_in_memory().unwrap();
    match SqliteKeyValueRepository::try_new(&conn) {
        Err(RepoError::SchemaNotReady { found, required }) => {
            assert_eq!(found, 0);
            assert_eq!(required, latest_version());
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("unmigrated connection must be refused"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
