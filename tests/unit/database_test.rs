//! Unit tests for the Markstash database layer (connection + migrations).

use markstash::database::migrations;
use markstash::database::Database;

#[test]
fn test_open_in_memory_succeeds() {
    let db = Database::open_in_memory();
    assert!(db.is_ok(), "open_in_memory should succeed");
}

#[test]
fn test_migrations_create_all_tables() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let conn = db.connection();

    let expected_tables = ["bookmarks", "auth_sessions", "schema_version"];

    for table in &expected_tables {
        let exists: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name=?1",
                [table],
                |row| row.get(0),
            )
            .unwrap_or(false);
        assert!(exists, "Table '{}' should exist after migrations", table);
    }
}

#[test]
fn test_migrations_create_indexes() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let conn = db.connection();

    let exists: bool = conn
        .query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='index' AND name='idx_bookmarks_user_created'",
            [],
            |row| row.get(0),
        )
        .unwrap_or(false);
    assert!(exists, "Bookmark user/created index should exist after migrations");
}

#[test]
fn test_migrations_are_idempotent() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    // Running migrations a second time should not fail
    let result = migrations::run_all(db.connection());
    assert!(result.is_ok(), "Running migrations twice should succeed (idempotent)");
}

#[test]
fn test_schema_version_recorded() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let version = migrations::get_schema_version(db.connection());
    assert_eq!(version, migrations::CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_open_file_database() {
    let dir = tempfile::tempdir().expect("tempdir failed");
    let db_path = dir.path().join("test.db");

    let db = Database::open(&db_path);
    assert!(db.is_ok(), "open with file path should succeed");
    assert!(db_path.exists(), "Database file should exist on disk");
}

#[test]
fn test_bookmarks_table_schema() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let conn = db.connection();

    conn.execute(
        "INSERT INTO bookmarks (id, user_id, title, url, created_at)
         VALUES (?1, ?2, ?3, ?4, 1700000000)",
        ["bk-1", "user-1", "Example", "https://example.com"],
    )
    .expect("Should be able to insert into bookmarks table");

    let (user_id, url): (String, String) = conn
        .query_row(
            "SELECT user_id, url FROM bookmarks WHERE id = ?1",
            ["bk-1"],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .expect("Should be able to query bookmarks");

    assert_eq!(user_id, "user-1");
    assert_eq!(url, "https://example.com");
}

#[test]
fn test_auth_sessions_table_schema() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let conn = db.connection();

    conn.execute(
        "INSERT INTO auth_sessions (id, encrypted_session, iv, auth_tag, updated_at)
         VALUES ('current', X'AABBCCDD', X'1122', X'3344', 1700000000)",
        [],
    )
    .expect("Should insert into auth_sessions");

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM auth_sessions", [], |row| row.get(0))
        .expect("Should query auth_sessions");
    assert_eq!(count, 1);
}
