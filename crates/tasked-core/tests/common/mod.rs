#![allow(dead_code)]

use std::path::Path;

use rusqlite::Connection;
use tasked_core::{Database, PlannerBuilder};
use tempfile::{NamedTempFile, TempDir};

/// Helper function to create a temporary database for testing
pub fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

/// Helper function to create a test planner
pub async fn create_test_planner() -> (TempDir, tasked_core::Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// Opens a second, raw connection to inspect rows behind the store's back.
pub fn raw_connection(path: &Path) -> Connection {
    let conn = Connection::open(path).expect("Failed to open raw connection");
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .expect("Failed to enable foreign keys");
    conn
}

/// Number of rows in `table` belonging to `plan_id`.
pub fn rows_for_plan(conn: &Connection, table: &str, plan_id: &str) -> i64 {
    let column = if table == "plans" { "id" } else { "plan_id" };
    conn.query_row(
        &format!("SELECT COUNT(*) FROM {table} WHERE {column} = ?1"),
        [plan_id],
        |row| row.get(0),
    )
    .expect("Failed to count rows")
}
