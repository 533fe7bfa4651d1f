//! Database migrations

use crate::error::Result;
use rusqlite::Connection;

/// Current schema version
const CURRENT_VERSION: i32 = 3;

/// Run all pending migrations
pub fn run(conn: &Connection) -> Result<()> {
    let version = get_version(conn)?;

    if version < 1 {
        apply(conn, 1, MIGRATION_V1)?;
    }
    if version < 2 {
        apply(conn, 2, MIGRATION_V2)?;
    }
    if version < 3 {
        apply(conn, 3, MIGRATION_V3)?;
    }

    Ok(())
}

/// Get the current schema version
fn get_version(conn: &Connection) -> Result<i32> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Run one migration script and record its version atomically
fn apply(conn: &Connection, version: i32, script: &str) -> Result<()> {
    let batch = format!(
        "BEGIN TRANSACTION;
         {script}
         INSERT INTO schema_version (version) VALUES ({version});
         COMMIT;"
    );

    if let Err(e) = conn.execute_batch(&batch) {
        conn.execute_batch("ROLLBACK").ok();
        return Err(e.into());
    }

    tracing::info!("Migrated database to version {version} (latest {CURRENT_VERSION})");
    Ok(())
}

/// Version 1: initial schema
const MIGRATION_V1: &str = "
    CREATE TABLE IF NOT EXISTS schema_version (
        version INTEGER PRIMARY KEY
    );
    CREATE TABLE IF NOT EXISTS notes (
        id TEXT PRIMARY KEY,
        content TEXT NOT NULL,
        preview TEXT NOT NULL DEFAULT '',
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL,
        is_deleted INTEGER NOT NULL DEFAULT 0
    );
    CREATE INDEX IF NOT EXISTS idx_notes_updated ON notes(updated_at DESC);
    CREATE INDEX IF NOT EXISTS idx_notes_deleted ON notes(is_deleted);
";

/// Version 2: options menu attributes
const MIGRATION_V2: &str = "
    ALTER TABLE notes ADD COLUMN pinned INTEGER NOT NULL DEFAULT 0;
    ALTER TABLE notes ADD COLUMN markdown INTEGER NOT NULL DEFAULT 0;
    ALTER TABLE notes ADD COLUMN published INTEGER NOT NULL DEFAULT 0;
    ALTER TABLE notes ADD COLUMN publish_url TEXT NOT NULL DEFAULT '';
    ALTER TABLE notes ADD COLUMN collaborators TEXT NOT NULL DEFAULT '[]';
";

/// Version 3: full-text search index, maintained explicitly by `SqliteSearchIndex`
const MIGRATION_V3: &str = "
    CREATE VIRTUAL TABLE IF NOT EXISTS notes_fts USING fts5(
        note_id UNINDEXED,
        content
    );
";
