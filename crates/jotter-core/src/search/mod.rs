//! Full-text search index for Jotter
//!
//! Notes are indexed explicitly through [`SearchIndex::upsert`] after every
//! edit; queries go through `NoteRepository::search`, which joins the
//! `notes_fts` table built here.

use rusqlite::{params, Connection};

use crate::error::Result;
use crate::models::Note;

/// Keeps a note's entry in the full-text index current
pub trait SearchIndex {
    /// Insert or replace the index entry for `note`
    fn upsert(&self, note: &Note) -> Result<()>;
}

/// `SQLite` FTS5 implementation of `SearchIndex`
pub struct SqliteSearchIndex<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteSearchIndex<'a> {
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Number of indexed entries for `note`, at most one when upserts are used
    pub fn entry_count(&self, note: &Note) -> Result<usize> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM notes_fts WHERE note_id = ?",
            params![note.id.as_str()],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

impl SearchIndex for SqliteSearchIndex<'_> {
    fn upsert(&self, note: &Note) -> Result<()> {
        let id = note.id.as_str();
        self.conn
            .execute("DELETE FROM notes_fts WHERE note_id = ?", params![id])?;
        if !note.is_deleted {
            self.conn.execute(
                "INSERT INTO notes_fts (note_id, content) VALUES (?, ?)",
                params![id, note.content],
            )?;
        }
        tracing::debug!("Indexed note {id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, NoteRepository, NoteStore, SqliteNoteRepository};

    #[test]
    fn upsert_replaces_previous_entry() {
        let db = Database::open_in_memory().unwrap();
        let repo = SqliteNoteRepository::new(db.connection());
        let index = SqliteSearchIndex::new(db.connection());

        let mut note = repo.create("apples and pears").unwrap();
        index.upsert(&note).unwrap();

        note.content = "bananas only".to_string();
        repo.save(&note).unwrap();
        index.upsert(&note).unwrap();

        assert_eq!(index.entry_count(&note).unwrap(), 1);
        assert!(repo.search("apples", 10).unwrap().is_empty());
        assert_eq!(repo.search("bananas", 10).unwrap().len(), 1);
    }

    #[test]
    fn upsert_drops_deleted_notes() {
        let db = Database::open_in_memory().unwrap();
        let index = SqliteSearchIndex::new(db.connection());

        let mut note = Note::new("ephemeral");
        index.upsert(&note).unwrap();
        note.is_deleted = true;
        index.upsert(&note).unwrap();

        assert_eq!(index.entry_count(&note).unwrap(), 0);
    }
}
