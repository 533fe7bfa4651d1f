//! Note repository implementation

#![allow(clippy::cast_possible_wrap)] // SQLite uses i64 for LIMIT/OFFSET

use crate::error::{Error, Result};
use crate::models::{CollaboratorTags, Note, NoteId};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

/// Persistence sink used by the options menu after every note mutation
pub trait NoteStore {
    /// Persist the full state of `note`
    fn save(&self, note: &Note) -> Result<()>;
}

/// Trait for note storage operations
pub trait NoteRepository: NoteStore {
    /// Create a new note
    fn create(&self, content: &str) -> Result<Note>;

    /// Get a note by ID
    fn get(&self, id: &NoteId) -> Result<Option<Note>>;

    /// Resolve a note from a full ID or a unique ID prefix
    fn find_by_prefix(&self, prefix: &str) -> Result<Note>;

    /// List notes (excluding deleted), pinned first, then newest first
    fn list(&self, limit: usize, offset: usize) -> Result<Vec<Note>>;

    /// Soft delete a note
    fn delete(&self, id: &NoteId) -> Result<()>;

    /// Search notes by content using the full-text index
    fn search(&self, query: &str, limit: usize) -> Result<Vec<Note>>;
}

const NOTE_COLUMNS: &str = "id, content, preview, created_at, updated_at, is_deleted, \
                            pinned, markdown, published, publish_url, collaborators";

/// `SQLite` implementation of `NoteRepository`
pub struct SqliteNoteRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteNoteRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse a note from a database row selected with `NOTE_COLUMNS`
    fn parse_note(row: &rusqlite::Row<'_>) -> rusqlite::Result<Note> {
        let id: String = row.get(0)?;
        let collaborators: String = row.get(10)?;
        Ok(Note {
            id: id.parse().map_err(|e| conversion_error(0, e))?,
            content: row.get(1)?,
            preview: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
            is_deleted: row.get::<_, i32>(5)? != 0,
            pinned: row.get::<_, i32>(6)? != 0,
            markdown: row.get::<_, i32>(7)? != 0,
            published: row.get::<_, i32>(8)? != 0,
            publish_url: row.get(9)?,
            collaborators: serde_json::from_str::<CollaboratorTags>(&collaborators)
                .map_err(|e| conversion_error(10, e))?,
        })
    }

    fn insert(&self, note: &Note) -> Result<()> {
        let collaborators = serde_json::to_string(&note.collaborators)?;
        self.conn.execute(
            &format!(
                "INSERT INTO notes ({NOTE_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
            ),
            params![
                note.id.as_str(),
                note.content,
                note.preview,
                note.created_at,
                note.updated_at,
                i32::from(note.is_deleted),
                i32::from(note.pinned),
                i32::from(note.markdown),
                i32::from(note.published),
                note.publish_url,
                collaborators,
            ],
        )?;
        Ok(())
    }
}

fn conversion_error(
    column: usize,
    error: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(error))
}

impl NoteStore for SqliteNoteRepository<'_> {
    fn save(&self, note: &Note) -> Result<()> {
        let collaborators = serde_json::to_string(&note.collaborators)?;
        let rows = self.conn.execute(
            "UPDATE notes SET content = ?, preview = ?, updated_at = ?, pinned = ?, markdown = ?,
                              published = ?, publish_url = ?, collaborators = ?
             WHERE id = ? AND is_deleted = 0",
            params![
                note.content,
                note.preview,
                note.updated_at,
                i32::from(note.pinned),
                i32::from(note.markdown),
                i32::from(note.published),
                note.publish_url,
                collaborators,
                note.id.as_str(),
            ],
        )?;

        if rows == 0 {
            return Err(Error::NotFound(note.id.to_string()));
        }

        tracing::debug!("Saved note {}", note.id);
        Ok(())
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create(&self, content: &str) -> Result<Note> {
        let note = Note::new(content);
        self.insert(&note)?;
        Ok(note)
    }

    fn get(&self, id: &NoteId) -> Result<Option<Note>> {
        let note = self
            .conn
            .query_row(
                &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ? AND is_deleted = 0"),
                params![id.as_str()],
                Self::parse_note,
            )
            .optional()?;
        Ok(note)
    }

    fn find_by_prefix(&self, prefix: &str) -> Result<Note> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Err(Error::InvalidInput("Note ID cannot be empty".into()));
        }

        let mut stmt = self.conn.prepare(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes
             WHERE substr(id, 1, length(?1)) = ?1 AND is_deleted = 0
             LIMIT 2"
        ))?;
        let mut matches = stmt
            .query_map(params![prefix], Self::parse_note)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        match matches.len() {
            0 => Err(Error::NotFound(prefix.to_string())),
            1 => Ok(matches.remove(0)),
            _ => Err(Error::InvalidInput(format!("Note ID prefix '{prefix}' is ambiguous"))),
        }
    }

    fn list(&self, limit: usize, offset: usize) -> Result<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {NOTE_COLUMNS}
             FROM notes
             WHERE is_deleted = 0
             ORDER BY pinned DESC, updated_at DESC
             LIMIT ? OFFSET ?"
        ))?;

        let notes = stmt
            .query_map(params![limit as i64, offset as i64], Self::parse_note)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(notes)
    }

    fn delete(&self, id: &NoteId) -> Result<()> {
        let now = chrono::Utc::now().timestamp_millis();

        let rows = self.conn.execute(
            "UPDATE notes SET is_deleted = 1, updated_at = ? WHERE id = ? AND is_deleted = 0",
            params![now, id.as_str()],
        )?;

        if rows == 0 {
            return Err(Error::NotFound(id.to_string()));
        }

        self.conn.execute(
            "DELETE FROM notes_fts WHERE note_id = ?",
            params![id.as_str()],
        )?;

        Ok(())
    }

    fn search(&self, query: &str, limit: usize) -> Result<Vec<Note>> {
        if query.trim().is_empty() {
            return self.list(limit, 0);
        }

        let columns = NOTE_COLUMNS
            .split(", ")
            .map(|column| format!("n.{column}"))
            .collect::<Vec<_>>()
            .join(", ");
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {columns}
             FROM notes n
             JOIN notes_fts ON n.id = notes_fts.note_id
             WHERE notes_fts MATCH ? AND n.is_deleted = 0
             ORDER BY notes_fts.rank
             LIMIT ?"
        ))?;

        let notes = stmt
            .query_map(params![query, limit as i64], Self::parse_note)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(notes)
    }
}
