use std::path::Path;

use jotter_core::db::{NoteRepository, SqliteNoteRepository};
use jotter_core::search::{SearchIndex, SqliteSearchIndex};

use crate::commands::common::{open_database, resolve_note_content};
use crate::error::CliError;

pub fn run_add(content_parts: &[String], db_path: &Path) -> Result<(), CliError> {
    let content = resolve_note_content(content_parts)?;

    let db = open_database(db_path)?;
    let repo = SqliteNoteRepository::new(db.connection());
    let note = repo.create(&content)?;
    SqliteSearchIndex::new(db.connection()).upsert(&note)?;

    println!("{}", note.id);
    Ok(())
}
