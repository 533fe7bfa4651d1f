use std::path::Path;

use jotter_core::db::{NoteRepository, SqliteNoteRepository};

use crate::commands::common::{
    format_note_lines, normalize_search_query, note_to_list_item, open_database, NoteListItem,
};
use crate::error::CliError;

pub fn run_search(query: &str, limit: usize, as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let normalized_query = normalize_search_query(query)?;
    let db = open_database(db_path)?;
    let notes = SqliteNoteRepository::new(db.connection()).search(&normalized_query, limit)?;

    if as_json {
        let json_items = notes
            .iter()
            .map(note_to_list_item)
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if notes.is_empty() {
        println!("No notes match '{normalized_query}'");
    } else {
        for line in format_note_lines(&notes) {
            println!("{line}");
        }
    }

    Ok(())
}
