use std::path::Path;

use jotter_core::db::{NoteRepository, SqliteNoteRepository};

use crate::commands::common::{format_note_lines, note_to_list_item, open_database, NoteListItem};
use crate::error::CliError;

pub fn run_list(limit: usize, as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path)?;
    let notes = SqliteNoteRepository::new(db.connection()).list(limit, 0)?;

    if as_json {
        let json_items = notes
            .iter()
            .map(note_to_list_item)
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        for line in format_note_lines(&notes) {
            println!("{line}");
        }
    }

    Ok(())
}
