use std::path::Path;

use jotter_core::config::MenuConfig;
use jotter_core::db::{Database, NoteRepository, SqliteNoteRepository};
use jotter_core::options::{OptionsController, RowId, Section};
use jotter_core::search::SqliteSearchIndex;
use jotter_core::Note;

use crate::commands::common::{
    format_timestamp, load_menu_config, open_database, print_sections, resolve_note,
};
use crate::commands::menu::terminal_services;
use crate::error::CliError;
use crate::terminal::TerminalSurface;

/// Result of tapping one menu row
#[derive(Debug)]
pub struct SelectOutcome {
    pub note: Note,
    pub sections: Vec<Section>,
    /// `false` when the row ignored the tap
    pub reacted: bool,
    pub messages: Vec<String>,
    pub trashed: bool,
}

pub fn select_row(
    db: &Database,
    config: MenuConfig,
    id: &str,
    row: RowId,
) -> Result<SelectOutcome, CliError> {
    let repo = SqliteNoteRepository::new(db.connection());
    let index = SqliteSearchIndex::new(db.connection());
    let surface = TerminalSurface::default();
    let note = resolve_note(&repo, id)?;

    let mut controller =
        OptionsController::new(note, config, terminal_services(&repo, &index, &surface));
    let reacted = controller.select(row);

    let mut messages = surface.describe();
    let sections = controller.sections().to_vec();
    let note = controller.into_note();

    if surface.wants_history() {
        messages.push(format!(
            "Created {}, last changed {}",
            format_timestamp(note.created_at),
            format_timestamp(note.updated_at)
        ));
    }

    let trashed = surface.wants_trash();
    if trashed {
        repo.delete(&note.id)?;
        messages.push(format!("Moved {} to trash", note.id));
    }

    Ok(SelectOutcome {
        note,
        sections,
        reacted,
        messages,
        trashed,
    })
}

pub fn run_select(
    id: &str,
    row: &str,
    as_json: bool,
    db_path: &Path,
    config_path: Option<&Path>,
) -> Result<(), CliError> {
    let row: RowId = row.parse()?;
    let config = load_menu_config(config_path)?;
    let db = open_database(db_path)?;

    let outcome = select_row(&db, config, id, row)?;
    tracing::debug!("Selected {row} on note {}", outcome.note.id);

    if !outcome.reacted {
        eprintln!("'{row}' is not available for this note right now");
    }
    for message in &outcome.messages {
        if as_json {
            eprintln!("{message}");
        } else {
            println!("{message}");
        }
    }
    if outcome.trashed {
        return Ok(());
    }

    if !as_json && !outcome.messages.is_empty() {
        println!();
    }
    print_sections(&outcome.sections, as_json)
}
