use std::path::Path;

use jotter_core::config::MenuConfig;
use jotter_core::db::{Database, NoteStore, SqliteNoteRepository};
use jotter_core::options::{OptionsController, Section};
use jotter_core::search::SqliteSearchIndex;

use crate::commands::common::{load_menu_config, open_database, print_sections, resolve_note};
use crate::commands::menu::terminal_services;
use crate::error::CliError;
use crate::terminal::TerminalSurface;

/// Apply a publish-link change coming from the backend and re-render the menu.
///
/// This is an external update: it is persisted as-is, without the edit
/// bookkeeping the options menu performs for user changes.
pub fn record_link(
    db: &Database,
    config: MenuConfig,
    id: &str,
    suffix: Option<&str>,
) -> Result<Vec<Section>, CliError> {
    let repo = SqliteNoteRepository::new(db.connection());
    let index = SqliteSearchIndex::new(db.connection());
    let surface = TerminalSurface::default();
    let note = resolve_note(&repo, id)?;

    let mut controller =
        OptionsController::new(note, config, terminal_services(&repo, &index, &surface));
    controller.note_mut().publish_url = suffix.map(str::trim).unwrap_or_default().to_string();
    repo.save(controller.note())?;
    controller.did_receive_note_update();

    Ok(controller.sections().to_vec())
}

pub fn run_link(
    id: &str,
    suffix: Option<&str>,
    db_path: &Path,
    config_path: Option<&Path>,
) -> Result<(), CliError> {
    let config = load_menu_config(config_path)?;
    let db = open_database(db_path)?;
    let sections = record_link(&db, config, id, suffix)?;
    print_sections(&sections, false)
}
