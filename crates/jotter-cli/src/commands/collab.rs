use std::path::Path;

use jotter_core::config::MenuConfig;
use jotter_core::db::{Database, SqliteNoteRepository};
use jotter_core::options::{CollaboratorChanges, OptionsController};
use jotter_core::search::SqliteSearchIndex;
use jotter_core::Note;

use crate::cli::CollabCommands;
use crate::commands::common::{load_menu_config, open_database, resolve_note};
use crate::commands::menu::terminal_services;
use crate::error::CliError;
use crate::terminal::TerminalSurface;

pub fn add_collaborator(
    db: &Database,
    config: MenuConfig,
    id: &str,
    email: &str,
) -> Result<Note, CliError> {
    let repo = SqliteNoteRepository::new(db.connection());
    let index = SqliteSearchIndex::new(db.connection());
    let surface = TerminalSurface::default();
    let note = resolve_note(&repo, id)?;

    let mut controller =
        OptionsController::new(note, config, terminal_services(&repo, &index, &surface));
    if !controller.can_add_collaborator(email) {
        return Err(CliError::CollaboratorRejected(email.trim().to_string()));
    }
    controller.collaborator_added(email);
    Ok(controller.into_note())
}

/// Returns the note and whether `email` was a collaborator
pub fn remove_collaborator(
    db: &Database,
    config: MenuConfig,
    id: &str,
    email: &str,
) -> Result<(Note, bool), CliError> {
    let repo = SqliteNoteRepository::new(db.connection());
    let index = SqliteSearchIndex::new(db.connection());
    let surface = TerminalSurface::default();
    let note = resolve_note(&repo, id)?;
    let was_present = note.collaborators.contains(email);

    let mut controller =
        OptionsController::new(note, config, terminal_services(&repo, &index, &surface));
    controller.collaborator_removed(email);
    Ok((controller.into_note(), was_present))
}

pub fn run_collab(
    command: CollabCommands,
    db_path: &Path,
    config_path: Option<&Path>,
) -> Result<(), CliError> {
    let config = load_menu_config(config_path)?;
    let db = open_database(db_path)?;

    let note = match command {
        CollabCommands::Add { id, email } => add_collaborator(&db, config, &id, &email)?,
        CollabCommands::Remove { id, email } => {
            let (note, was_present) = remove_collaborator(&db, config, &id, &email)?;
            if !was_present {
                eprintln!("{} is not a collaborator on this note", email.trim());
            }
            note
        }
    };

    if note.collaborators.is_empty() {
        println!("Not shared with anyone");
    } else {
        for email in note.collaborators.iter() {
            println!("{email}");
        }
    }
    Ok(())
}
