use std::path::Path;

use jotter_core::analytics::TracingAnalytics;
use jotter_core::db::{Database, SqliteNoteRepository};
use jotter_core::options::{publish_link, render, Section, Services};
use jotter_core::search::SqliteSearchIndex;
use jotter_core::Note;

use crate::commands::common::{
    format_timestamp, load_menu_config, open_database, print_sections, resolve_note,
};
use crate::error::CliError;
use crate::terminal::TerminalSurface;

/// Wire the terminal front-end and `SQLite` services into an options controller
pub fn terminal_services<'a>(
    repo: &'a SqliteNoteRepository<'_>,
    index: &'a SqliteSearchIndex<'_>,
    surface: &'a TerminalSurface,
) -> Services<'a> {
    Services {
        store: repo,
        index,
        analytics: &TracingAnalytics,
        delegate: surface,
        host: surface,
    }
}

pub fn load_menu(db: &Database, id: &str) -> Result<(Note, Vec<Section>), CliError> {
    let repo = SqliteNoteRepository::new(db.connection());
    let note = resolve_note(&repo, id)?;
    let sections = render(&note);
    Ok((note, sections))
}

pub fn run_menu(
    id: &str,
    as_json: bool,
    db_path: &Path,
    config_path: Option<&Path>,
) -> Result<(), CliError> {
    let config = load_menu_config(config_path)?;
    let db = open_database(db_path)?;
    let (note, sections) = load_menu(&db, id)?;

    if !as_json {
        println!("{}  (updated {})", note.id, format_timestamp(note.updated_at));
        if let Some(url) = publish_link(&config.publish_base_url, &note.publish_url) {
            println!("Public link: {url}");
        }
        println!();
    }
    print_sections(&sections, as_json)
}
