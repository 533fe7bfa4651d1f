use std::env;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use chrono::Utc;
use jotter_core::config::MenuConfig;
use jotter_core::db::{Database, NoteRepository, SqliteNoteRepository};
use jotter_core::options::{Row, RowStyle, Section};
use jotter_core::Note;
use serde::Serialize;

use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub relative_time: String,
    pub pinned: bool,
    pub published: bool,
    pub collaborators: Vec<String>,
}

pub fn open_database(db_path: &Path) -> Result<Database, CliError> {
    Ok(Database::open(db_path)?)
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    if let Some(path) = cli_db_path.or_else(|| env::var_os("JOTTER_DB_PATH").map(PathBuf::from)) {
        return Ok(path);
    }
    default_db_path()
}

pub fn default_db_path() -> Result<PathBuf, CliError> {
    dirs::data_dir()
        .map(|dir| dir.join("jotter").join("jotter.db"))
        .ok_or(CliError::NoDataDir)
}

/// Config path from `--config`, `JOTTER_CONFIG`, or the user config directory
pub fn resolve_config_path(cli_config: Option<PathBuf>) -> Option<PathBuf> {
    cli_config
        .or_else(|| env::var_os("JOTTER_CONFIG").map(PathBuf::from))
        .or_else(|| dirs::config_dir().map(|dir| dir.join("jotter").join("menu.json")))
}

pub fn load_menu_config(config_path: Option<&Path>) -> Result<MenuConfig, CliError> {
    let config = match config_path {
        Some(path) => MenuConfig::load(path)?,
        None => MenuConfig::default().with_env_overrides(
            env::var(jotter_core::config::PUBLISH_BASE_URL_ENV).ok(),
        )?,
    };
    Ok(config)
}

pub fn resolve_note(repo: &SqliteNoteRepository<'_>, id: &str) -> Result<Note, CliError> {
    let normalized_id = normalize_note_identifier(id)?;
    Ok(repo.find_by_prefix(&normalized_id)?)
}

pub fn format_note_lines(notes: &[Note]) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    notes
        .iter()
        .map(|note| {
            let id = note.id.to_string();
            let short_id = id.chars().take(13).collect::<String>();
            let preview = note_preview(note, 40);
            let relative_time = format_relative_time(note.updated_at, now_ms);
            let flags = note_flags(note);

            if flags.is_empty() {
                format!("{short_id:<13}  {preview:<40}  {relative_time}")
            } else {
                format!("{short_id:<13}  {preview:<40}  {relative_time:<10}  {flags}")
            }
        })
        .collect()
}

pub fn note_to_list_item(note: &Note) -> NoteListItem {
    let now_ms = Utc::now().timestamp_millis();
    NoteListItem {
        id: note.id.to_string(),
        title: note_preview(note, 80),
        preview: note.preview.clone(),
        created_at: note.created_at,
        updated_at: note.updated_at,
        relative_time: format_relative_time(note.updated_at, now_ms),
        pinned: note.pinned,
        published: note.published,
        collaborators: note.collaborators.as_slice().to_vec(),
    }
}

pub fn note_preview(note: &Note, max_chars: usize) -> String {
    let first_line = note.content.lines().next().unwrap_or("").trim();
    let collapsed = first_line.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

/// Short markers for list output: pinned, markdown, published, shared
pub fn note_flags(note: &Note) -> String {
    let mut flags = Vec::new();
    if note.pinned {
        flags.push("pinned".to_string());
    }
    if note.markdown {
        flags.push("md".to_string());
    }
    if note.published {
        flags.push("public".to_string());
    }
    if !note.collaborators.is_empty() {
        flags.push(format!("shared:{}", note.collaborators.len()));
    }
    flags.join(" ")
}

pub fn format_timestamp(timestamp_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(timestamp_ms).map_or_else(
        || timestamp_ms.to_string(),
        |date_time| date_time.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    )
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

/// Render menu sections as indented text lines
pub fn format_section_lines(sections: &[Section]) -> Vec<String> {
    let mut lines = Vec::new();
    for (index, section) in sections.iter().enumerate() {
        if index > 0 {
            lines.push(String::new());
        }
        if let Some(header) = &section.header {
            lines.push(format!("{}:", header.to_uppercase()));
        }
        lines.extend(section.rows.iter().map(format_row));
        if let Some(footer) = &section.footer {
            lines.push(format!("  {footer}"));
        }
    }
    lines
}

pub fn format_row(row: &Row) -> String {
    let marker = match (row.style, row.toggled) {
        (RowStyle::Toggle, Some(true)) => "[x]",
        (RowStyle::Toggle, _) => "[ ]",
        (RowStyle::Value, _) if row.destructive => "(!)",
        (RowStyle::Value, _) => " > ",
    };

    let mut line = format!("  {marker} {:<14} ({})", row.title, row.id);
    if let Some(detail) = &row.detail {
        line.push_str(&format!("  {detail}"));
    }
    if row.busy {
        line.push_str("  [updating]");
    }
    if !row.enabled {
        line.push_str("  [disabled]");
    }
    line
}

pub fn print_sections(sections: &[Section], as_json: bool) -> Result<(), CliError> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(sections)?);
    } else {
        for line in format_section_lines(sections) {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn resolve_note_content(content_parts: &[String]) -> Result<String, CliError> {
    if let Some(content) = normalize_content(&content_parts.join(" ")) {
        return Ok(content);
    }

    if let Some(content) = read_piped_stdin()? {
        return Ok(content);
    }

    Err(CliError::EmptyContent)
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn normalize_search_query(query: &str) -> Result<String, CliError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptySearchQuery)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn normalize_note_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyNoteId)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}
