use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "jotter")]
#[command(about = "Manage notes and their options from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Optional path to the options menu config (JSON)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new note
    #[command(alias = "new")]
    Add {
        /// Note content (read from stdin when omitted)
        content: Vec<String>,
    },
    /// List recent notes, pinned first
    List {
        /// Number of notes to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search notes
    Search {
        /// Search query
        query: String,
        /// Number of notes to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the options menu for a note
    Menu {
        /// Note ID or unique ID prefix
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Tap a row of the options menu
    Select {
        /// Note ID or unique ID prefix
        id: String,
        /// Row to tap (pin, markdown, share, history, publish, copy-link, collaborate, trash)
        row: String,
        /// Output the resulting menu as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change the people a note is shared with
    Collab {
        #[command(subcommand)]
        command: CollabCommands,
    },
    /// Record the public link suffix assigned by the publishing backend
    Link {
        /// Note ID or unique ID prefix
        id: String,
        /// Link suffix; omit to clear the link after unpublishing
        suffix: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum CollabCommands {
    /// Share a note with an email address
    Add {
        /// Note ID or unique ID prefix
        id: String,
        /// Collaborator email
        email: String,
    },
    /// Stop sharing a note with an email address
    Remove {
        /// Note ID or unique ID prefix
        id: String,
        /// Collaborator email
        email: String,
    },
}
