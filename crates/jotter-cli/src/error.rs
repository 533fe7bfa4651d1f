use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] jotter_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No note content provided")]
    EmptyContent,
    #[error("Note ID cannot be empty")]
    EmptyNoteId,
    #[error("Search query cannot be empty")]
    EmptySearchQuery,
    #[error("Collaborator '{0}' cannot be added (invalid or already present)")]
    CollaboratorRejected(String),
    #[error("Failed to resolve the data directory; pass --db-path or set JOTTER_DB_PATH")]
    NoDataDir,
}
