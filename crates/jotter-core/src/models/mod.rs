//! Data models for Jotter

mod collaborators;
mod note;

pub use collaborators::{is_valid_email, CollaboratorTags};
pub use note::{Note, NoteId, PREVIEW_MAX_CHARS};
