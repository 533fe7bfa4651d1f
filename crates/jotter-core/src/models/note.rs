//! Note model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::CollaboratorTags;

/// Maximum length of the denormalized preview snippet
pub const PREVIEW_MAX_CHARS: usize = 160;

/// A unique identifier for a note, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Create a new unique note ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A note in the system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier
    pub id: NoteId,
    /// Plain text (or markdown) content
    pub content: String,
    /// Body snippet shown in note lists, derived from `content`
    #[serde(default)]
    pub preview: String,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
    /// Last update timestamp (Unix ms)
    pub updated_at: i64,
    /// Soft delete flag
    pub is_deleted: bool,
    /// Pinned to the top of the note list
    #[serde(default)]
    pub pinned: bool,
    /// Render content as markdown
    #[serde(default)]
    pub markdown: bool,
    /// The user asked for this note to be public
    #[serde(default)]
    pub published: bool,
    /// Public URL suffix assigned by the backend; empty until it converges
    #[serde(default)]
    pub publish_url: String,
    /// Emails this note is shared with
    #[serde(default)]
    pub collaborators: CollaboratorTags,
}

impl Note {
    /// Create a new note with the given content
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        let mut note = Self {
            id: NoteId::new(),
            content: content.into(),
            preview: String::new(),
            created_at: now,
            updated_at: now,
            is_deleted: false,
            pinned: false,
            markdown: false,
            published: false,
            publish_url: String::new(),
            collaborators: CollaboratorTags::new(),
        };
        note.refresh_preview();
        note
    }

    /// Get first line as title preview, truncated to `max_len` characters
    #[must_use]
    pub fn title_preview(&self, max_len: usize) -> String {
        self.content
            .lines()
            .next()
            .unwrap_or("")
            .chars()
            .take(max_len)
            .collect()
    }

    /// Check if note content is empty (whitespace-only counts as empty)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Record a modification at `now` (Unix ms)
    pub fn touch(&mut self, now: i64) {
        self.updated_at = now.max(self.updated_at);
    }

    /// Regenerate `preview` from the body (everything after the title line).
    ///
    /// Whitespace runs collapse to a single space.
    pub fn refresh_preview(&mut self) {
        let body = self
            .content
            .trim_start()
            .split_once('\n')
            .map_or("", |(_, rest)| rest);
        self.preview = body
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .chars()
            .take(PREVIEW_MAX_CHARS)
            .collect();
    }

    /// `published` and `publish_url` disagree, so the backend has not caught up yet
    #[must_use]
    pub fn publish_pending(&self) -> bool {
        self.published == self.publish_url.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_note_id_unique() {
        let id1 = NoteId::new();
        let id2 = NoteId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_note_id_parse() {
        let id = NoteId::new();
        let parsed: NoteId = id.as_str().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_note_new() {
        let note = Note::new("Hello world");
        assert_eq!(note.content, "Hello world");
        assert!(!note.is_deleted);
        assert!(!note.pinned);
        assert!(!note.published);
        assert!(note.publish_url.is_empty());
        assert!(note.collaborators.is_empty());
        assert!(note.created_at > 0);
        assert_eq!(note.created_at, note.updated_at);
    }

    #[test]
    fn test_title_preview() {
        let note = Note::new("First line\nSecond line\nThird line");
        assert_eq!(note.title_preview(50), "First line");
        assert_eq!(note.title_preview(5), "First");
    }

    #[test]
    fn test_is_empty() {
        let empty = Note::new("   ");
        assert!(empty.is_empty());

        let not_empty = Note::new("Hello");
        assert!(!not_empty.is_empty());
    }

    #[test]
    fn test_preview_skips_title_and_collapses_whitespace() {
        let mut note = Note::new("\n Title\nbody   line\n\n  second\tline");
        assert_eq!(note.preview, "body line second line");

        note.content = "Only a title".to_string();
        note.refresh_preview();
        assert_eq!(note.preview, "");
    }

    #[test]
    fn test_preview_is_truncated() {
        let note = Note::new(format!("Title\n{}", "word ".repeat(100)));
        assert_eq!(note.preview.chars().count(), PREVIEW_MAX_CHARS);
    }

    #[test]
    fn test_touch_never_moves_backwards() {
        let mut note = Note::new("x");
        let before = note.updated_at;
        note.touch(before - 1_000);
        assert_eq!(note.updated_at, before);
        note.touch(before + 5);
        assert_eq!(note.updated_at, before + 5);
    }

    #[test]
    fn test_publish_pending() {
        let mut note = Note::new("x");
        assert!(!note.publish_pending());

        note.published = true;
        assert!(note.publish_pending());

        note.publish_url = "abc123".to_string();
        assert!(!note.publish_pending());

        note.published = false;
        assert!(note.publish_pending());
    }

    #[test]
    fn test_deserialize_fills_missing_option_fields() {
        let id = NoteId::new();
        let json = format!(
            r#"{{"id":"{id}","content":"hi","created_at":1,"updated_at":2,"is_deleted":false}}"#
        );
        let note: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(note.id, id);
        assert!(!note.markdown);
        assert!(note.collaborators.is_empty());
    }
}
