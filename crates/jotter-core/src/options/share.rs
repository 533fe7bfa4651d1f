//! Payloads handed to share surfaces

use url::Url;

use crate::models::Note;

/// Something a share surface can hand to other apps
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareItem {
    /// Note text, with the first line as subject
    Text { subject: String, body: String },
    /// A single link
    Url(Url),
}

/// Build the share payload for `note`, or `None` when there is nothing to share
pub fn share_payload(note: &Note) -> Option<ShareItem> {
    if note.is_empty() || note.is_deleted {
        return None;
    }
    Some(ShareItem::Text {
        subject: note.title_preview(80).trim().to_string(),
        body: note.content.clone(),
    })
}

/// Join the public base path and a note's publish suffix.
///
/// Returns `None` for an empty suffix or one that would not survive as a
/// literal path (whitespace, query or fragment markers, non-ASCII, empty or
/// dot segments).
pub fn publish_link(base: &str, suffix: &str) -> Option<Url> {
    if suffix.is_empty() || !suffix.chars().all(is_link_char) {
        return None;
    }
    if suffix.split('/').any(|segment| matches!(segment, "" | "." | "..")) {
        return None;
    }
    Url::parse(&format!("{base}{suffix}")).ok()
}

const fn is_link_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~' | '/')
}
