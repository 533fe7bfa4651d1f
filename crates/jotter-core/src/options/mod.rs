//! Options menu shown from the note editor.
//!
//! The menu is a fixed list of sections and rows. [`render`] binds the
//! current note into that list and returns plain descriptors; front-ends draw
//! them and route taps to [`OptionsController::select`]. Rows hold no state of
//! their own, so rendering the same note twice always yields equal sections.

mod controller;
mod share;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::Note;

pub use controller::{
    CollaboratorChanges, OptionsController, OptionsDelegate, PresentationHost, Services,
};
pub use share::{publish_link, share_payload, ShareItem};

/// Form factor of the device showing the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    #[default]
    Phone,
    Tablet,
}

impl DeviceClass {
    /// How share surfaces and sub-screens are shown on this device
    pub const fn presentation_style(self) -> PresentationStyle {
        match self {
            Self::Phone => PresentationStyle::Sheet,
            Self::Tablet => PresentationStyle::Popover,
        }
    }
}

/// Layout of a follow-on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationStyle {
    /// Full-width sheet
    Sheet,
    /// Overlay anchored to the originating row
    Popover,
}

/// Widget kind used to draw a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStyle {
    /// Label with optional detail text, reacts to taps
    Value,
    /// Label with a switch
    Toggle,
}

/// Every entry of the options menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowId {
    Pin,
    Markdown,
    Share,
    History,
    Publish,
    CopyLink,
    Collaborate,
    Trash,
}

impl RowId {
    pub const ALL: [Self; 8] = [
        Self::Pin,
        Self::Markdown,
        Self::Share,
        Self::History,
        Self::Publish,
        Self::CopyLink,
        Self::Collaborate,
        Self::Trash,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pin => "pin",
            Self::Markdown => "markdown",
            Self::Share => "share",
            Self::History => "history",
            Self::Publish => "publish",
            Self::CopyLink => "copy-link",
            Self::Collaborate => "collaborate",
            Self::Trash => "trash",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Pin => "Pin to Top",
            Self::Markdown => "Markdown",
            Self::Share => "Share",
            Self::History => "History",
            Self::Publish => "Publish",
            Self::CopyLink => "Copy Link",
            Self::Collaborate => "Collaborate",
            Self::Trash => "Move to Trash",
        }
    }

    pub const fn style(self) -> RowStyle {
        match self {
            Self::Pin | Self::Markdown | Self::Publish => RowStyle::Toggle,
            Self::Share | Self::History | Self::CopyLink | Self::Collaborate | Self::Trash => {
                RowStyle::Value
            }
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RowId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|row| row.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::InvalidInput(format!("unknown menu row '{wanted}'")))
    }
}

/// Static description of one section
struct SectionSpec {
    header: Option<&'static str>,
    footer: Option<&'static str>,
    rows: &'static [RowId],
}

const MENU: &[SectionSpec] = &[
    SectionSpec {
        header: None,
        footer: None,
        rows: &[RowId::Pin, RowId::Markdown, RowId::Share, RowId::History],
    },
    SectionSpec {
        header: Some("Public Link"),
        footer: Some("Publish your note to the web and generate a shareable URL."),
        rows: &[RowId::Publish, RowId::CopyLink],
    },
    SectionSpec {
        header: None,
        footer: None,
        rows: &[RowId::Collaborate],
    },
    SectionSpec {
        header: None,
        footer: None,
        rows: &[RowId::Trash],
    },
];

/// One drawn menu entry, bound to a note snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    pub style: RowStyle,
    pub title: String,
    /// Secondary text on value rows
    pub detail: Option<String>,
    /// Switch position; `None` for value rows
    pub toggled: Option<bool>,
    /// Disabled rows ignore taps
    pub enabled: bool,
    /// Show an activity indicator instead of the accessory
    pub busy: bool,
    pub destructive: bool,
    pub accessibility_hint: Option<String>,
}

impl Row {
    /// Bind `note` into the row identified by `id`
    pub fn bind(id: RowId, note: &Note) -> Self {
        let mut row = Self {
            id,
            style: id.style(),
            title: id.title().to_string(),
            detail: None,
            toggled: None,
            enabled: true,
            busy: false,
            destructive: false,
            accessibility_hint: None,
        };

        match id {
            RowId::Pin => {
                row.toggled = Some(note.pinned);
                row.accessibility_hint = Some(toggle_hint(note.pinned, "Unpin note", "Pin note"));
            }
            RowId::Markdown => {
                row.toggled = Some(note.markdown);
                row.accessibility_hint = Some(toggle_hint(
                    note.markdown,
                    "Disable Markdown formatting",
                    "Enable Markdown formatting",
                ));
            }
            RowId::Publish => {
                row.toggled = Some(note.published);
                row.accessibility_hint = Some(toggle_hint(
                    note.published,
                    "Unpublish note",
                    "Publish note to the web",
                ));
            }
            RowId::CopyLink => {
                row.enabled = !note.publish_url.is_empty();
                row.busy = note.publish_pending();
                if row.busy {
                    row.accessibility_hint = Some("Waiting for the public link".to_string());
                }
            }
            RowId::Collaborate => {
                row.detail = match note.collaborators.len() {
                    0 => None,
                    1 => Some("1 collaborator".to_string()),
                    n => Some(format!("{n} collaborators")),
                };
            }
            RowId::Trash => row.destructive = true,
            RowId::Share | RowId::History => {}
        }

        row
    }
}

fn toggle_hint(on: bool, when_on: &str, when_off: &str) -> String {
    let hint = if on { when_on } else { when_off };
    hint.to_string()
}

/// An optionally titled group of rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub header: Option<String>,
    pub footer: Option<String>,
    pub rows: Vec<Row>,
}

impl Section {
    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|row| row.id == id)
    }
}

/// Build the full menu for `note`.
///
/// Section and row order never depend on the note; only bound content does.
pub fn render(note: &Note) -> Vec<Section> {
    MENU.iter()
        .map(|spec| Section {
            header: spec.header.map(str::to_string),
            footer: spec.footer.map(str::to_string),
            rows: spec.rows.iter().map(|&id| Row::bind(id, note)).collect(),
        })
        .collect()
}

/// Find a row across rendered sections
pub fn find_row(sections: &[Section], id: RowId) -> Option<&Row> {
    sections.iter().find_map(|section| section.row(id))
}
