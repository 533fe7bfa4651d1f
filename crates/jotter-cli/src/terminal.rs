//! Terminal stand-in for the editor screen that presents the options menu.
//!
//! Intents and presented surfaces are recorded and printed once the command
//! finishes.

use std::cell::RefCell;

use jotter_core::options::{
    OptionsDelegate, PresentationHost, PresentationStyle, RowId, ShareItem,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    MarkdownToggled(bool),
    History,
    Collaborators,
    Trash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Surface {
    Share(Vec<ShareItem>),
    Collaborators(Vec<String>),
}

#[derive(Debug, Default)]
pub struct TerminalSurface {
    intents: RefCell<Vec<Intent>>,
    surfaces: RefCell<Vec<Surface>>,
}

impl TerminalSurface {
    pub fn wants_trash(&self) -> bool {
        self.intents.borrow().contains(&Intent::Trash)
    }

    pub fn wants_history(&self) -> bool {
        self.intents.borrow().contains(&Intent::History)
    }

    /// Human-readable lines for everything shown so far
    pub fn describe(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for intent in self.intents.borrow().iter() {
            match intent {
                Intent::MarkdownToggled(true) => lines.push("Markdown formatting on".to_string()),
                Intent::MarkdownToggled(false) => {
                    lines.push("Markdown formatting off".to_string());
                }
                Intent::History | Intent::Collaborators | Intent::Trash => {}
            }
        }
        for surface in self.surfaces.borrow().iter() {
            match surface {
                Surface::Share(items) => {
                    lines.extend(items.iter().map(describe_share_item));
                }
                Surface::Collaborators(emails) if emails.is_empty() => {
                    lines.push("Not shared with anyone yet".to_string());
                }
                Surface::Collaborators(emails) => {
                    lines.push("Shared with:".to_string());
                    lines.extend(emails.iter().map(|email| format!("  {email}")));
                }
            }
        }
        lines
    }
}

pub fn describe_share_item(item: &ShareItem) -> String {
    match item {
        ShareItem::Text { subject, body } => {
            format!("Share \"{subject}\" ({} characters)", body.chars().count())
        }
        ShareItem::Url(url) => format!("Public link: {url}"),
    }
}

impl OptionsDelegate for TerminalSurface {
    fn markdown_toggled(&self, enabled: bool) {
        self.intents.borrow_mut().push(Intent::MarkdownToggled(enabled));
    }

    fn history_requested(&self) {
        self.intents.borrow_mut().push(Intent::History);
    }

    fn collaborators_requested(&self) {
        self.intents.borrow_mut().push(Intent::Collaborators);
    }

    fn trash_requested(&self) {
        self.intents.borrow_mut().push(Intent::Trash);
    }
}

impl PresentationHost for TerminalSurface {
    fn present_share(&self, items: &[ShareItem], anchor: RowId, style: PresentationStyle) {
        tracing::debug!("Presenting {} share item(s) from {anchor} as {style:?}", items.len());
        self.surfaces
            .borrow_mut()
            .push(Surface::Share(items.to_vec()));
    }

    fn present_collaborators(&self, collaborators: &[String], _style: PresentationStyle) {
        self.surfaces
            .borrow_mut()
            .push(Surface::Collaborators(collaborators.to_vec()));
    }
}
