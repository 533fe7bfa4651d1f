//! Analytics events emitted by the options menu
//!
//! Events are fire-and-forget: sinks never report back and a failing sink
//! must not affect the action that produced the event.

use serde::{Deserialize, Serialize};

use crate::models::NoteId;

/// A user action worth counting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    /// The note content was handed to a share surface
    ContentShared { note_id: NoteId },
    NotePublished { note_id: NoteId },
    NoteUnpublished { note_id: NoteId },
    /// The public link was handed to a share surface
    PublishedUrlOpened { note_id: NoteId },
    CollaboratorsAccessed { note_id: NoteId },
    EmailTagAdded { note_id: NoteId },
    EmailTagRemoved { note_id: NoteId },
    /// Any persisted change to a note
    NoteEdited { note_id: NoteId },
}

impl AnalyticsEvent {
    /// Stable event name reported to analytics backends
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ContentShared { .. } => "content_shared",
            Self::NotePublished { .. } => "note_published",
            Self::NoteUnpublished { .. } => "note_unpublished",
            Self::PublishedUrlOpened { .. } => "published_url_opened",
            Self::CollaboratorsAccessed { .. } => "collaborators_accessed",
            Self::EmailTagAdded { .. } => "email_tag_added",
            Self::EmailTagRemoved { .. } => "email_tag_removed",
            Self::NoteEdited { .. } => "note_edited",
        }
    }

    pub const fn note_id(&self) -> NoteId {
        match self {
            Self::ContentShared { note_id }
            | Self::NotePublished { note_id }
            | Self::NoteUnpublished { note_id }
            | Self::PublishedUrlOpened { note_id }
            | Self::CollaboratorsAccessed { note_id }
            | Self::EmailTagAdded { note_id }
            | Self::EmailTagRemoved { note_id }
            | Self::NoteEdited { note_id } => *note_id,
        }
    }
}

/// Destination for analytics events
pub trait AnalyticsSink {
    fn track(&self, event: AnalyticsEvent);
}

/// Sink that records events as structured `tracing` records
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn track(&self, event: AnalyticsEvent) {
        tracing::info!(
            target: "jotter::analytics",
            event = event.name(),
            note_id = %event.note_id(),
            "analytics event"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn event_names_match_serialized_tag() {
        let note_id = NoteId::new();
        let events = [
            AnalyticsEvent::ContentShared { note_id },
            AnalyticsEvent::NotePublished { note_id },
            AnalyticsEvent::NoteUnpublished { note_id },
            AnalyticsEvent::PublishedUrlOpened { note_id },
            AnalyticsEvent::CollaboratorsAccessed { note_id },
            AnalyticsEvent::EmailTagAdded { note_id },
            AnalyticsEvent::EmailTagRemoved { note_id },
            AnalyticsEvent::NoteEdited { note_id },
        ];

        for event in events {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["event"], event.name());
            assert_eq!(event.note_id(), note_id);
        }
    }

    #[test]
    fn tracing_sink_accepts_events_without_subscriber() {
        TracingAnalytics.track(AnalyticsEvent::NoteEdited {
            note_id: NoteId::new(),
        });
    }
}
