//! Options controller: applies menu interactions to a note

use crate::analytics::{AnalyticsEvent, AnalyticsSink};
use crate::config::MenuConfig;
use crate::db::NoteStore;
use crate::models::{is_valid_email, Note};
use crate::search::SearchIndex;
use crate::util::{compact_text, unix_millis_now};

use super::{
    find_row, publish_link, render, share_payload, PresentationStyle, RowId, Section, ShareItem,
};

/// Receives intents the options menu does not handle itself
pub trait OptionsDelegate {
    /// The editor should re-render the note content
    fn markdown_toggled(&self, enabled: bool);
    fn history_requested(&self);
    fn collaborators_requested(&self);
    /// Trashing is owned by the presenting screen; the menu never mutates the note for it
    fn trash_requested(&self);
}

/// Platform machinery for share surfaces and sub-screens
pub trait PresentationHost {
    /// Show a share surface for `items`, anchored to the `anchor` row
    fn present_share(&self, items: &[ShareItem], anchor: RowId, style: PresentationStyle);

    /// Show the collaborator editor seeded with `collaborators`.
    ///
    /// The editor reports changes back through [`CollaboratorChanges`].
    fn present_collaborators(&self, collaborators: &[String], style: PresentationStyle);
}

/// Callbacks the collaborator editor uses to change the note's collaborators
pub trait CollaboratorChanges {
    /// Whether `email` may be added
    fn can_add_collaborator(&self, email: &str) -> bool;
    fn collaborator_added(&mut self, email: &str);
    fn collaborator_removed(&mut self, email: &str);
}

/// External collaborators injected by the presenting context
#[derive(Clone, Copy)]
pub struct Services<'a> {
    pub store: &'a dyn NoteStore,
    pub index: &'a dyn SearchIndex,
    pub analytics: &'a dyn AnalyticsSink,
    pub delegate: &'a dyn OptionsDelegate,
    pub host: &'a dyn PresentationHost,
}

/// Drives the options menu for one note.
///
/// Every handler runs to completion synchronously. Handlers that change a
/// persisted field finish with the save sequence and a re-render.
pub struct OptionsController<'a> {
    note: Note,
    config: MenuConfig,
    services: Services<'a>,
    sections: Vec<Section>,
}

impl<'a> OptionsController<'a> {
    pub fn new(note: Note, config: MenuConfig, services: Services<'a>) -> Self {
        let sections = render(&note);
        Self {
            note,
            config,
            services,
            sections,
        }
    }

    pub const fn note(&self) -> &Note {
        &self.note
    }

    /// Mutable access for external updates (sync, backend publish results).
    ///
    /// Call [`Self::did_receive_note_update`] afterwards so the menu reflects them.
    pub fn note_mut(&mut self) -> &mut Note {
        &mut self.note
    }

    pub fn into_note(self) -> Note {
        self.note
    }

    pub const fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// The menu as last rendered
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Re-render the menu from the current note
    pub fn reload(&mut self) {
        self.sections = render(&self.note);
    }

    /// Something changed the note outside this menu
    pub fn did_receive_note_update(&mut self) {
        tracing::debug!("Note {} updated externally, reloading options", self.note.id);
        self.reload();
    }

    /// Swap in a fresher copy of the note and re-render
    pub fn replace_note(&mut self, note: Note) {
        self.note = note;
        self.did_receive_note_update();
    }

    /// Handle a tap on `row`.
    ///
    /// Returns `false` when the tap was ignored: disabled rows, or actions
    /// that could not build their payload.
    pub fn select(&mut self, row: RowId) -> bool {
        let enabled = find_row(&self.sections, row).is_some_and(|r| r.enabled);
        if !enabled {
            tracing::debug!("Ignoring tap on disabled row {row}");
            return false;
        }

        match row {
            RowId::Pin => self.set_pinned(!self.note.pinned),
            RowId::Markdown => self.set_markdown(!self.note.markdown),
            RowId::Publish => self.set_published(!self.note.published),
            RowId::Share => return self.share(),
            RowId::CopyLink => return self.copy_link(),
            RowId::Collaborate => self.open_collaborators(),
            RowId::History => self.services.delegate.history_requested(),
            RowId::Trash => self.services.delegate.trash_requested(),
        }
        true
    }

    pub fn set_pinned(&mut self, pinned: bool) {
        if self.note.pinned == pinned {
            return;
        }
        self.note.pinned = pinned;
        self.save();
        self.reload();
    }

    pub fn set_markdown(&mut self, markdown: bool) {
        if self.note.markdown == markdown {
            return;
        }
        self.note.markdown = markdown;
        self.save();
        self.services.delegate.markdown_toggled(markdown);
        self.reload();
    }

    /// Request publishing or unpublishing.
    ///
    /// The backend fills in or clears `publish_url` later; until then the
    /// Copy Link row shows as busy.
    pub fn set_published(&mut self, published: bool) {
        if self.note.published == published {
            return;
        }
        self.note.published = published;
        self.save();

        let note_id = self.note.id;
        self.services.analytics.track(if published {
            AnalyticsEvent::NotePublished { note_id }
        } else {
            AnalyticsEvent::NoteUnpublished { note_id }
        });
        self.reload();
    }

    /// Present the note text on a share surface
    pub fn share(&self) -> bool {
        let Some(item) = share_payload(&self.note) else {
            tracing::debug!("Note {} has nothing to share", self.note.id);
            return false;
        };

        self.services.analytics.track(AnalyticsEvent::ContentShared {
            note_id: self.note.id,
        });
        self.services
            .host
            .present_share(&[item], RowId::Share, self.presentation_style());
        true
    }

    /// Present the public link on a share surface
    pub fn copy_link(&self) -> bool {
        let Some(url) = publish_link(&self.config.publish_base_url, &self.note.publish_url) else {
            tracing::debug!(
                "No usable public link for note {} (suffix {:?})",
                self.note.id,
                compact_text(&self.note.publish_url)
            );
            return false;
        };

        self.services
            .analytics
            .track(AnalyticsEvent::PublishedUrlOpened {
                note_id: self.note.id,
            });
        self.services.host.present_share(
            &[ShareItem::Url(url)],
            RowId::CopyLink,
            self.presentation_style(),
        );
        true
    }

    pub fn open_collaborators(&self) {
        self.services
            .analytics
            .track(AnalyticsEvent::CollaboratorsAccessed {
                note_id: self.note.id,
            });
        self.services.delegate.collaborators_requested();
        self.services.host.present_collaborators(
            self.note.collaborators.as_slice(),
            self.presentation_style(),
        );
    }

    const fn presentation_style(&self) -> PresentationStyle {
        self.config.device_class.presentation_style()
    }

    /// Stamp, refresh the preview, persist, log and index, in that order.
    ///
    /// Store and index failures are logged and otherwise left to those services.
    fn save(&mut self) {
        self.note.touch(unix_millis_now());
        self.note.refresh_preview();

        if let Err(e) = self.services.store.save(&self.note) {
            tracing::error!("Failed to save note {}: {}", self.note.id, e);
        }

        self.services.analytics.track(AnalyticsEvent::NoteEdited {
            note_id: self.note.id,
        });

        if let Err(e) = self.services.index.upsert(&self.note) {
            tracing::error!("Failed to index note {}: {}", self.note.id, e);
        }
    }
}

impl CollaboratorChanges for OptionsController<'_> {
    fn can_add_collaborator(&self, email: &str) -> bool {
        is_valid_email(email) && !self.note.collaborators.contains(email)
    }

    fn collaborator_added(&mut self, email: &str) {
        if !self.note.collaborators.insert(email) {
            return;
        }
        self.save();
        self.services.analytics.track(AnalyticsEvent::EmailTagAdded {
            note_id: self.note.id,
        });
        self.reload();
    }

    fn collaborator_removed(&mut self, email: &str) {
        if !self.note.collaborators.remove(email) {
            return;
        }
        self.save();
        self.services
            .analytics
            .track(AnalyticsEvent::EmailTagRemoved {
                note_id: self.note.id,
            });
        self.reload();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::{Error, Result};
    use crate::options::DeviceClass;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Save(Note),
        Track(&'static str),
        Upsert,
        MarkdownToggled(bool),
        History,
        Collaborators,
        Trash,
        Share(Vec<ShareItem>, RowId, PresentationStyle),
        PresentCollaborators(Vec<String>),
    }

    /// Stands in for every external service and records calls in order
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<Call>>,
        fail_saves: Cell<bool>,
    }

    impl Recorder {
        fn push(&self, call: Call) {
            self.calls.borrow_mut().push(call);
        }

        fn take(&self) -> Vec<Call> {
            self.calls.take()
        }

        fn services(&self) -> Services<'_> {
            Services {
                store: self,
                index: self,
                analytics: self,
                delegate: self,
                host: self,
            }
        }
    }

    impl NoteStore for Recorder {
        fn save(&self, note: &Note) -> Result<()> {
            self.push(Call::Save(note.clone()));
            if self.fail_saves.get() {
                return Err(Error::Database("disk full".to_string()));
            }
            Ok(())
        }
    }

    impl SearchIndex for Recorder {
        fn upsert(&self, _note: &Note) -> Result<()> {
            self.push(Call::Upsert);
            Ok(())
        }
    }

    impl AnalyticsSink for Recorder {
        fn track(&self, event: AnalyticsEvent) {
            self.push(Call::Track(event.name()));
        }
    }

    impl OptionsDelegate for Recorder {
        fn markdown_toggled(&self, enabled: bool) {
            self.push(Call::MarkdownToggled(enabled));
        }

        fn history_requested(&self) {
            self.push(Call::History);
        }

        fn collaborators_requested(&self) {
            self.push(Call::Collaborators);
        }

        fn trash_requested(&self) {
            self.push(Call::Trash);
        }
    }

    impl PresentationHost for Recorder {
        fn present_share(&self, items: &[ShareItem], anchor: RowId, style: PresentationStyle) {
            self.push(Call::Share(items.to_vec(), anchor, style));
        }

        fn present_collaborators(&self, collaborators: &[String], _style: PresentationStyle) {
            self.push(Call::PresentCollaborators(collaborators.to_vec()));
        }
    }

    fn controller<'a>(recorder: &'a Recorder, note: Note) -> OptionsController<'a> {
        OptionsController::new(note, MenuConfig::default(), recorder.services())
    }

    /// Drop full notes from save calls so sequences are easy to compare
    fn shape(calls: &[Call]) -> Vec<String> {
        calls
            .iter()
            .map(|call| match call {
                Call::Save(_) => "save".to_string(),
                Call::Track(name) => format!("track:{name}"),
                Call::Upsert => "upsert".to_string(),
                other => format!("{other:?}"),
            })
            .collect()
    }

    fn row_enabled(ctl: &OptionsController<'_>, id: RowId) -> bool {
        find_row(ctl.sections(), id).unwrap().enabled
    }

    #[test]
    fn toggling_pin_flips_flag_and_saves_once() {
        let recorder = Recorder::default();
        let mut ctl = controller(&recorder, Note::new("Pinned?"));

        assert!(ctl.select(RowId::Pin));

        assert!(ctl.note().pinned);
        assert_eq!(
            shape(&recorder.take()),
            ["save", "track:note_edited", "upsert"]
        );
        let pin = find_row(ctl.sections(), RowId::Pin).unwrap();
        assert_eq!(pin.toggled, Some(true));
        assert_eq!(pin.accessibility_hint.as_deref(), Some("Unpin note"));

        ctl.select(RowId::Pin);
        assert!(!ctl.note().pinned);
    }

    #[test]
    fn toggling_markdown_notifies_delegate_once() {
        let recorder = Recorder::default();
        let mut ctl = controller(&recorder, Note::new("# Heading"));

        ctl.select(RowId::Markdown);

        assert!(ctl.note().markdown);
        let calls = recorder.take();
        assert_eq!(
            shape(&calls),
            ["save", "track:note_edited", "upsert", "MarkdownToggled(true)"]
        );
    }

    #[test]
    fn setting_unchanged_flag_does_nothing() {
        let recorder = Recorder::default();
        let mut ctl = controller(&recorder, Note::new("x"));

        ctl.set_pinned(false);
        ctl.set_markdown(false);
        ctl.set_published(false);

        assert!(recorder.take().is_empty());
    }

    #[test]
    fn save_sequence_stamps_and_refreshes_preview_before_persisting() {
        let recorder = Recorder::default();
        let mut note = Note::new("Title\nold body");
        note.updated_at -= 60_000;
        note.content = "Title\nnew body".to_string();
        let before = note.updated_at;
        let mut ctl = controller(&recorder, note);

        ctl.set_pinned(true);

        let calls = recorder.take();
        let Call::Save(saved) = &calls[0] else {
            panic!("first call should be a save, got {calls:?}");
        };
        assert_eq!(saved.preview, "new body");
        assert!(saved.pinned);
        assert!(saved.updated_at > before);
    }

    #[test]
    fn store_failure_does_not_stop_the_sequence() {
        let recorder = Recorder::default();
        recorder.fail_saves.set(true);
        let mut ctl = controller(&recorder, Note::new("x"));

        ctl.set_pinned(true);

        assert!(ctl.note().pinned);
        assert_eq!(
            shape(&recorder.take()),
            ["save", "track:note_edited", "upsert"]
        );
    }

    #[test]
    fn publishing_without_url_leaves_copy_link_disabled_and_busy() {
        let recorder = Recorder::default();
        let mut ctl = controller(&recorder, Note::new("Public"));

        ctl.select(RowId::Publish);

        assert!(ctl.note().published);
        assert_eq!(
            shape(&recorder.take()),
            ["save", "track:note_edited", "upsert", "track:note_published"]
        );
        let copy_link = find_row(ctl.sections(), RowId::CopyLink).unwrap();
        assert!(!copy_link.enabled);
        assert!(copy_link.busy);

        // Disabled row ignores taps
        assert!(!ctl.select(RowId::CopyLink));
        assert!(recorder.take().is_empty());
    }

    #[test]
    fn unpublishing_tracks_unpublish_event() {
        let recorder = Recorder::default();
        let mut note = Note::new("Public");
        note.published = true;
        note.publish_url = "abc123".to_string();
        let mut ctl = controller(&recorder, note);

        ctl.select(RowId::Publish);

        assert!(!ctl.note().published);
        assert!(shape(&recorder.take()).contains(&"track:note_unpublished".to_string()));
        let copy_link = find_row(ctl.sections(), RowId::CopyLink).unwrap();
        assert!(copy_link.enabled);
        assert!(copy_link.busy);
    }

    #[test]
    fn copy_link_shares_base_plus_suffix() {
        let recorder = Recorder::default();
        let mut note = Note::new("Public");
        note.published = true;
        note.publish_url = "abc123".to_string();
        let mut ctl = controller(&recorder, note);

        assert!(ctl.select(RowId::CopyLink));

        let calls = recorder.take();
        assert_eq!(calls[0], Call::Track("published_url_opened"));
        let Call::Share(items, anchor, style) = &calls[1] else {
            panic!("expected a share call, got {calls:?}");
        };
        assert_eq!(*anchor, RowId::CopyLink);
        assert_eq!(*style, PresentationStyle::Sheet);
        let [ShareItem::Url(url)] = items.as_slice() else {
            panic!("expected a single url, got {items:?}");
        };
        assert_eq!(url.as_str(), format!("{}abc123", ctl.config().publish_base_url));
    }

    #[test]
    fn copy_link_with_empty_suffix_is_a_no_op() {
        let recorder = Recorder::default();
        let ctl = controller(&recorder, Note::new("Private"));

        assert!(!row_enabled(&ctl, RowId::CopyLink));
        assert!(!ctl.copy_link());
        assert!(recorder.take().is_empty());
    }

    #[test]
    fn copy_link_with_malformed_suffix_is_a_no_op() {
        let recorder = Recorder::default();
        let mut note = Note::new("Public");
        note.published = true;
        note.publish_url = "bad suffix".to_string();
        let mut ctl = controller(&recorder, note);

        assert!(row_enabled(&ctl, RowId::CopyLink));
        assert!(!ctl.select(RowId::CopyLink));
        assert!(recorder.take().is_empty());
    }

    #[test]
    fn share_presents_note_text_with_device_style() {
        let recorder = Recorder::default();
        let config = MenuConfig {
            device_class: DeviceClass::Tablet,
            ..MenuConfig::default()
        };
        let mut ctl = OptionsController::new(Note::new("Hello\nworld"), config, recorder.services());

        assert!(ctl.select(RowId::Share));

        assert_eq!(
            recorder.take(),
            [
                Call::Track("content_shared"),
                Call::Share(
                    vec![ShareItem::Text {
                        subject: "Hello".to_string(),
                        body: "Hello\nworld".to_string(),
                    }],
                    RowId::Share,
                    PresentationStyle::Popover,
                ),
            ]
        );
    }

    #[test]
    fn share_without_content_is_a_no_op() {
        let recorder = Recorder::default();
        let mut ctl = controller(&recorder, Note::new("   "));

        assert!(!ctl.select(RowId::Share));
        assert!(recorder.take().is_empty());
    }

    #[test]
    fn history_and_trash_only_delegate() {
        let recorder = Recorder::default();
        let note = Note::new("Keep me");
        let mut ctl = controller(&recorder, note.clone());

        ctl.select(RowId::History);
        ctl.select(RowId::Trash);

        assert_eq!(recorder.take(), [Call::History, Call::Trash]);
        assert_eq!(ctl.note(), &note);
    }

    #[test]
    fn collaborate_logs_and_presents_current_list() {
        let recorder = Recorder::default();
        let mut note = Note::new("Shared");
        note.collaborators.insert("a@example.com");
        let mut ctl = controller(&recorder, note);

        ctl.select(RowId::Collaborate);

        assert_eq!(
            recorder.take(),
            [
                Call::Track("collaborators_accessed"),
                Call::Collaborators,
                Call::PresentCollaborators(vec!["a@example.com".to_string()]),
            ]
        );
    }

    #[test]
    fn duplicate_collaborator_is_rejected_without_mutation() {
        let recorder = Recorder::default();
        let mut note = Note::new("Shared");
        note.collaborators.insert("a@example.com");
        let mut ctl = controller(&recorder, note.clone());

        assert!(!ctl.can_add_collaborator("a@example.com"));
        assert!(!ctl.can_add_collaborator("A@Example.com"));
        assert!(!ctl.can_add_collaborator("not-an-email"));
        assert!(ctl.can_add_collaborator("b@example.com"));

        ctl.collaborator_added("a@example.com");
        assert_eq!(ctl.note(), &note);
        assert!(recorder.take().is_empty());
    }

    #[test]
    fn collaborator_changes_save_log_and_rerender() {
        let recorder = Recorder::default();
        let mut ctl = controller(&recorder, Note::new("Shared"));

        ctl.collaborator_added("b@example.com");
        assert_eq!(
            shape(&recorder.take()),
            ["save", "track:note_edited", "upsert", "track:email_tag_added"]
        );
        assert_eq!(
            find_row(ctl.sections(), RowId::Collaborate)
                .unwrap()
                .detail
                .as_deref(),
            Some("1 collaborator")
        );

        ctl.collaborator_removed("b@example.com");
        assert_eq!(
            shape(&recorder.take()),
            ["save", "track:note_edited", "upsert", "track:email_tag_removed"]
        );
        assert!(ctl.note().collaborators.is_empty());

        ctl.collaborator_removed("b@example.com");
        assert!(recorder.take().is_empty());
    }

    #[test]
    fn sections_always_match_a_fresh_render() {
        let recorder = Recorder::default();
        let mut ctl = controller(&recorder, Note::new("x"));

        for row in [RowId::Pin, RowId::Markdown, RowId::Publish, RowId::Pin] {
            ctl.select(row);
            assert_eq!(ctl.sections(), render(ctl.note()).as_slice());
        }
    }

    #[test]
    fn external_update_rerenders_idempotently() {
        let recorder = Recorder::default();
        let mut note = Note::new("x");
        note.published = true;
        let mut ctl = controller(&recorder, note);
        assert!(find_row(ctl.sections(), RowId::CopyLink).unwrap().busy);

        ctl.did_receive_note_update();
        assert_eq!(ctl.sections(), render(ctl.note()).as_slice());

        // Backend assigns the link
        ctl.note_mut().publish_url = "abc123".to_string();
        ctl.did_receive_note_update();
        let copy_link = find_row(ctl.sections(), RowId::CopyLink).unwrap();
        assert!(copy_link.enabled);
        assert!(!copy_link.busy);

        let snapshot = ctl.sections().to_vec();
        ctl.did_receive_note_update();
        assert_eq!(ctl.sections(), snapshot.as_slice());
        assert!(recorder.take().is_empty());
    }

    #[test]
    fn replace_note_rerenders() {
        let recorder = Recorder::default();
        let mut ctl = controller(&recorder, Note::new("x"));

        let mut fresh = ctl.note().clone();
        fresh.pinned = true;
        ctl.replace_note(fresh);

        assert_eq!(
            find_row(ctl.sections(), RowId::Pin).unwrap().toggled,
            Some(true)
        );
        assert!(ctl.into_note().pinned);
    }
}
