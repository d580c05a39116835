//! Routing from [`PanelEvent`] to store mutations.

use std::sync::Arc;

use tracing::debug;

use triage_store::PanelStore;

use crate::event::PanelEvent;

/// Where `PLAY_SOUND` events go. Sound output belongs to the host
/// environment; the dispatcher only routes.
pub trait SoundSink: Send + Sync {
    /// Play a named sound at the given volume (0.0–1.0).
    fn play(&self, sound: &str, volume: f64);
}

/// Default sink: logs the request and plays nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSoundSink;

impl SoundSink for LogSoundSink {
    fn play(&self, sound: &str, volume: f64) {
        debug!(sound, volume, "play sound");
    }
}

/// Translates pushed events into store mutations.
///
/// Stateless by design: every handler is a pure routing of wire
/// payloads into [`PanelStore`] actions, in the order the transport
/// delivers them. Holding no state of its own means replaying the
/// same event stream against a fresh store always converges to the
/// same panel state.
pub struct Dispatcher {
    store: PanelStore,
    sounds: Arc<dyn SoundSink>,
}

impl Dispatcher {
    /// Dispatcher with the default (logging) sound sink.
    pub fn new(store: PanelStore) -> Self {
        Self::with_sound_sink(store, Arc::new(LogSoundSink))
    }

    /// Dispatcher with a custom sound sink.
    pub fn with_sound_sink(store: PanelStore, sounds: Arc<dyn SoundSink>) -> Self {
        Self { store, sounds }
    }

    /// Fold one event into the store.
    pub fn apply(&self, event: PanelEvent) {
        match event {
            PanelEvent::ShowUi(data) => {
                self.store.set_visible(true);
                self.store.set_theme(data.theme);
                self.store.set_categories(data.categories);
                self.store.set_priorities(data.priorities);
                self.store.set_my_reports(data.my_reports);
                self.store.set_all_reports(data.all_reports);
                self.store.set_player_data(data.player_data);
                self.store.set_locale(data.locale);
                self.store
                    .set_voice_messages_enabled(data.voice_messages_enabled);
            }
            PanelEvent::HideUi => self.store.clear_session_ui(),

            PanelEvent::SetReports(reports) => self.store.set_my_reports(reports),
            PanelEvent::SetAllReports(reports) => self.store.set_all_reports(reports),
            PanelEvent::AddReport(report) | PanelEvent::NewAdminReport(report) => {
                self.store.add_report(report);
            }
            PanelEvent::UpdateReport(patch) => self.store.update_report(&patch),
            PanelEvent::RemoveReport(data) => self.store.remove_report(data.id),

            // Both message events append with no dedup — see the
            // module docs on the double-delivery risk.
            PanelEvent::NewMessage(message) | PanelEvent::MessageSent(message) => {
                self.store.add_message(message);
            }
            PanelEvent::SetMessages(data) => {
                self.store.set_messages(data.report_id, &data.messages);
            }

            PanelEvent::Notification(data) => {
                let _ = self
                    .store
                    .push_notification(&data.message, data.notify_type, None);
            }
            PanelEvent::PlaySound(data) => self.sounds.play(&data.sound, data.volume),

            PanelEvent::UpdatePlayerOnline(data) => {
                self.store.set_player_online(&data.player_id, data.is_online);
            }

            PanelEvent::SetReportNotes(data) => {
                self.store.set_report_notes(data.report_id, data.notes);
            }
            PanelEvent::ReportNoteAdded(note) => self.store.add_report_note(note),
            PanelEvent::ReportNoteDeleted(data) => {
                self.store.remove_report_note(data.report_id, data.note_id);
            }
            PanelEvent::SetPlayerNotes(data) => {
                self.store.set_player_notes(&data.player_id, data.notes);
            }
            PanelEvent::PlayerNoteAdded(note) => self.store.add_player_note(note),
            PanelEvent::PlayerNoteDeleted(data) => {
                self.store.remove_player_note(&data.player_id, data.note_id);
            }

            PanelEvent::SetPlayerHistory(history) => self.store.set_player_history(history),
            PanelEvent::SetStatistics(statistics) => self.store.set_statistics(statistics),
        }
    }
}
