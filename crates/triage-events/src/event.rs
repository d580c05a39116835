//! The [`PanelEvent`] enum — every event the backend pushes at the
//! panel — and its payload structs.
//!
//! Variant names are the wire strings. Payloads decode tolerantly:
//! list fields default to empty so a backend that omits an empty
//! array still parses.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use triage_core::{
    CategoryConfig, Message, NoteId, NotifyKind, PlayerData, PlayerHistory, PlayerNote,
    PriorityConfig, Report, ReportNote, ReportPatch, Statistics, Theme,
};

/// A backend-pushed event.
///
/// Delivery is FIFO per channel, at-least-once; ordering relative to
/// request/response completions is NOT guaranteed (push and
/// request/response are independent channels).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PanelEvent {
    /// Full-state bootstrap. Replaces, never merges.
    #[serde(rename = "SHOW_UI")]
    ShowUi(ShowUiData),

    /// Hide the panel and clear session UI state.
    #[serde(rename = "HIDE_UI")]
    HideUi,

    /// Wholesale replacement of the player's own report list.
    #[serde(rename = "SET_REPORTS")]
    SetReports(Vec<Report>),

    /// Wholesale replacement of the staff report list.
    #[serde(rename = "SET_ALL_REPORTS")]
    SetAllReports(Vec<Report>),

    /// A new report, routed to the collections the viewer sees.
    #[serde(rename = "ADD_REPORT")]
    AddReport(Report),

    /// Staff-side announcement of a new report. Same handling as
    /// [`PanelEvent::AddReport`].
    #[serde(rename = "NEW_ADMIN_REPORT")]
    NewAdminReport(Report),

    /// Partial update of one report, merged by id.
    #[serde(rename = "UPDATE_REPORT")]
    UpdateReport(ReportPatch),

    /// Remove a report everywhere.
    #[serde(rename = "REMOVE_REPORT")]
    RemoveReport(RemoveReportData),

    /// A message arrived for some report.
    #[serde(rename = "NEW_MESSAGE")]
    NewMessage(Message),

    /// Echo of the viewer's own just-sent message. Appended exactly
    /// like [`PanelEvent::NewMessage`] — there is no dedup by message
    /// id, the backend is trusted to deliver one of the two per
    /// logical message.
    #[serde(rename = "MESSAGE_SENT")]
    MessageSent(Message),

    /// Full thread replacement for one report.
    #[serde(rename = "SET_MESSAGES")]
    SetMessages(SetMessagesData),

    /// Transient banner.
    #[serde(rename = "NOTIFICATION")]
    Notification(NotificationData),

    /// Play a UI sound.
    #[serde(rename = "PLAY_SOUND")]
    PlaySound(PlaySoundData),

    /// A player's connect/disconnect ripple.
    #[serde(rename = "UPDATE_PLAYER_ONLINE")]
    UpdatePlayerOnline(OnlineStatusData),

    /// Replace one report's note list.
    #[serde(rename = "SET_REPORT_NOTES")]
    SetReportNotes(ReportNotesData),

    /// A report note was added (confirmation or another staffer's).
    #[serde(rename = "REPORT_NOTE_ADDED")]
    ReportNoteAdded(ReportNote),

    /// A report note was deleted.
    #[serde(rename = "REPORT_NOTE_DELETED")]
    ReportNoteDeleted(NoteDeletedData),

    /// Replace one player's note list.
    #[serde(rename = "SET_PLAYER_NOTES")]
    SetPlayerNotes(PlayerNotesData),

    /// A player note was added.
    #[serde(rename = "PLAYER_NOTE_ADDED")]
    PlayerNoteAdded(PlayerNote),

    /// A player note was deleted.
    #[serde(rename = "PLAYER_NOTE_DELETED")]
    PlayerNoteDeleted(PlayerNoteDeletedData),

    /// Replace the player history snapshot.
    #[serde(rename = "SET_PLAYER_HISTORY")]
    SetPlayerHistory(PlayerHistory),

    /// Replace the statistics snapshot.
    #[serde(rename = "SET_STATISTICS")]
    SetStatistics(Statistics),
}

/// Bootstrap payload for [`PanelEvent::ShowUi`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowUiData {
    /// Coarse staff flag, duplicated from `player_data` for legacy
    /// consumers.
    #[serde(default)]
    pub is_admin: bool,
    /// Theme the backend remembered for this player.
    #[serde(default)]
    pub theme: Theme,
    /// Category config.
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
    /// Priority config.
    #[serde(default)]
    pub priorities: Vec<PriorityConfig>,
    /// The player's own reports.
    #[serde(default)]
    pub my_reports: Vec<Report>,
    /// Staff view of every report (empty for non-staff).
    #[serde(default)]
    pub all_reports: Vec<Report>,
    /// Viewer identity.
    pub player_data: PlayerData,
    /// Locale table.
    #[serde(default)]
    pub locale: HashMap<String, String>,
    /// Whether voice messages are enabled server-side.
    #[serde(default)]
    pub voice_messages_enabled: bool,
}

/// Payload for [`PanelEvent::RemoveReport`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveReportData {
    /// Report to remove.
    pub id: i64,
}

/// Payload for [`PanelEvent::SetMessages`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetMessagesData {
    /// Target report.
    pub report_id: i64,
    /// Full replacement thread.
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Payload for [`PanelEvent::Notification`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    /// Banner text.
    pub message: String,
    /// Severity.
    pub notify_type: NotifyKind,
}

/// Payload for [`PanelEvent::PlaySound`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaySoundData {
    /// Sound file name.
    pub sound: String,
    /// Volume 0.0–1.0.
    #[serde(default = "default_volume")]
    pub volume: f64,
}

fn default_volume() -> f64 {
    0.5
}

/// Payload for [`PanelEvent::UpdatePlayerOnline`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineStatusData {
    /// Affected player.
    pub player_id: String,
    /// New connection state.
    pub is_online: bool,
}

/// Payload for [`PanelEvent::SetReportNotes`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportNotesData {
    /// Target report.
    pub report_id: i64,
    /// Full replacement note list.
    #[serde(default)]
    pub notes: Vec<ReportNote>,
}

/// Payload for [`PanelEvent::ReportNoteDeleted`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDeletedData {
    /// Deleted note id.
    pub note_id: NoteId,
    /// Parent report.
    pub report_id: i64,
}

/// Payload for [`PanelEvent::SetPlayerNotes`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerNotesData {
    /// Subject player.
    pub player_id: String,
    /// Full replacement note list.
    #[serde(default)]
    pub notes: Vec<PlayerNote>,
}

/// Payload for [`PanelEvent::PlayerNoteDeleted`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerNoteDeletedData {
    /// Deleted note id.
    pub note_id: NoteId,
    /// Subject player.
    pub player_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn decodes_unit_event_without_data() {
        let event: PanelEvent = serde_json::from_value(json!({"type": "HIDE_UI"})).unwrap();
        assert_eq!(event, PanelEvent::HideUi);
    }

    #[test]
    fn decodes_remove_report() {
        let event: PanelEvent =
            serde_json::from_value(json!({"type": "REMOVE_REPORT", "data": {"id": 7}})).unwrap();
        assert_matches!(event, PanelEvent::RemoveReport(RemoveReportData { id: 7 }));
    }

    #[test]
    fn decodes_notification_kinds() {
        let event: PanelEvent = serde_json::from_value(json!({
            "type": "NOTIFICATION",
            "data": {"message": "Report claimed", "notifyType": "success"},
        }))
        .unwrap();
        assert_matches!(
            event,
            PanelEvent::Notification(NotificationData {
                notify_type: NotifyKind::Success,
                ..
            })
        );
    }

    #[test]
    fn play_sound_defaults_volume() {
        let event: PanelEvent = serde_json::from_value(json!({
            "type": "PLAY_SOUND",
            "data": {"sound": "notify.ogg"},
        }))
        .unwrap();
        let PanelEvent::PlaySound(data) = event else {
            panic!("wrong variant");
        };
        assert!((data.volume - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_event_type_fails_parse() {
        let result: Result<PanelEvent, _> =
            serde_json::from_value(json!({"type": "SELF_DESTRUCT", "data": {}}));
        assert!(result.is_err());
    }

    #[test]
    fn show_ui_tolerates_missing_lists() {
        let event: PanelEvent = serde_json::from_value(json!({
            "type": "SHOW_UI",
            "data": {
                "theme": "dark",
                "playerData": {"identifier": "license:abc", "name": "Avery", "isAdmin": false},
            },
        }))
        .unwrap();
        let PanelEvent::ShowUi(data) = event else {
            panic!("wrong variant");
        };
        assert!(data.my_reports.is_empty());
        assert!(data.locale.is_empty());
        assert!(!data.voice_messages_enabled);
    }

    #[test]
    fn deleted_note_id_decodes_sign_encoding() {
        let event: PanelEvent = serde_json::from_value(json!({
            "type": "REPORT_NOTE_DELETED",
            "data": {"noteId": 31, "reportId": 4},
        }))
        .unwrap();
        assert_matches!(
            event,
            PanelEvent::ReportNoteDeleted(NoteDeletedData {
                note_id: NoteId::Confirmed(31),
                report_id: 4,
            })
        );
    }
}
