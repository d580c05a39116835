//! # triage-events
//!
//! The backend push-event contract as a closed enum, plus the
//! dispatcher that folds each event into the
//! [`PanelStore`](triage_store::PanelStore).
//!
//! The wire format is `{"type": "<SCREAMING_NAME>", "data": ...}`.
//! Modeling the event set as a tagged enum (instead of the legacy
//! string-keyed switch) makes dispatch exhaustive: adding a variant
//! without a dispatcher arm is a compile error.

mod dispatch;
mod event;

pub use dispatch::{Dispatcher, LogSoundSink, SoundSink};
pub use event::{
    NoteDeletedData, NotificationData, OnlineStatusData, PanelEvent, PlayerNoteDeletedData,
    PlayerNotesData, PlaySoundData, RemoveReportData, ReportNotesData, SetMessagesData,
    ShowUiData,
};
