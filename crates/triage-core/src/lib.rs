//! # triage-core
//!
//! Domain types for the triage player-support panel: reports and their
//! message threads, staff notes (report- and player-scoped), inventory
//! snapshots, player history/statistics snapshots, and the shared text
//! helpers the panel renders with.
//!
//! All wire-facing types serialize as camelCase JSON to match the
//! backend contract. Decoding is tolerant: optional fields default
//! rather than fail, since the backend omits keys it has no value for.

pub mod inventory;
pub mod notes;
pub mod notify;
pub mod player;
pub mod report;
pub mod text;
pub mod ui;

pub use inventory::{
    InventoryAction, InventoryChangeLog, InventoryItem, InventoryItemInfo, InventoryPanel,
    InventoryPatch,
};
pub use notes::{NoteId, PlayerNote, ReportNote};
pub use notify::{Notification, NotifyKind};
pub use player::{
    ActivityPoint, AdminStats, CategoryStats, HistoryReport, PlayerData, PlayerHistory,
    PlayerIdentifiers, PriorityCount, Statistics,
};
pub use report::{
    CategoryConfig, Coordinates, Message, MessageType, PriorityConfig, Report, ReportFilter,
    ReportPatch, ReportStatus, SenderType,
};
pub use ui::{ActiveTab, Theme};
