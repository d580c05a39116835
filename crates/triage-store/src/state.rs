//! The full panel state record.
//!
//! Private to the crate: every read and write goes through
//! [`PanelStore`](crate::PanelStore) actions and getters.

use std::collections::HashMap;

use triage_core::{
    ActiveTab, CategoryConfig, InventoryPanel, Notification, PlayerData, PlayerHistory, PlayerNote,
    PriorityConfig, Report, ReportFilter, ReportNote, Statistics, Theme,
};

/// Everything the panel knows, in one place.
#[derive(Debug, Default)]
pub(crate) struct PanelState {
    // UI state
    pub visible: bool,
    pub theme: Theme,
    pub active_tab: ActiveTab,
    pub selected_report_id: Option<i64>,
    pub creating_report: bool,
    pub show_player_info: bool,
    pub selected_player_id: Option<String>,

    // Feature flags
    pub voice_messages_enabled: bool,

    // Data
    pub player: Option<PlayerData>,
    pub my_reports: Vec<Report>,
    pub all_reports: Vec<Report>,
    pub categories: Vec<CategoryConfig>,
    pub priorities: Vec<PriorityConfig>,
    pub locale: HashMap<String, String>,
    pub notifications: Vec<Notification>,

    // Notes and snapshots
    pub report_notes: HashMap<i64, Vec<ReportNote>>,
    pub player_notes: HashMap<String, Vec<PlayerNote>>,
    pub player_history: Option<PlayerHistory>,
    pub statistics: Option<Statistics>,

    // Inventory, lazily created per report
    pub inventory: HashMap<i64, InventoryPanel>,

    // Admin-view filter
    pub filter: ReportFilter,
}

impl PanelState {
    /// Run a closure over every copy of the report with this id, in
    /// both collections. The same id may legitimately live in both
    /// (owner viewing + staff viewing); both copies must stay
    /// content-identical, so every by-id mutation funnels through here.
    pub(crate) fn for_report_copies(&mut self, id: i64, mut f: impl FnMut(&mut Report)) {
        for report in self.my_reports.iter_mut().filter(|r| r.id == id) {
            f(report);
        }
        for report in self.all_reports.iter_mut().filter(|r| r.id == id) {
            f(report);
        }
    }
}
