//! The panel store: mutation actions and derived getters.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use triage_core::{
    ActiveTab, CategoryConfig, InventoryChangeLog, InventoryItem, InventoryPanel, InventoryPatch,
    Message, NoteId, Notification, NotifyKind, PlayerData, PlayerHistory, PlayerNote,
    PriorityConfig, Report, ReportFilter, ReportNote, ReportPatch, Statistics, Theme,
};

use crate::state::PanelState;

/// Store tunables.
#[derive(Clone, Copy, Debug)]
pub struct StoreConfig {
    /// Auto-dismiss delay for notifications without an explicit
    /// duration, in milliseconds.
    pub notification_duration_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            notification_duration_ms: 4000,
        }
    }
}

/// The single source of truth for panel state.
///
/// Cheap to clone (shared interior). All mutation happens through the
/// named actions below; reads return owned snapshots so no lock guard
/// ever escapes. Actions are synchronous — an optimistic mutation is
/// visible before the corresponding backend call is even sent.
#[derive(Clone)]
pub struct PanelStore {
    inner: Arc<RwLock<PanelState>>,
    config: StoreConfig,
    /// Session-unique local note id source, seeded from wall-clock
    /// millis so ids stay distinguishable across panel restarts too.
    local_note_ids: Arc<AtomicU64>,
}

impl Default for PanelStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelStore {
    /// New store with default config.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// New store with explicit tunables.
    pub fn with_config(config: StoreConfig) -> Self {
        let seed = chrono::Utc::now().timestamp_millis().max(1) as u64;
        Self {
            inner: Arc::new(RwLock::new(PanelState::default())),
            config,
            local_note_ids: Arc::new(AtomicU64::new(seed)),
        }
    }

    fn next_local_note_id(&self) -> u64 {
        self.local_note_ids.fetch_add(1, Ordering::Relaxed)
    }

    // ─────────────────────────────────────────────────────────────────
    // UI state
    // ─────────────────────────────────────────────────────────────────

    /// Show or hide the panel.
    pub fn set_visible(&self, visible: bool) {
        self.inner.write().visible = visible;
    }

    /// Switch theme.
    pub fn set_theme(&self, theme: Theme) {
        self.inner.write().theme = theme;
    }

    /// Switch tab. Clears the report selection — selection is scoped
    /// to the tab it was made on.
    pub fn set_active_tab(&self, tab: ActiveTab) {
        let mut state = self.inner.write();
        state.active_tab = tab;
        state.selected_report_id = None;
    }

    /// Select a report (or clear with `None`).
    pub fn select_report(&self, id: Option<i64>) {
        self.inner.write().selected_report_id = id;
    }

    /// Toggle the create-report form.
    pub fn set_creating_report(&self, creating: bool) {
        self.inner.write().creating_report = creating;
    }

    /// Toggle the player info side panel.
    pub fn set_show_player_info(&self, show: bool) {
        self.inner.write().show_player_info = show;
    }

    /// Select a player for the info side panel.
    pub fn select_player(&self, id: Option<String>) {
        self.inner.write().selected_player_id = id;
    }

    /// Enable or disable the voice message controls.
    pub fn set_voice_messages_enabled(&self, enabled: bool) {
        self.inner.write().voice_messages_enabled = enabled;
    }

    /// Replace the viewer identity.
    pub fn set_player_data(&self, player: PlayerData) {
        self.inner.write().player = Some(player);
    }

    /// Replace the category config.
    pub fn set_categories(&self, categories: Vec<CategoryConfig>) {
        self.inner.write().categories = categories;
    }

    /// Replace the priority config.
    pub fn set_priorities(&self, priorities: Vec<PriorityConfig>) {
        self.inner.write().priorities = priorities;
    }

    /// Replace the locale table.
    pub fn set_locale(&self, locale: HashMap<String, String>) {
        self.inner.write().locale = locale;
    }

    /// Edit the admin-view filter in place.
    pub fn update_filter(&self, f: impl FnOnce(&mut ReportFilter)) {
        f(&mut self.inner.write().filter);
    }

    // ─────────────────────────────────────────────────────────────────
    // Reports
    // ─────────────────────────────────────────────────────────────────

    /// Replace the player's own report list wholesale.
    pub fn set_my_reports(&self, reports: Vec<Report>) {
        self.inner.write().my_reports = reports;
    }

    /// Replace the staff report list wholesale.
    pub fn set_all_reports(&self, reports: Vec<Report>) {
        self.inner.write().all_reports = reports;
    }

    /// Insert a new report at the front of whichever collections the
    /// viewer sees it in: their own list when they filed it, the staff
    /// list when they are staff. The same report may land in both.
    pub fn add_report(&self, report: Report) {
        let mut state = self.inner.write();
        let is_own = state
            .player
            .as_ref()
            .is_some_and(|p| p.identifier == report.player_id);
        let is_admin = state.player.as_ref().is_some_and(|p| p.is_admin);

        if is_own {
            state.my_reports.insert(0, report.clone());
        }
        if is_admin {
            state.all_reports.insert(0, report);
        }
    }

    /// Merge a partial update into every copy of the report, keeping
    /// list positions stable.
    pub fn update_report(&self, patch: &ReportPatch) {
        self.inner
            .write()
            .for_report_copies(patch.id, |report| report.apply_patch(patch));
    }

    /// Drop a report from both collections. Clears the selection if it
    /// pointed at the removed report.
    pub fn remove_report(&self, id: i64) {
        let mut state = self.inner.write();
        state.my_reports.retain(|r| r.id != id);
        state.all_reports.retain(|r| r.id != id);
        if state.selected_report_id == Some(id) {
            state.selected_report_id = None;
        }
    }

    /// Append a message to its report's thread in both collections.
    ///
    /// No dedup by message id: `MESSAGE_SENT` and `NEW_MESSAGE` are
    /// both routed here, and the backend is trusted not to deliver
    /// both for one logical message.
    pub fn add_message(&self, message: Message) {
        self.inner
            .write()
            .for_report_copies(message.report_id, |report| {
                report.messages.push(message.clone());
            });
    }

    /// Replace a report's full thread (history refetch).
    pub fn set_messages(&self, report_id: i64, messages: &[Message]) {
        self.inner.write().for_report_copies(report_id, |report| {
            report.messages = messages.to_vec();
        });
    }

    /// Patch the online flag on every report filed by this player.
    pub fn set_player_online(&self, player_id: &str, online: bool) {
        let mut guard = self.inner.write();
        let state = &mut *guard;
        for report in state
            .my_reports
            .iter_mut()
            .chain(state.all_reports.iter_mut())
            .filter(|r| r.player_id == player_id)
        {
            report.is_player_online = Some(online);
        }
    }

    // ─────────────────────────────────────────────────────────────────
    // Report notes
    // ─────────────────────────────────────────────────────────────────

    /// Replace the note list for one report.
    pub fn set_report_notes(&self, report_id: i64, notes: Vec<ReportNote>) {
        let _ = self.inner.write().report_notes.insert(report_id, notes);
    }

    /// Add a report note, reconciling optimistic entries: a confirmed
    /// note first removes any pending note on the same report with the
    /// same text, then is prepended. Pending notes prepend as-is.
    pub fn add_report_note(&self, note: ReportNote) {
        let mut state = self.inner.write();
        let notes = state.report_notes.entry(note.report_id).or_default();
        if !note.id.is_pending() {
            notes.retain(|n| !(n.id.is_pending() && n.note == note.note));
        }
        notes.insert(0, note);
    }

    /// Fabricate and insert a pending note authored by the viewer.
    /// Returns the note so the caller can echo it to the backend.
    pub fn add_optimistic_report_note(&self, report_id: i64, text: &str) -> Option<ReportNote> {
        let author = self.player_data()?;
        let note = ReportNote {
            id: NoteId::Pending(self.next_local_note_id()),
            report_id,
            admin_id: author.identifier,
            admin_name: author.name,
            note: text.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        self.add_report_note(note.clone());
        Some(note)
    }

    /// Remove a report note by id. Removing an id that is already gone
    /// (e.g. its optimistic twin was reconciled away) is a no-op.
    pub fn remove_report_note(&self, report_id: i64, note_id: NoteId) {
        if let Some(notes) = self.inner.write().report_notes.get_mut(&report_id) {
            notes.retain(|n| n.id != note_id);
        }
    }

    // ─────────────────────────────────────────────────────────────────
    // Player notes
    // ─────────────────────────────────────────────────────────────────

    /// Replace the note list for one player.
    pub fn set_player_notes(&self, player_id: &str, notes: Vec<PlayerNote>) {
        let _ = self
            .inner
            .write()
            .player_notes
            .insert(player_id.to_string(), notes);
    }

    /// Add a player note with the same reconciliation rule as report
    /// notes. Also patches a loaded history snapshot for the same
    /// player so both views stay consistent without a refetch.
    pub fn add_player_note(&self, note: PlayerNote) {
        let mut state = self.inner.write();
        let notes = state.player_notes.entry(note.player_id.clone()).or_default();
        if !note.id.is_pending() {
            notes.retain(|n| !(n.id.is_pending() && n.note == note.note));
        }
        notes.insert(0, note.clone());

        if let Some(history) = state.player_history.as_mut()
            && history.player_id == note.player_id
            && !note.id.is_pending()
        {
            history
                .notes
                .retain(|n| !(n.id.is_pending() && n.note == note.note));
            history.notes.insert(0, note);
        }
    }

    /// Fabricate and insert a pending player note authored by the
    /// viewer.
    pub fn add_optimistic_player_note(&self, player_id: &str, text: &str) -> Option<PlayerNote> {
        let author = self.player_data()?;
        let note = PlayerNote {
            id: NoteId::Pending(self.next_local_note_id()),
            player_id: player_id.to_string(),
            admin_id: author.identifier,
            admin_name: author.name,
            note: text.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        self.add_player_note(note.clone());
        Some(note)
    }

    /// Remove a player note by id (idempotent).
    pub fn remove_player_note(&self, player_id: &str, note_id: NoteId) {
        if let Some(notes) = self.inner.write().player_notes.get_mut(player_id) {
            notes.retain(|n| n.id != note_id);
        }
    }

    /// Replace the player history snapshot.
    pub fn set_player_history(&self, history: PlayerHistory) {
        self.inner.write().player_history = Some(history);
    }

    /// Replace the statistics snapshot.
    pub fn set_statistics(&self, statistics: Statistics) {
        self.inner.write().statistics = Some(statistics);
    }

    // ─────────────────────────────────────────────────────────────────
    // Inventory
    // ─────────────────────────────────────────────────────────────────

    /// Merge a partial inventory update for one report. The panel is
    /// created with defaults on first touch; unmentioned fields keep
    /// their value.
    pub fn set_inventory(&self, report_id: i64, patch: InventoryPatch) {
        self.inner
            .write()
            .inventory
            .entry(report_id)
            .or_default()
            .apply(patch);
    }

    /// Flip the loading flag for one report's inventory.
    pub fn set_inventory_loading(&self, report_id: i64, loading: bool) {
        self.set_inventory(
            report_id,
            InventoryPatch {
                loading: Some(loading),
                ..InventoryPatch::default()
            },
        );
    }

    /// Replace the item stacks and clear the loading flag.
    pub fn set_inventory_items(&self, report_id: i64, items: Vec<InventoryItem>) {
        self.set_inventory(
            report_id,
            InventoryPatch {
                items: Some(items),
                loading: Some(false),
                ..InventoryPatch::default()
            },
        );
    }

    /// Replace the audit log.
    pub fn set_inventory_action_log(&self, report_id: i64, log: Vec<InventoryChangeLog>) {
        self.set_inventory(
            report_id,
            InventoryPatch {
                action_log: Some(log),
                ..InventoryPatch::default()
            },
        );
    }

    /// Snapshot of one report's inventory panel, if ever touched.
    pub fn inventory(&self, report_id: i64) -> Option<InventoryPanel> {
        self.inner.read().inventory.get(&report_id).cloned()
    }

    // ─────────────────────────────────────────────────────────────────
    // Notifications
    // ─────────────────────────────────────────────────────────────────

    /// Append a transient banner and schedule its auto-dismiss.
    ///
    /// Returns the generated id. When called inside a tokio runtime
    /// the banner removes itself after its duration (default from
    /// [`StoreConfig`]); explicit [`dismiss_notification`] wins the
    /// race and makes the timer a no-op. Outside a runtime the banner
    /// stays until dismissed.
    ///
    /// [`dismiss_notification`]: Self::dismiss_notification
    pub fn push_notification(
        &self,
        message: &str,
        kind: NotifyKind,
        duration_ms: Option<u64>,
    ) -> String {
        let id = Uuid::now_v7().to_string();
        let duration = duration_ms.unwrap_or(self.config.notification_duration_ms);
        self.inner.write().notifications.push(Notification {
            id: id.clone(),
            message: message.to_string(),
            kind,
            duration_ms,
        });

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let store = self.clone();
            let timer_id = id.clone();
            drop(handle.spawn(async move {
                tokio::time::sleep(Duration::from_millis(duration)).await;
                store.dismiss_notification(&timer_id);
            }));
        } else {
            debug!(id, "no runtime, notification will not auto-dismiss");
        }
        id
    }

    /// Remove a banner. Safe to call for an id that is already gone
    /// (stray auto-dismiss timers land here after a manual dismiss).
    pub fn dismiss_notification(&self, id: &str) {
        self.inner.write().notifications.retain(|n| n.id != id);
    }

    /// Current banners, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.inner.read().notifications.clone()
    }

    // ─────────────────────────────────────────────────────────────────
    // Permissions
    // ─────────────────────────────────────────────────────────────────

    /// Check a named permission.
    ///
    /// When the viewer carries a permission map it is authoritative:
    /// the exact boolean is returned and a missing key means `false`,
    /// even for admins. Without a map, the coarse `is_admin` flag
    /// grants everything — the legacy full-access mode, preserved as a
    /// compatibility rule.
    pub fn has_permission(&self, permission: &str) -> bool {
        let state = self.inner.read();
        let Some(player) = state.player.as_ref() else {
            return false;
        };
        match &player.permissions {
            Some(map) => map.get(permission).copied().unwrap_or(false),
            None => player.is_admin,
        }
    }

    // ─────────────────────────────────────────────────────────────────
    // Getters
    // ─────────────────────────────────────────────────────────────────

    /// Whether the panel is shown.
    pub fn is_visible(&self) -> bool {
        self.inner.read().visible
    }

    /// Current theme.
    pub fn theme(&self) -> Theme {
        self.inner.read().theme
    }

    /// Current tab.
    pub fn active_tab(&self) -> ActiveTab {
        self.inner.read().active_tab
    }

    /// Selected report id, if any.
    pub fn selected_report_id(&self) -> Option<i64> {
        self.inner.read().selected_report_id
    }

    /// Whether the create form is open.
    pub fn is_creating_report(&self) -> bool {
        self.inner.read().creating_report
    }

    /// Whether the player info side panel is open.
    pub fn show_player_info(&self) -> bool {
        self.inner.read().show_player_info
    }

    /// Player selected for the info side panel.
    pub fn selected_player_id(&self) -> Option<String> {
        self.inner.read().selected_player_id.clone()
    }

    /// Whether voice messages are enabled.
    pub fn voice_messages_enabled(&self) -> bool {
        self.inner.read().voice_messages_enabled
    }

    /// Viewer identity snapshot.
    pub fn player_data(&self) -> Option<PlayerData> {
        self.inner.read().player.clone()
    }

    /// Own-report list snapshot.
    pub fn my_reports(&self) -> Vec<Report> {
        self.inner.read().my_reports.clone()
    }

    /// Staff report list snapshot.
    pub fn all_reports(&self) -> Vec<Report> {
        self.inner.read().all_reports.clone()
    }

    /// Category config snapshot.
    pub fn categories(&self) -> Vec<CategoryConfig> {
        self.inner.read().categories.clone()
    }

    /// Priority config snapshot.
    pub fn priorities(&self) -> Vec<PriorityConfig> {
        self.inner.read().priorities.clone()
    }

    /// Locale table snapshot.
    pub fn locale(&self) -> HashMap<String, String> {
        self.inner.read().locale.clone()
    }

    /// Admin-view filter snapshot.
    pub fn filter(&self) -> ReportFilter {
        self.inner.read().filter.clone()
    }

    /// The selected report, looked up in the collection belonging to
    /// the active tab only — never the other one.
    pub fn selected_report(&self) -> Option<Report> {
        let state = self.inner.read();
        let id = state.selected_report_id?;
        let reports = match state.active_tab {
            ActiveTab::Admin => &state.all_reports,
            _ => &state.my_reports,
        };
        reports.iter().find(|r| r.id == id).cloned()
    }

    /// The report list for the active tab, filtered.
    ///
    /// Filtering applies only on the admin tab; the player's own list
    /// is exactly what the backend returned for the current
    /// include-resolved toggle, unfiltered.
    pub fn filtered_reports(&self) -> Vec<Report> {
        let state = self.inner.read();
        match state.active_tab {
            ActiveTab::Admin => state
                .all_reports
                .iter()
                .filter(|r| state.filter.matches(r))
                .cloned()
                .collect(),
            _ => state.my_reports.clone(),
        }
    }

    /// Notes for one report, newest first.
    pub fn report_notes(&self, report_id: i64) -> Vec<ReportNote> {
        self.inner
            .read()
            .report_notes
            .get(&report_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Notes for one player, newest first.
    pub fn player_notes(&self, player_id: &str) -> Vec<PlayerNote> {
        self.inner
            .read()
            .player_notes
            .get(player_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Player history snapshot, if loaded.
    pub fn player_history(&self) -> Option<PlayerHistory> {
        self.inner.read().player_history.clone()
    }

    /// Statistics snapshot, if loaded.
    pub fn statistics(&self) -> Option<Statistics> {
        self.inner.read().statistics.clone()
    }

    /// Clear selection and in-progress creation state. Used when the
    /// panel is hidden.
    pub fn clear_session_ui(&self) {
        let mut state = self.inner.write();
        state.visible = false;
        state.selected_report_id = None;
        state.creating_report = false;
    }
}

impl std::fmt::Debug for PanelStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.read();
        f.debug_struct("PanelStore")
            .field("visible", &state.visible)
            .field("my_reports", &state.my_reports.len())
            .field("all_reports", &state.all_reports.len())
            .field("notifications", &state.notifications.len())
            .finish_non_exhaustive()
    }
}
