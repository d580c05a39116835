use std::collections::HashMap;
use std::time::Duration;

use triage_core::{
    ActiveTab, InventoryItem, InventoryPatch, Message, NoteId, NotifyKind, PlayerData,
    PlayerHistory, PlayerNote, Report, ReportNote, ReportPatch, ReportStatus, SenderType,
};

use crate::PanelStore;

fn admin_viewer() -> PlayerData {
    PlayerData {
        identifier: "steam:admin".into(),
        name: "Mod".into(),
        is_admin: true,
        permissions: None,
    }
}

fn player_viewer() -> PlayerData {
    PlayerData {
        identifier: "license:abc".into(),
        name: "Avery".into(),
        is_admin: false,
        permissions: None,
    }
}

fn report(id: i64, player_id: &str) -> Report {
    Report {
        id,
        player_id: player_id.into(),
        player_name: "Avery".into(),
        subject: format!("report {id}"),
        category: "bug".into(),
        description: None,
        status: ReportStatus::Open,
        claimed_by: None,
        claimed_by_name: None,
        priority: 0,
        player_coords: None,
        created_at: "2026-01-10T12:00:00Z".into(),
        updated_at: "2026-01-10T12:00:00Z".into(),
        resolved_at: None,
        messages: vec![],
        is_player_online: None,
    }
}

fn message(id: i64, report_id: i64) -> Message {
    Message {
        id,
        report_id,
        sender_id: "steam:admin".into(),
        sender_name: "Mod".into(),
        sender_type: SenderType::Admin,
        message: format!("msg {id}"),
        image_url: None,
        message_type: None,
        audio_url: None,
        audio_duration: None,
        created_at: "2026-01-10T12:01:00Z".into(),
    }
}

fn confirmed_report_note(id: i64, report_id: i64, text: &str) -> ReportNote {
    ReportNote {
        id: NoteId::Confirmed(id),
        report_id,
        admin_id: "steam:admin".into(),
        admin_name: "Mod".into(),
        note: text.into(),
        created_at: "2026-01-10T12:00:00Z".into(),
    }
}

// ── Dual-collection consistency ───────────────────────────────────

#[test]
fn report_in_both_collections_stays_identical() {
    let store = PanelStore::new();
    store.set_player_data(admin_viewer());
    // Same id in both: the admin filed a report themselves
    store.set_my_reports(vec![report(1, "steam:admin")]);
    store.set_all_reports(vec![report(1, "steam:admin"), report(2, "license:abc")]);

    store.update_report(&ReportPatch {
        id: 1,
        status: Some(ReportStatus::Claimed),
        claimed_by: Some(Some("steam:other".into())),
        ..ReportPatch::default()
    });
    store.add_message(message(10, 1));
    store.set_player_online("steam:admin", true);

    let mine = store.my_reports();
    let all = store.all_reports();
    assert_eq!(mine[0], all[0], "copies diverged after mutations");
    assert_eq!(mine[0].status, ReportStatus::Claimed);
    assert_eq!(mine[0].messages.len(), 1);
    assert_eq!(mine[0].is_player_online, Some(true));
}

#[test]
fn update_report_keeps_list_position() {
    let store = PanelStore::new();
    store.set_all_reports(vec![
        report(1, "a"),
        report(2, "b"),
        report(3, "c"),
    ]);

    store.update_report(&ReportPatch {
        id: 2,
        priority: Some(3),
        ..ReportPatch::default()
    });

    let all = store.all_reports();
    assert_eq!(all.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(all[1].priority, 3);
}

#[test]
fn add_report_routes_by_viewer_role() {
    // A non-admin player sees only their own report
    let store = PanelStore::new();
    store.set_player_data(player_viewer());
    store.add_report(report(1, "license:abc"));
    store.add_report(report(2, "license:other"));
    assert_eq!(store.my_reports().len(), 1);
    assert!(store.all_reports().is_empty());

    // An admin gets everything in all_reports, own reports in both
    let store = PanelStore::new();
    store.set_player_data(admin_viewer());
    store.add_report(report(3, "steam:admin"));
    store.add_report(report(4, "license:abc"));
    assert_eq!(store.my_reports().len(), 1);
    assert_eq!(store.all_reports().len(), 2);
    // Newest first
    assert_eq!(store.all_reports()[0].id, 4);
}

#[test]
fn remove_report_clears_selection_only_for_removed_id() {
    let store = PanelStore::new();
    store.set_all_reports(vec![report(1, "a"), report(2, "b")]);

    store.select_report(Some(1));
    store.remove_report(2);
    assert_eq!(store.selected_report_id(), Some(1));

    store.remove_report(1);
    assert_eq!(store.selected_report_id(), None);
    assert_eq!(store.all_reports().len(), 0);
}

// ── Selection and filtering ───────────────────────────────────────

#[test]
fn selected_report_is_scoped_to_active_tab() {
    let store = PanelStore::new();
    store.set_my_reports(vec![report(1, "license:abc")]);
    store.set_all_reports(vec![report(2, "license:other")]);

    store.select_report(Some(2));
    // my-reports tab: id 2 only exists in the admin collection
    assert!(store.selected_report().is_none());

    store.set_active_tab(ActiveTab::Admin);
    // switching tabs cleared the selection
    assert_eq!(store.selected_report_id(), None);
    store.select_report(Some(2));
    assert_eq!(store.selected_report().unwrap().id, 2);
}

#[test]
fn filter_applies_only_on_admin_tab() {
    let store = PanelStore::new();
    let mut resolved = report(2, "b");
    resolved.status = ReportStatus::Resolved;
    store.set_my_reports(vec![report(1, "a"), resolved.clone()]);
    store.set_all_reports(vec![report(3, "c"), resolved.clone()]);

    store.update_filter(|f| f.status = Some(ReportStatus::Open));

    // Player tab: backend's list comes back untouched
    assert_eq!(store.filtered_reports().len(), 2);

    store.set_active_tab(ActiveTab::Admin);
    let filtered = store.filtered_reports();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, 3);
}

#[test]
fn filter_player_id_substring() {
    let store = PanelStore::new();
    store.set_active_tab(ActiveTab::Admin);
    store.set_all_reports(vec![report(1, "license:aaa111"), report(2, "license:bbb")]);

    store.update_filter(|f| f.player_id = Some("aaa".into()));
    let filtered = store.filtered_reports();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, 1);
}

// ── Optimistic note reconciliation ────────────────────────────────

#[test]
fn confirmed_note_replaces_matching_optimistic_note() {
    let store = PanelStore::new();
    store.set_player_data(admin_viewer());

    let pending = store
        .add_optimistic_report_note(5, "checked logs, looks fine")
        .unwrap();
    assert!(pending.id.is_pending());
    assert_eq!(store.report_notes(5).len(), 1);

    // Server confirmation echoes the same text with a real id
    store.add_report_note(confirmed_report_note(42, 5, "checked logs, looks fine"));

    let notes = store.report_notes(5);
    assert_eq!(notes.len(), 1, "optimistic twin must be reconciled away");
    assert_eq!(notes[0].id, NoteId::Confirmed(42));
}

#[test]
fn confirmed_note_with_different_text_keeps_optimistic_note() {
    let store = PanelStore::new();
    store.set_player_data(admin_viewer());

    let _ = store.add_optimistic_report_note(5, "first note").unwrap();
    store.add_report_note(confirmed_report_note(42, 5, "someone else's note"));

    let notes = store.report_notes(5);
    assert_eq!(notes.len(), 2);
    // Confirmed note is prepended
    assert_eq!(notes[0].id, NoteId::Confirmed(42));
    assert!(notes[1].id.is_pending());
}

#[test]
fn reconciliation_is_scoped_to_parent_report() {
    let store = PanelStore::new();
    store.set_player_data(admin_viewer());

    let _ = store.add_optimistic_report_note(5, "same text").unwrap();
    // Confirmation for a different report must not consume it
    store.add_report_note(confirmed_report_note(42, 6, "same text"));

    assert_eq!(store.report_notes(5).len(), 1);
    assert!(store.report_notes(5)[0].id.is_pending());
    assert_eq!(store.report_notes(6).len(), 1);
}

#[test]
fn deleting_absent_note_is_noop() {
    let store = PanelStore::new();
    store.add_report_note(confirmed_report_note(1, 5, "keep me"));

    store.remove_report_note(5, NoteId::Confirmed(99));
    store.remove_report_note(7, NoteId::Confirmed(1));

    assert_eq!(store.report_notes(5).len(), 1);

    // Deleting twice is fine too
    store.remove_report_note(5, NoteId::Confirmed(1));
    store.remove_report_note(5, NoteId::Confirmed(1));
    assert!(store.report_notes(5).is_empty());
}

#[test]
fn optimistic_note_ids_are_session_unique() {
    let store = PanelStore::new();
    store.set_player_data(admin_viewer());

    let a = store.add_optimistic_report_note(1, "a").unwrap();
    let b = store.add_optimistic_report_note(1, "b").unwrap();
    let c = store.add_optimistic_player_note("license:abc", "c").unwrap();
    assert_ne!(a.id, b.id);
    assert_ne!(b.id.wire(), c.id.wire());
    assert!(a.id.wire() < 0, "pending ids are negative on the wire");
}

#[test]
fn player_note_confirmation_patches_loaded_history() {
    let store = PanelStore::new();
    store.set_player_data(admin_viewer());
    store.set_player_history(PlayerHistory {
        player_id: "license:abc".into(),
        player_name: "Avery".into(),
        total_reports: 0,
        open_reports: 0,
        resolved_reports: 0,
        reports: vec![],
        notes: vec![],
        identifiers: None,
    });

    let _ = store
        .add_optimistic_player_note("license:abc", "watch this one")
        .unwrap();
    store.add_player_note(PlayerNote {
        id: NoteId::Confirmed(9),
        player_id: "license:abc".into(),
        admin_id: "steam:admin".into(),
        admin_name: "Mod".into(),
        note: "watch this one".into(),
        created_at: "2026-01-10T12:00:00Z".into(),
    });

    let notes = store.player_notes("license:abc");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, NoteId::Confirmed(9));

    let history = store.player_history().unwrap();
    assert_eq!(history.notes.len(), 1);
    assert_eq!(history.notes[0].id, NoteId::Confirmed(9));
}

#[test]
fn history_for_other_player_is_untouched() {
    let store = PanelStore::new();
    store.set_player_data(admin_viewer());
    store.set_player_history(PlayerHistory {
        player_id: "license:other".into(),
        player_name: "Sam".into(),
        total_reports: 0,
        open_reports: 0,
        resolved_reports: 0,
        reports: vec![],
        notes: vec![],
        identifiers: None,
    });

    store.add_player_note(PlayerNote {
        id: NoteId::Confirmed(9),
        player_id: "license:abc".into(),
        admin_id: "steam:admin".into(),
        admin_name: "Mod".into(),
        note: "note".into(),
        created_at: "2026-01-10T12:00:00Z".into(),
    });

    assert!(store.player_history().unwrap().notes.is_empty());
}

// ── Permissions ───────────────────────────────────────────────────

#[test]
fn permission_map_overrides_admin_flag() {
    let store = PanelStore::new();
    store.set_player_data(PlayerData {
        identifier: "steam:admin".into(),
        name: "Mod".into(),
        is_admin: true,
        permissions: Some(HashMap::new()),
    });
    // Explicit empty map: admin flag is ignored
    assert!(!store.has_permission("reports.delete"));

    let mut perms = HashMap::new();
    let _ = perms.insert("reports.claim".to_string(), true);
    let _ = perms.insert("reports.delete".to_string(), false);
    store.set_player_data(PlayerData {
        identifier: "steam:admin".into(),
        name: "Mod".into(),
        is_admin: false,
        permissions: Some(perms),
    });
    assert!(store.has_permission("reports.claim"));
    assert!(!store.has_permission("reports.delete"));
    assert!(!store.has_permission("reports.unlisted"));
}

#[test]
fn missing_permission_map_falls_back_to_admin_flag() {
    let store = PanelStore::new();
    store.set_player_data(admin_viewer());
    assert!(store.has_permission("anything.at.all"));

    store.set_player_data(player_viewer());
    assert!(!store.has_permission("anything.at.all"));
}

#[test]
fn no_player_data_means_no_permissions() {
    let store = PanelStore::new();
    assert!(!store.has_permission("reports.claim"));
}

// ── Inventory ─────────────────────────────────────────────────────

#[test]
fn inventory_created_lazily_with_defaults() {
    let store = PanelStore::new();
    assert!(store.inventory(1).is_none());

    store.set_inventory_loading(1, true);
    let panel = store.inventory(1).unwrap();
    assert!(panel.loading);
    assert!(panel.items.is_empty());
    assert_eq!(panel.system_name, "");
}

#[test]
fn inventory_partial_patch_preserves_other_fields() {
    let store = PanelStore::new();
    store.set_inventory(
        1,
        InventoryPatch {
            system_name: Some("ox_inventory".into()),
            supports_metadata: Some(true),
            ..InventoryPatch::default()
        },
    );
    store.set_inventory_items(
        1,
        vec![InventoryItem {
            name: "water".into(),
            label: "Water".into(),
            count: 2,
            slot: Some(1),
            weight: None,
            metadata: None,
            image: None,
        }],
    );

    let panel = store.inventory(1).unwrap();
    assert_eq!(panel.system_name, "ox_inventory");
    assert!(panel.supports_metadata);
    assert_eq!(panel.items.len(), 1);
    assert!(!panel.loading, "set_inventory_items clears loading");
}

// ── Notifications ─────────────────────────────────────────────────

// The paused clock auto-advances whenever every task is idle, so a
// plain sleep past the deadline deterministically runs the dismiss
// timer first.

#[tokio::test(start_paused = true)]
async fn notification_auto_dismisses_after_duration() {
    let store = PanelStore::new();
    let _id = store.push_notification("saved", NotifyKind::Success, None);
    assert_eq!(store.notifications().len(), 1);

    tokio::time::sleep(Duration::from_millis(4100)).await;
    assert!(store.notifications().is_empty());
}

#[tokio::test(start_paused = true)]
async fn manual_dismiss_wins_and_timer_is_noop() {
    let store = PanelStore::new();
    let id = store.push_notification("saved", NotifyKind::Info, None);
    let keeper = store.push_notification("still here", NotifyKind::Info, Some(60_000));

    store.dismiss_notification(&id);
    assert_eq!(store.notifications().len(), 1);

    // The stray timer for `id` fires into an empty slot — no effect on
    // the surviving banner.
    tokio::time::sleep(Duration::from_millis(4100)).await;
    let remaining = store.notifications();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, keeper);
}

#[tokio::test(start_paused = true)]
async fn notification_respects_explicit_duration() {
    let store = PanelStore::new();
    let _id = store.push_notification("quick", NotifyKind::Error, Some(500));

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(store.notifications().len(), 1);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(store.notifications().is_empty());
}

#[test]
fn dismiss_without_runtime_is_fine() {
    // No tokio runtime here at all: push still works, dismiss is manual
    let store = PanelStore::new();
    let id = store.push_notification("banner", NotifyKind::Info, None);
    assert_eq!(store.notifications().len(), 1);
    store.dismiss_notification(&id);
    assert!(store.notifications().is_empty());
}

// ── Messages ──────────────────────────────────────────────────────

#[test]
fn set_messages_replaces_thread() {
    let store = PanelStore::new();
    let mut r = report(1, "a");
    r.messages = vec![message(1, 1)];
    store.set_all_reports(vec![r]);

    store.set_messages(1, &[message(2, 1), message(3, 1)]);
    let all = store.all_reports();
    assert_eq!(
        all[0].messages.iter().map(|m| m.id).collect::<Vec<_>>(),
        vec![2, 3]
    );
}

#[test]
fn add_message_ignores_unknown_report() {
    let store = PanelStore::new();
    store.set_all_reports(vec![report(1, "a")]);
    store.add_message(message(1, 999));
    assert!(store.all_reports()[0].messages.is_empty());
}

// ── Hide/clear ────────────────────────────────────────────────────

#[test]
fn clear_session_ui_resets_selection_and_creation() {
    let store = PanelStore::new();
    store.set_visible(true);
    store.set_all_reports(vec![report(1, "a")]);
    store.select_report(Some(1));
    store.set_creating_report(true);

    store.clear_session_ui();
    assert!(!store.is_visible());
    assert_eq!(store.selected_report_id(), None);
    assert!(!store.is_creating_report());
    // Data survives hiding — only session UI state is cleared
    assert_eq!(store.all_reports().len(), 1);
}

// ── Property: collections never diverge ───────────────────────────

mod properties {
    use proptest::prelude::*;

    use super::*;

    #[derive(Clone, Debug)]
    enum Op {
        Add(i64),
        Update(i64, u8),
        Remove(i64),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (1i64..8).prop_map(Op::Add),
            (1i64..8, 0u8..4).prop_map(|(id, priority)| Op::Update(id, priority)),
            (1i64..8).prop_map(Op::Remove),
        ]
    }

    proptest! {
        // Reports filed by an admin viewer land in both collections,
        // which is exactly where divergence would show up.
        #[test]
        fn report_copies_never_diverge(ops in proptest::collection::vec(op_strategy(), 0..40)) {
            let store = PanelStore::new();
            store.set_player_data(admin_viewer());

            for op in ops {
                match op {
                    Op::Add(id) => store.add_report(report(id, "steam:admin")),
                    Op::Update(id, priority) => store.update_report(&ReportPatch {
                        id,
                        priority: Some(priority),
                        ..ReportPatch::default()
                    }),
                    Op::Remove(id) => store.remove_report(id),
                }
            }

            let all = store.all_reports();
            for mine in &store.my_reports() {
                for copy in all.iter().filter(|r| r.id == mine.id) {
                    prop_assert_eq!(mine, copy);
                }
            }
        }
    }
}
