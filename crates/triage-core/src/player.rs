//! The viewing player, player history snapshots, and aggregate
//! statistics.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::notes::PlayerNote;
use crate::report::ReportStatus;

/// Identity and role of the player viewing the panel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerData {
    /// Stable player identifier.
    pub identifier: String,
    /// Display name.
    pub name: String,
    /// Coarse staff flag (legacy full-access mode).
    pub is_admin: bool,
    /// Fine-grained permission map. When present it is authoritative
    /// and `is_admin` is ignored; when absent `is_admin` grants
    /// everything. See `PanelStore::has_permission`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<HashMap<String, bool>>,
}

/// External account identifiers attached to a player.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerIdentifiers {
    /// Game license.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Steam id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steam: Option<String>,
    /// Discord id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord: Option<String>,
    /// Platform account id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fivem: Option<String>,
}

/// A past report row inside a player history snapshot (no thread).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryReport {
    /// Report id.
    pub id: i64,
    /// Reporting player identifier.
    pub player_id: String,
    /// Reporting player name.
    pub player_name: String,
    /// Subject line.
    pub subject: String,
    /// Category key.
    pub category: String,
    /// Description, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: ReportStatus,
    /// Claiming staff identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_by: Option<String>,
    /// Claiming staff name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_by_name: Option<String>,
    /// Priority 0–3.
    pub priority: u8,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
    /// ISO 8601 resolution timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<String>,
}

/// Everything staff see when inspecting one player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerHistory {
    /// Subject player identifier.
    pub player_id: String,
    /// Subject player name.
    pub player_name: String,
    /// Lifetime report count.
    pub total_reports: i64,
    /// Currently open.
    pub open_reports: i64,
    /// Resolved.
    pub resolved_reports: i64,
    /// Past reports, newest first.
    pub reports: Vec<HistoryReport>,
    /// Staff notes on this player, newest first.
    pub notes: Vec<PlayerNote>,
    /// External identifiers, when the backend shares them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifiers: Option<PlayerIdentifiers>,
}

/// Per-staff-member leaderboard row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    /// Staff identifier.
    pub admin_id: String,
    /// Staff display name.
    pub admin_name: String,
    /// Reports claimed.
    pub claimed: i64,
    /// Reports resolved.
    pub resolved: i64,
    /// Messages sent.
    pub messages: i64,
}

/// Report count for one category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    /// Category key.
    pub category: String,
    /// Report count.
    pub count: i64,
}

/// Report count for one priority level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityCount {
    /// Priority 0–3.
    pub priority: u8,
    /// Report count.
    pub count: i64,
}

/// Aggregate panel statistics snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Lifetime report count.
    pub total_reports: i64,
    /// Currently open.
    pub open_reports: i64,
    /// Currently claimed.
    pub claimed_reports: i64,
    /// Resolved.
    pub resolved_reports: i64,
    /// Mean open→resolved time in seconds.
    pub avg_resolution_time: f64,
    /// Breakdown by category.
    pub reports_by_category: Vec<CategoryStats>,
    /// Breakdown by priority.
    pub reports_by_priority: Vec<PriorityCount>,
    /// Most active staff, descending.
    pub admin_leaderboard: Vec<AdminStats>,
    /// Daily report counts for the activity chart.
    pub recent_activity: Vec<ActivityPoint>,
}

/// One day of report volume.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPoint {
    /// Calendar date (`YYYY-MM-DD`).
    pub date: String,
    /// Reports filed that day.
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_data_decodes_without_permissions() {
        let p: PlayerData = serde_json::from_value(serde_json::json!({
            "identifier": "license:abc",
            "name": "Avery",
            "isAdmin": true,
        }))
        .unwrap();
        assert!(p.permissions.is_none());
        assert!(p.is_admin);
    }

    #[test]
    fn player_history_wire_shape() {
        let h = PlayerHistory {
            player_id: "license:abc".into(),
            player_name: "Avery".into(),
            total_reports: 4,
            open_reports: 1,
            resolved_reports: 3,
            reports: vec![],
            notes: vec![],
            identifiers: None,
        };
        let val = serde_json::to_value(&h).unwrap();
        assert_eq!(val["totalReports"], 4);
        assert!(val.get("identifiers").is_none());
    }
}
