//! Player inventory snapshots shown inside a report.
//!
//! The backend streams inventory data in partial updates (items, the
//! item catalog, and the audit log arrive separately), so the panel's
//! per-report [`InventoryPanel`] is built up by merging patches over
//! defaults — a partial update never drops fields it does not mention.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Staff inventory interventions the backend records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryAction {
    /// Items granted.
    Add,
    /// Items taken.
    Remove,
    /// Count set outright.
    Set,
    /// Item metadata edited.
    MetadataEdit,
}

/// One stack in a player's inventory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Item key.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Stack count.
    pub count: i64,
    /// Slot index, for slot-based inventory systems.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<i64>,
    /// Unit weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Item metadata blob (durability, serials — system-specific).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    /// Icon URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Catalog entry for a known item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemInfo {
    /// Item key.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Unit weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Icon URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Audit row for one staff inventory intervention.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryChangeLog {
    /// Row id.
    pub id: i64,
    /// Acting staff identifier.
    pub admin_id: String,
    /// Acting staff name.
    pub admin_name: String,
    /// Affected player identifier.
    pub player_id: String,
    /// Affected player name.
    pub player_name: String,
    /// Report the action was taken from.
    pub report_id: i64,
    /// What was done.
    pub action: InventoryAction,
    /// Item key.
    pub item_name: String,
    /// Item label.
    pub item_label: String,
    /// Count before.
    pub count_before: i64,
    /// Count after.
    pub count_after: i64,
    /// Serialized metadata before a metadata edit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_before: Option<String>,
    /// Serialized metadata after a metadata edit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_after: Option<String>,
    /// ISO 8601 timestamp.
    pub created_at: String,
}

/// Per-report inventory view state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryPanel {
    /// Current stacks.
    pub items: Vec<InventoryItem>,
    /// Item catalog keyed by item name.
    pub item_list: HashMap<String, InventoryItemInfo>,
    /// Fetch in flight.
    pub loading: bool,
    /// Inline error from the last failed operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Which inventory system the server runs.
    pub system_name: String,
    /// Whether that system supports metadata editing.
    pub supports_metadata: bool,
    /// Staff intervention audit log.
    pub action_log: Vec<InventoryChangeLog>,
}

/// Partial inventory update. Same merge rule as [`InventoryPanel`]
/// fields: absent keys keep their current (or default) value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryPatch {
    /// Replace the stacks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<InventoryItem>>,
    /// Replace the catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_list: Option<HashMap<String, InventoryItemInfo>>,
    /// Set the loading flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loading: Option<bool>,
    /// Set or clear the inline error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Option<String>>,
    /// Set the system name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_name: Option<String>,
    /// Set the metadata capability flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_metadata: Option<bool>,
    /// Replace the audit log.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_log: Option<Vec<InventoryChangeLog>>,
}

impl InventoryPanel {
    /// Merge a partial update into this panel. Unmentioned fields keep
    /// their current value.
    pub fn apply(&mut self, patch: InventoryPatch) {
        if let Some(items) = patch.items {
            self.items = items;
        }
        if let Some(item_list) = patch.item_list {
            self.item_list = item_list;
        }
        if let Some(loading) = patch.loading {
            self.loading = loading;
        }
        if let Some(error) = patch.error {
            self.error = error;
        }
        if let Some(system_name) = patch.system_name {
            self.system_name = system_name;
        }
        if let Some(supports_metadata) = patch.supports_metadata {
            self.supports_metadata = supports_metadata;
        }
        if let Some(action_log) = patch.action_log {
            self.action_log = action_log;
        }
    }
}
