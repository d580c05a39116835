//! Reports and their message threads.
//!
//! A [`Report`] is a player-filed ticket with lifecycle
//! open → claimed → resolved (claimed → open again via unclaim). The
//! backend owns report and message identity; the client never
//! fabricates either.

use serde::{Deserialize, Serialize};

/// Report lifecycle status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Filed, nobody working on it.
    Open,
    /// A staff member has taken ownership.
    Claimed,
    /// Closed out. `resolved_at` is set.
    Resolved,
}

/// Who authored a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    /// The reporting player.
    Player,
    /// A staff member.
    Admin,
    /// Automated system line (claims, resolutions, screenshots).
    System,
}

/// Message body kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Plain chat text.
    Text,
    /// Voice clip — `audio_url`/`audio_duration` carry the payload.
    Voice,
}

/// In-game world position captured when the report was filed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// East/west.
    pub x: f64,
    /// North/south.
    pub y: f64,
    /// Height.
    pub z: f64,
}

/// A report category as configured server-side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryConfig {
    /// Stable category key.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Icon name for the panel.
    pub icon: String,
}

/// A priority level as configured server-side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityConfig {
    /// Numeric priority (0–3).
    pub id: u8,
    /// Display label.
    pub label: String,
    /// Badge color.
    pub color: String,
}

/// A single chat message inside a report thread.
///
/// Append-only: once stored a message is never mutated or deleted.
/// Thread order is arrival order — the client does not re-sort.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Server-assigned id. The client never fabricates message ids.
    pub id: i64,
    /// Report this message belongs to.
    pub report_id: i64,
    /// Sender identifier.
    pub sender_id: String,
    /// Sender display name.
    pub sender_name: String,
    /// Sender role.
    pub sender_type: SenderType,
    /// Text body (may be empty for pure voice messages).
    #[serde(default)]
    pub message: String,
    /// Screenshot attachment URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Body kind. Absent means text (legacy rows).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<MessageType>,
    /// Hosted voice clip URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// Voice clip length in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_duration: Option<f64>,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
}

/// A player-filed support ticket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Server-assigned unique id.
    pub id: i64,
    /// Reporting player's identifier.
    pub player_id: String,
    /// Reporting player's display name.
    pub player_name: String,
    /// Short summary line.
    pub subject: String,
    /// Category key (see [`CategoryConfig`]).
    pub category: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: ReportStatus,
    /// Claiming staff identifier. Present iff status is claimed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_by: Option<String>,
    /// Claiming staff display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_by_name: Option<String>,
    /// Priority 0–3.
    pub priority: u8,
    /// Where the player stood when filing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_coords: Option<Coordinates>,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
    /// ISO 8601 last-update timestamp.
    pub updated_at: String,
    /// ISO 8601 resolution timestamp, once resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<String>,
    /// Chat thread, arrival order.
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Whether the reporting player is currently connected.
    /// Updated independently of report content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_player_online: Option<bool>,
}

impl Report {
    /// Merge a partial update into this report, field by field.
    ///
    /// Absent patch fields keep their current value. Double-option
    /// fields distinguish "absent" from an explicit null (unclaim
    /// sends `claimedBy: null`).
    pub fn apply_patch(&mut self, patch: &ReportPatch) {
        if let Some(subject) = &patch.subject {
            self.subject = subject.clone();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(claimed_by) = &patch.claimed_by {
            self.claimed_by = claimed_by.clone();
        }
        if let Some(claimed_by_name) = &patch.claimed_by_name {
            self.claimed_by_name = claimed_by_name.clone();
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(updated_at) = &patch.updated_at {
            self.updated_at = updated_at.clone();
        }
        if let Some(resolved_at) = &patch.resolved_at {
            self.resolved_at = resolved_at.clone();
        }
        if let Some(online) = patch.is_player_online {
            self.is_player_online = Some(online);
        }
        if let Some(messages) = &patch.messages {
            self.messages = messages.clone();
        }
    }
}

/// Partial report update addressed by id.
///
/// The wire shape of `UPDATE_REPORT`: only the changed fields are
/// present. `Option<Option<_>>` fields decode a JSON `null` as
/// `Some(None)` (clear the field) and an absent key as `None` (keep).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPatch {
    /// Target report id.
    pub id: i64,
    /// New subject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// New category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// New description (`null` clears).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    /// New status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReportStatus>,
    /// New claimer (`null` on unclaim).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_by: Option<Option<String>>,
    /// New claimer name (`null` on unclaim).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_by_name: Option<Option<String>>,
    /// New priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    /// New last-update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Resolution timestamp (`null` on reopen).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<Option<String>>,
    /// Online flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_player_online: Option<bool>,
    /// Full thread replacement (used by history refetches).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<Message>>,
}

impl ReportPatch {
    /// A patch that changes nothing but addresses `id`.
    pub fn for_id(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

/// Admin-view list filter.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportFilter {
    /// Keep only this status. `None` means all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReportStatus>,
    /// Keep only this category key. `None` means all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Substring match on the reporting player's identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    /// Whether the player's own list asked the backend for resolved
    /// reports too. Applied server-side, carried here for the toggle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_resolved: Option<bool>,
}

impl ReportFilter {
    /// Whether a report passes this filter.
    pub fn matches(&self, report: &Report) -> bool {
        if let Some(status) = self.status
            && report.status != status
        {
            return false;
        }
        if let Some(category) = &self.category
            && report.category != *category
        {
            return false;
        }
        if let Some(needle) = &self.player_id
            && !report.player_id.contains(needle.as_str())
        {
            return false;
        }
        true
    }
}
