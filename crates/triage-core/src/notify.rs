//! Transient notification banners.

use serde::{Deserialize, Serialize};

/// Banner severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyKind {
    /// Action completed.
    Success,
    /// Action failed.
    Error,
    /// Neutral information.
    Info,
}

/// A transient banner shown in the panel.
///
/// Identity is client-local — notifications never round-trip to the
/// backend. Each banner auto-dismisses after `duration_ms` (the store
/// default applies when unset) unless clicked away first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Client-generated id.
    pub id: String,
    /// Banner text.
    pub message: String,
    /// Severity.
    #[serde(rename = "type")]
    pub kind: NotifyKind,
    /// Auto-dismiss delay override in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}
