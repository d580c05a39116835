//! Staff notes, report-scoped and player-scoped.
//!
//! Notes are the one place the panel writes optimistically: a note the
//! staff member just typed is shown immediately with a local placeholder
//! identity, then swapped for the server-confirmed row when its echo
//! arrives. [`NoteId`] makes the two identities distinct types instead
//! of overloading the sign of one integer.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Note identity: locally fabricated or server-confirmed.
///
/// The wire format is a bare signed integer — the backend assigns
/// positive ids, and the legacy panel encoded optimistic entries as
/// negative timestamps. Decoding keeps that contract: negative values
/// become [`NoteId::Pending`] with their magnitude as the local id,
/// everything else becomes [`NoteId::Confirmed`].
///
/// Reconciliation never compares ids across the two variants; a
/// confirmed note replaces a pending one by parent + exact text match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoteId {
    /// Session-local placeholder, awaiting server confirmation.
    Pending(u64),
    /// Server-assigned id.
    Confirmed(i64),
}

impl NoteId {
    /// Whether this is a local placeholder.
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// The signed wire representation (pending ids are negative).
    pub fn wire(self) -> i64 {
        match self {
            Self::Pending(local) => -(local as i64),
            Self::Confirmed(id) => id,
        }
    }
}

impl Serialize for NoteId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.wire())
    }
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        if raw < 0 {
            let local = raw
                .checked_neg()
                .ok_or_else(|| D::Error::custom("note id out of range"))?;
            Ok(Self::Pending(local as u64))
        } else {
            Ok(Self::Confirmed(raw))
        }
    }
}

/// A staff note attached to one report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportNote {
    /// Note identity (see [`NoteId`]).
    pub id: NoteId,
    /// Parent report.
    pub report_id: i64,
    /// Authoring staff identifier.
    pub admin_id: String,
    /// Authoring staff display name.
    pub admin_name: String,
    /// Note text.
    pub note: String,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
}

/// A staff note attached to a player, across all their reports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerNote {
    /// Note identity (see [`NoteId`]).
    pub id: NoteId,
    /// Subject player's identifier.
    pub player_id: String,
    /// Authoring staff identifier.
    pub admin_id: String,
    /// Authoring staff display name.
    pub admin_name: String,
    /// Note text.
    pub note: String,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
}
