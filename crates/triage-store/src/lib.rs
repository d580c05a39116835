//! # triage-store
//!
//! The client state store for the triage panel — the single source of
//! truth for reports, message threads, staff notes, inventory
//! snapshots, and notifications.
//!
//! The store is an explicit container behind a cloneable handle:
//! mutation only through named actions, reads only through getters.
//! UI actions mutate optimistically *before* the backend call goes
//! out; the event dispatcher later folds the authoritative echo back
//! in, reconciling optimistic entries (see
//! [`PanelStore::add_report_note`]).
//!
//! Two invariants the actions maintain:
//!
//! - A report id present in both `my_reports` and `all_reports`
//!   (owner viewing + staff viewing) has content-identical copies —
//!   every by-id mutation is applied to both collections.
//! - There is no rollback path: an optimistic write whose server
//!   confirmation never arrives stays. This mirrors the backend
//!   contract (at-least-once, order-preserving delivery) and is a
//!   deliberate non-feature.

mod state;
mod store;

pub use store::{PanelStore, StoreConfig};

#[cfg(test)]
mod tests;
