//! # triage-bridge
//!
//! The adapter between the panel and its game host: request/response
//! calls out ([`BridgeClient::invoke`] and the typed action wrappers)
//! and pushed events in ([`EventBus`] + [`pump_events`]).
//!
//! The two directions are independent channels. Pushes arrive FIFO,
//! but nothing orders them against the completion of `invoke` calls —
//! callers must not assume a response lands before (or after) the
//! event it provoked.
//!
//! Outside the host (development in a plain browser/process),
//! [`BridgeClient::standalone`] turns every `invoke` into a logged
//! no-op resolving to an empty object, so the panel runs headless.

mod client;
mod error;
mod events;

pub use client::BridgeClient;
pub use error::BridgeError;
pub use events::{EventBus, Subscription, attach_dispatcher, pump_events};
