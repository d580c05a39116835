//! # triage-settings
//!
//! Configuration for the triage panel runtime, loaded in three layers
//! (later wins):
//!
//! 1. **Compiled defaults** — [`TriageSettings::default()`]
//! 2. **Settings file** — JSON, deep-merged over defaults (partial
//!    files are fine; only the keys present override)
//! 3. **Environment variables** — `TRIAGE_*` overrides
//!
//! Loading never hard-fails on bad values: out-of-range numbers are
//! clamped with a warning so an operator typo degrades instead of
//! taking the panel down.

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings_from_path};
pub use types::{BridgeSettings, PanelSettings, TriageSettings, VoiceSettings};
