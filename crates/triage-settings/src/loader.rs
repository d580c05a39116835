//! Layered settings loading: defaults ← file ← environment.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::types::TriageSettings;

/// Load settings from a JSON file, deep-merged over compiled defaults,
/// with `TRIAGE_*` environment overrides applied last. A missing file
/// is not an error — defaults apply.
pub fn load_settings_from_path(path: &Path) -> Result<TriageSettings> {
    let mut merged = serde_json::to_value(TriageSettings::default())?;

    if path.exists() {
        let raw = std::fs::read_to_string(path)?;
        let overlay: Value = serde_json::from_str(&raw)?;
        deep_merge(&mut merged, overlay);
        debug!(?path, "settings file merged");
    } else {
        debug!(?path, "no settings file, using defaults");
    }

    let mut settings: TriageSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    settings.validate();
    Ok(settings)
}

/// Recursively merge `overlay` into `base`. Objects merge key-wise;
/// any other value replaces outright.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        let _ = base_map.insert(key, value);
                    }
                }
            }
        }
        (base_slot, value) => *base_slot = value,
    }
}

/// Apply `TRIAGE_*` overrides. The lookup is injected so tests can
/// exercise overrides without mutating process environment.
pub(crate) fn apply_env_overrides(
    settings: &mut TriageSettings,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(url) = lookup("TRIAGE_WEBHOOK_URL") {
        settings.voice.webhook_url = Some(url);
    }
    if let Some(raw) = lookup("TRIAGE_STANDALONE") {
        match raw.as_str() {
            "1" | "true" | "TRUE" => settings.bridge.standalone = true,
            "0" | "false" | "FALSE" => settings.bridge.standalone = false,
            other => warn!(value = other, "ignoring unparseable TRIAGE_STANDALONE"),
        }
    }
    if let Some(raw) = lookup("TRIAGE_MAX_VOICE_SECS") {
        match raw.parse::<f64>() {
            Ok(secs) => settings.voice.max_duration_secs = secs,
            Err(_) => warn!(value = raw, "ignoring unparseable TRIAGE_MAX_VOICE_SECS"),
        }
    }
}
