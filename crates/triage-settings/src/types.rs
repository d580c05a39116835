//! Settings type definitions.
//!
//! camelCase JSON with `#[serde(default)]` everywhere so a partial
//! file deserializes cleanly — missing keys take their default.

use serde::{Deserialize, Serialize};

use triage_core::Theme;

/// Root settings for the panel runtime.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TriageSettings {
    /// Panel UI behavior.
    pub panel: PanelSettings,
    /// Transport bridge wiring.
    pub bridge: BridgeSettings,
    /// Voice message pipeline.
    pub voice: VoiceSettings,
}

impl TriageSettings {
    /// Clamp nonsense values back into range, warning instead of
    /// rejecting.
    pub fn validate(&mut self) {
        if self.panel.notification_duration_ms == 0 {
            tracing::warn!("notificationDurationMs of 0 would never show banners, using 4000");
            self.panel.notification_duration_ms = 4000;
        }
        if !self.voice.max_duration_secs.is_finite() || self.voice.max_duration_secs <= 0.0 {
            tracing::warn!(
                value = self.voice.max_duration_secs,
                "maxDurationSecs out of range, using 60"
            );
            self.voice.max_duration_secs = 60.0;
        }
    }
}

/// Panel UI behavior.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PanelSettings {
    /// Theme before the backend's remembered choice arrives.
    pub default_theme: Theme,
    /// Notification auto-dismiss delay in milliseconds.
    pub notification_duration_ms: u64,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            default_theme: Theme::Dark,
            notification_duration_ms: 4000,
        }
    }
}

/// Transport bridge wiring.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BridgeSettings {
    /// Host resource name — actions post to
    /// `https://<resourceName>/<action>`.
    pub resource_name: String,
    /// Run detached from any host: invokes log and resolve empty.
    pub standalone: bool,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            resource_name: "triage".to_string(),
            standalone: false,
        }
    }
}

/// Voice message pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VoiceSettings {
    /// Whether recording controls are offered at all.
    pub enabled: bool,
    /// Recording ceiling in seconds.
    pub max_duration_secs: f64,
    /// Relay webhook endpoint. Voice messages are disabled without it.
    pub webhook_url: Option<String>,
    /// Webhook display name override.
    pub bot_name: Option<String>,
    /// Webhook avatar URL.
    pub bot_avatar: Option<String>,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_duration_secs: 60.0,
            webhook_url: None,
            bot_name: None,
            bot_avatar: None,
        }
    }
}
