//! Request/response side of the bridge.

use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, instrument};

use triage_core::Theme;

use crate::error::BridgeError;

enum Mode {
    /// Talking to the real host.
    Hosted { base_url: String },
    /// No host — log and resolve empty.
    Standalone,
}

/// Delivers panel actions to the authoritative backend.
///
/// An action is a name plus a JSON object of parameters; the response
/// is a JSON object, frequently empty. The interesting data usually
/// arrives later on the push channel, which is why nearly every
/// wrapper below is used fire-and-forget.
pub struct BridgeClient {
    http: Client,
    mode: Mode,
}

impl BridgeClient {
    /// Client bound to a host endpoint. Actions post to
    /// `<base_url>/<action>`.
    pub fn hosted(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            mode: Mode::Hosted {
                base_url: base_url.into(),
            },
        }
    }

    /// Detached development client: every invoke logs and resolves to
    /// an empty object without touching the network.
    pub fn standalone() -> Self {
        Self {
            http: Client::new(),
            mode: Mode::Standalone,
        }
    }

    /// Build from settings: the standalone flag wins, otherwise
    /// actions post to `https://<resourceName>/<action>` (the host
    /// routes resource-named requests to the backend).
    pub fn from_settings(settings: &triage_settings::BridgeSettings) -> Self {
        if settings.standalone {
            Self::standalone()
        } else {
            Self::hosted(format!("https://{}", settings.resource_name))
        }
    }

    /// Whether this client is in detached development mode.
    pub fn is_standalone(&self) -> bool {
        matches!(self.mode, Mode::Standalone)
    }

    /// Deliver one action to the backend.
    ///
    /// An empty response body counts as an empty object — the host
    /// acknowledges many actions with no payload at all.
    #[instrument(skip(self, payload), fields(action))]
    pub async fn invoke(&self, action: &str, payload: Value) -> Result<Value, BridgeError> {
        let base_url = match &self.mode {
            Mode::Hosted { base_url } => base_url,
            Mode::Standalone => {
                debug!(action, %payload, "standalone invoke, resolving empty");
                return Ok(json!({}));
            }
        };

        let response = self
            .http
            .post(format!("{base_url}/{action}"))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BridgeError::Status {
                action: action.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(json!({}));
        }
        serde_json::from_str(&body).map_err(|e| BridgeError::MalformedResponse {
            action: action.to_string(),
            detail: e.to_string(),
        })
    }

    // ─────────────────────────────────────────────────────────────────
    // Typed actions — names are the wire contract
    // ─────────────────────────────────────────────────────────────────

    /// Close the panel.
    pub async fn close(&self) -> Result<Value, BridgeError> {
        self.invoke("close", json!({})).await
    }

    /// File a new report.
    pub async fn create_report(
        &self,
        subject: &str,
        category: &str,
        description: Option<&str>,
    ) -> Result<Value, BridgeError> {
        let mut payload = json!({"subject": subject, "category": category});
        if let Some(description) = description {
            payload["description"] = json!(description);
        }
        self.invoke("createReport", payload).await
    }

    /// Delete a report.
    pub async fn delete_report(&self, id: i64) -> Result<Value, BridgeError> {
        self.invoke("deleteReport", json!({"id": id})).await
    }

    /// Claim a report for the invoking staff member.
    pub async fn claim_report(&self, id: i64) -> Result<Value, BridgeError> {
        self.invoke("claimReport", json!({"id": id})).await
    }

    /// Release a claimed report back to open.
    pub async fn unclaim_report(&self, id: i64) -> Result<Value, BridgeError> {
        self.invoke("unclaimReport", json!({"id": id})).await
    }

    /// Mark a report resolved.
    pub async fn resolve_report(&self, id: i64) -> Result<Value, BridgeError> {
        self.invoke("resolveReport", json!({"id": id})).await
    }

    /// Send a chat message into a report thread.
    pub async fn send_message(&self, report_id: i64, message: &str) -> Result<Value, BridgeError> {
        self.invoke("sendMessage", json!({"reportId": report_id, "message": message}))
            .await
    }

    /// Request the full thread for a report (answered via
    /// `SET_MESSAGES`).
    pub async fn get_messages(&self, report_id: i64) -> Result<Value, BridgeError> {
        self.invoke("getMessages", json!({"reportId": report_id}))
            .await
    }

    /// Run a staff action (goto, bring, spectate, …) against the
    /// reporting player.
    pub async fn admin_action(&self, report_id: i64, action: &str) -> Result<Value, BridgeError> {
        self.invoke("adminAction", json!({"reportId": report_id, "action": action}))
            .await
    }

    /// Persist the theme choice.
    pub async fn set_theme(&self, theme: Theme) -> Result<Value, BridgeError> {
        self.invoke("setTheme", json!({"theme": theme})).await
    }

    /// Set a report's priority.
    pub async fn set_priority(&self, report_id: i64, priority: u8) -> Result<Value, BridgeError> {
        self.invoke("setPriority", json!({"reportId": report_id, "priority": priority}))
            .await
    }

    /// Attach a staff note to a report.
    pub async fn add_report_note(&self, report_id: i64, note: &str) -> Result<Value, BridgeError> {
        self.invoke("addReportNote", json!({"reportId": report_id, "note": note}))
            .await
    }

    /// Delete a report note.
    pub async fn delete_report_note(&self, note_id: i64) -> Result<Value, BridgeError> {
        self.invoke("deleteReportNote", json!({"noteId": note_id}))
            .await
    }

    /// Request a report's notes (answered via `SET_REPORT_NOTES`).
    pub async fn get_report_notes(&self, report_id: i64) -> Result<Value, BridgeError> {
        self.invoke("getReportNotes", json!({"reportId": report_id}))
            .await
    }

    /// Attach a staff note to a player.
    pub async fn add_player_note(&self, player_id: &str, note: &str) -> Result<Value, BridgeError> {
        self.invoke("addPlayerNote", json!({"playerId": player_id, "note": note}))
            .await
    }

    /// Delete a player note.
    pub async fn delete_player_note(&self, note_id: i64) -> Result<Value, BridgeError> {
        self.invoke("deletePlayerNote", json!({"noteId": note_id}))
            .await
    }

    /// Request a player's notes (answered via `SET_PLAYER_NOTES`).
    pub async fn get_player_notes(&self, player_id: &str) -> Result<Value, BridgeError> {
        self.invoke("getPlayerNotes", json!({"playerId": player_id}))
            .await
    }

    /// Request a player's history snapshot (answered via
    /// `SET_PLAYER_HISTORY`).
    pub async fn get_player_history(&self, player_id: &str) -> Result<Value, BridgeError> {
        self.invoke("getPlayerHistory", json!({"playerId": player_id}))
            .await
    }

    /// Refresh the player's own list (answered via `SET_REPORTS`).
    pub async fn get_my_reports(&self, include_resolved: bool) -> Result<Value, BridgeError> {
        self.invoke("getMyReports", json!({"includeResolved": include_resolved}))
            .await
    }

    /// Request the statistics snapshot (answered via
    /// `SET_STATISTICS`).
    pub async fn get_statistics(&self) -> Result<Value, BridgeError> {
        self.invoke("getStatistics", json!({})).await
    }

    /// Ask the host to capture the reporting player's screen and
    /// attach it to the thread.
    pub async fn take_screenshot(&self, report_id: i64) -> Result<Value, BridgeError> {
        self.invoke("takeScreenshot", json!({"reportId": report_id}))
            .await
    }

    /// Hand a finished voice recording to the backend for relay. The
    /// hosted clip comes back later as a regular voice `Message`.
    pub async fn send_voice_message(
        &self,
        report_id: i64,
        audio_base64: &str,
        duration: f64,
    ) -> Result<Value, BridgeError> {
        self.invoke(
            "sendVoiceMessage",
            json!({
                "reportId": report_id,
                "audioData": audio_base64,
                "duration": duration,
            }),
        )
        .await
    }
}
