//! Webhook relay: turns a captured clip into a durably hosted URL.
//!
//! One multipart POST to the configured webhook with `?wait=true`, so
//! the provider answers synchronously with the created message. On
//! HTTP 200 the first attachment's URL is the result — a CDN link the
//! backend then embeds in a regular voice message. Anything else is a
//! failure with a human-readable reason. No retry: this is a
//! non-critical attachment path and the caller owns any retry policy.

use base64::Engine as _;
use chrono::{DateTime, Utc};
use rand::Rng as _;
use rand::distr::Alphanumeric;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Fallback webhook display name.
const DEFAULT_BOT_NAME: &str = "Report System";

/// One voice clip headed for the webhook.
#[derive(Clone, Debug)]
pub struct VoiceUpload {
    /// Webhook endpoint.
    pub webhook_url: String,
    /// Base64-encoded audio payload.
    pub audio_base64: String,
    /// Report the clip belongs to (embedded in message + filename).
    pub report_id: i64,
    /// Sender display name (embedded in message + filename).
    pub sender_name: String,
    /// Webhook display name override.
    pub bot_name: Option<String>,
    /// Webhook avatar URL.
    pub bot_avatar: Option<String>,
}

/// Why an upload failed. `Display` is the user-facing reason string.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Webhook URL or audio payload missing — rejected before any I/O.
    #[error("Missing webhook URL or audio data")]
    MissingParameters,
    /// The payload did not decode as base64.
    #[error("Invalid base64 audio data: {0}")]
    InvalidBase64(String),
    /// The payload decoded to zero bytes — rejected before any I/O.
    #[error("Empty audio data after decode")]
    EmptyAudio,
    /// The request never completed.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// Non-200 answer. The reason prefers the provider's `message`
    /// field, then the raw body, then `HTTP <status>`.
    #[error("{reason}")]
    Rejected {
        /// Provider-supplied or synthesized reason.
        reason: String,
    },
    /// 200 answer that was not valid JSON.
    #[error("Parse error: {0}")]
    MalformedResponse(String),
    /// 200 answer without an attachment URL.
    #[error("No attachment URL in response")]
    MissingAttachment,
}

/// Upload a clip and return the hosted CDN URL.
#[instrument(skip(upload), fields(report_id = upload.report_id))]
pub async fn upload_voice(upload: &VoiceUpload) -> Result<String, UploadError> {
    if upload.webhook_url.is_empty() || upload.audio_base64.is_empty() {
        return Err(UploadError::MissingParameters);
    }

    let audio = base64::engine::general_purpose::STANDARD
        .decode(&upload.audio_base64)
        .map_err(|e| UploadError::InvalidBase64(e.to_string()))?;
    if audio.is_empty() {
        return Err(UploadError::EmptyAudio);
    }
    debug!(bytes = audio.len(), "decoded voice payload");

    let boundary = make_boundary();
    let filename = voice_filename(upload.report_id, &upload.sender_name, Utc::now());
    let payload_json = payload_json(upload);
    let body = build_multipart(&boundary, &payload_json, &filename, &audio);

    let response = reqwest::Client::new()
        .post(format!("{}?wait=true", upload.webhook_url))
        .header(
            reqwest::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(body)
        .send()
        .await?;

    let status = response.status().as_u16();
    let text = response.text().await?;

    if status != 200 {
        let reason = match serde_json::from_str::<Value>(&text) {
            Ok(json) => json
                .get("message")
                .and_then(Value::as_str)
                .map_or_else(|| json.to_string(), ToString::to_string),
            Err(_) if !text.is_empty() => text,
            Err(_) => format!("HTTP {status}"),
        };
        warn!(status, reason, "webhook rejected voice upload");
        return Err(UploadError::Rejected { reason });
    }

    let json: Value = serde_json::from_str(&text)
        .map_err(|e| UploadError::MalformedResponse(e.to_string()))?;
    json.get("attachments")
        .and_then(Value::as_array)
        .and_then(|attachments| attachments.first())
        .and_then(|attachment| attachment.get("url"))
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or(UploadError::MissingAttachment)
}

/// Upload a clip and report the outcome through the legacy callback
/// contract: `(success, url, error)`, invoked exactly once.
pub async fn upload_voice_with_callback(
    upload: &VoiceUpload,
    callback: impl FnOnce(bool, Option<String>, Option<String>) + Send,
) {
    match upload_voice(upload).await {
        Ok(url) => callback(true, Some(url), None),
        Err(e) => callback(false, None, Some(e.to_string())),
    }
}

/// The `payload_json` multipart part: webhook identity plus the
/// fixed-template message line.
fn payload_json(upload: &VoiceUpload) -> String {
    let mut payload = json!({
        "username": upload.bot_name.as_deref().unwrap_or(DEFAULT_BOT_NAME),
        "content": format!(
            "Voice message in Report #{} from {}",
            upload.report_id, upload.sender_name
        ),
    });
    if let Some(avatar) = &upload.bot_avatar {
        payload["avatar_url"] = json!(avatar);
    }
    payload.to_string()
}

/// Random multipart boundary, unique per request.
fn make_boundary() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect();
    format!("----TriageFormBoundary{suffix}")
}

/// Attachment filename: report id, sender stripped to alphanumerics
/// ("unknown" when absent), and a compact UTC timestamp.
fn voice_filename(report_id: i64, sender_name: &str, now: DateTime<Utc>) -> String {
    let name = if sender_name.is_empty() {
        "unknown"
    } else {
        sender_name
    };
    let safe: String = name.chars().filter(char::is_ascii_alphanumeric).collect();
    let timestamp = now.format("%Y%m%d%H%M%S");
    format!("voice_report{report_id}_{safe}_{timestamp}.webm")
}

/// Assemble the two-part multipart body: a JSON `payload_json` part
/// and the binary `file` part.
fn build_multipart(boundary: &str, payload_json: &str, filename: &str, audio: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(audio.len() + payload_json.len() + 512);
    body.extend_from_slice(
        format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"payload_json\"\r\n\
             Content-Type: application/json\r\n\r\n\
             {payload_json}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: audio/webm\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(audio);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::TimeZone as _;
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn upload_for(server: &MockServer) -> VoiceUpload {
        VoiceUpload {
            webhook_url: format!("{}/webhook", server.uri()),
            // "voice-bytes" in base64
            audio_base64: "dm9pY2UtYnl0ZXM=".into(),
            report_id: 12,
            sender_name: "Avery Smith".into(),
            bot_name: None,
            bot_avatar: None,
        }
    }

    // ── Validation short-circuits ─────────────────────────────────

    #[tokio::test]
    async fn empty_audio_fails_without_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut upload = upload_for(&server);
        upload.audio_base64 = String::new();
        let err = upload_voice(&upload).await.unwrap_err();
        assert_matches!(err, UploadError::MissingParameters);
        assert!(err.to_string().contains("audio data"));
    }

    #[tokio::test]
    async fn empty_webhook_url_fails_without_network() {
        let upload = VoiceUpload {
            webhook_url: String::new(),
            audio_base64: "AAAA".into(),
            report_id: 1,
            sender_name: "x".into(),
            bot_name: None,
            bot_avatar: None,
        };
        assert_matches!(
            upload_voice(&upload).await.unwrap_err(),
            UploadError::MissingParameters
        );
    }

    #[tokio::test]
    async fn undecodable_base64_fails_without_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut upload = upload_for(&server);
        upload.audio_base64 = "!!!not-base64!!!".into();
        assert_matches!(
            upload_voice(&upload).await.unwrap_err(),
            UploadError::InvalidBase64(_)
        );
    }

    #[tokio::test]
    async fn decoded_empty_payload_fails_without_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut upload = upload_for(&server);
        // Valid base64 of zero bytes
        upload.audio_base64 = "====".into();
        let err = upload_voice(&upload).await.unwrap_err();
        // "====" is actually invalid; either path must reject pre-I/O
        assert!(matches!(
            err,
            UploadError::InvalidBase64(_) | UploadError::EmptyAudio
        ));
    }

    // ── Wire shape ────────────────────────────────────────────────

    #[tokio::test]
    async fn posts_multipart_with_wait_and_both_parts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/webhook"))
            .and(query_param("wait", "true"))
            .and(body_string_contains("name=\"payload_json\""))
            .and(body_string_contains(
                "Voice message in Report #12 from Avery Smith",
            ))
            .and(body_string_contains("name=\"file\""))
            .and(body_string_contains("filename=\"voice_report12_AverySmith_"))
            .and(body_string_contains("Content-Type: audio/webm"))
            .and(body_string_contains("voice-bytes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "attachments": [{"url": "https://cdn.example/x.webm"}],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let url = upload_voice(&upload_for(&server)).await.unwrap();
        assert_eq!(url, "https://cdn.example/x.webm");
    }

    #[tokio::test]
    async fn bot_identity_overrides_defaults() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("\"username\":\"Watchdog\""))
            .and(body_string_contains("\"avatar_url\":\"https://img.example/a.png\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "attachments": [{"url": "https://cdn.example/x.webm"}],
            })))
            .mount(&server)
            .await;

        let mut upload = upload_for(&server);
        upload.bot_name = Some("Watchdog".into());
        upload.bot_avatar = Some("https://img.example/a.png".into());
        let _ = upload_voice(&upload).await.unwrap();
    }

    // ── Outcomes ──────────────────────────────────────────────────

    #[tokio::test]
    async fn provider_message_is_preferred_error_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"message": "Invalid Webhook Token"})),
            )
            .mount(&server)
            .await;

        let err = upload_voice(&upload_for(&server)).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid Webhook Token");
    }

    #[tokio::test]
    async fn raw_body_is_fallback_error_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let err = upload_voice(&upload_for(&server)).await.unwrap_err();
        assert_eq!(err.to_string(), "rate limited");
    }

    #[tokio::test]
    async fn bare_status_is_last_resort_error_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = upload_voice(&upload_for(&server)).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 502");
    }

    #[tokio::test]
    async fn success_without_attachment_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "123"})))
            .mount(&server)
            .await;

        let err = upload_voice(&upload_for(&server)).await.unwrap_err();
        assert_matches!(err, UploadError::MissingAttachment);
    }

    #[tokio::test]
    async fn success_with_unparseable_body_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = upload_voice(&upload_for(&server)).await.unwrap_err();
        assert_matches!(err, UploadError::MalformedResponse(_));
    }

    #[tokio::test]
    async fn network_error_surfaces_as_reason() {
        let upload = VoiceUpload {
            // Nothing listens here
            webhook_url: "http://127.0.0.1:1/webhook".into(),
            audio_base64: "dm9pY2U=".into(),
            report_id: 1,
            sender_name: "x".into(),
            bot_name: None,
            bot_avatar: None,
        };
        assert_matches!(
            upload_voice(&upload).await.unwrap_err(),
            UploadError::Transport(_)
        );
    }

    // ── Callback contract ─────────────────────────────────────────

    #[tokio::test]
    async fn callback_reports_success_exactly_once() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "attachments": [{"url": "https://cdn.example/x.webm"}],
            })))
            .mount(&server)
            .await;

        let mut outcome = None;
        upload_voice_with_callback(&upload_for(&server), |success, url, error| {
            outcome = Some((success, url, error));
        })
        .await;

        assert_eq!(
            outcome,
            Some((true, Some("https://cdn.example/x.webm".into()), None))
        );
    }

    #[tokio::test]
    async fn callback_reports_failure_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"message": "Invalid Webhook Token"})),
            )
            .mount(&server)
            .await;

        let mut outcome = None;
        upload_voice_with_callback(&upload_for(&server), |success, url, error| {
            outcome = Some((success, url, error));
        })
        .await;

        assert_eq!(
            outcome,
            Some((false, None, Some("Invalid Webhook Token".into())))
        );
    }

    // ── Helpers ───────────────────────────────────────────────────

    #[test]
    fn filename_strips_and_stamps() {
        let at = Utc.with_ymd_and_hms(2026, 1, 16, 14, 30, 45).unwrap();
        assert_eq!(
            voice_filename(12, "Avery Smith!", at),
            "voice_report12_AverySmith_20260116143045.webm"
        );
        assert_eq!(
            voice_filename(3, "", at),
            "voice_report3_unknown_20260116143045.webm"
        );
    }

    #[test]
    fn boundary_is_unique_per_request() {
        let a = make_boundary();
        let b = make_boundary();
        assert_ne!(a, b);
        assert!(a.starts_with("----TriageFormBoundary"));
    }

    #[test]
    fn multipart_layout_is_exact() {
        let body = build_multipart("----B", "{\"a\":1}", "f.webm", b"xyz");
        let text = String::from_utf8_lossy(&body);
        assert!(text.starts_with("------B\r\n"));
        assert!(text.contains("Content-Disposition: form-data; name=\"payload_json\""));
        assert!(text.contains("{\"a\":1}"));
        assert!(text.contains("Content-Disposition: form-data; name=\"file\"; filename=\"f.webm\""));
        assert!(text.contains("xyz"));
        assert!(text.ends_with("\r\n------B--\r\n"));
    }
}
