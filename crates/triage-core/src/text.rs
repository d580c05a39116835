//! Text and time helpers shared by the panel.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a backend timestamp.
///
/// Accepts ISO 8601 (`2026-01-16T14:30:45Z`) and the legacy
/// space-separated form (`2026-01-16 14:30:45`), which is treated as
/// UTC. Unparseable input falls back to "now" so a corrupt row renders
/// as "Just now" instead of breaking the list.
pub fn parse_timestamp(timestamp: &str) -> DateTime<Utc> {
    if timestamp.contains('T') {
        if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
            return dt.with_timezone(&Utc);
        }
    } else if let Ok(naive) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S") {
        return naive.and_utc();
    }
    tracing::debug!(timestamp, "unparseable timestamp, substituting now");
    Utc::now()
}

/// Relative age label: "3d ago", "2h ago", "5m ago", "Just now".
pub fn format_relative_time(timestamp: &str) -> String {
    relative_between(parse_timestamp(timestamp), Utc::now())
}

fn relative_between(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds().max(0);
    let minutes = secs / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{days}d ago")
    } else if hours > 0 {
        format!("{hours}h ago")
    } else if minutes > 0 {
        format!("{minutes}m ago")
    } else {
        "Just now".to_string()
    }
}

/// Format fractional seconds as `m:ss`, truncating (floor) — a clip
/// 59.9 seconds in still reads `0:59`.
pub fn format_clock(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Truncate with a trailing ellipsis. `max_len` includes the dots.
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let cut: String = text.chars().take(keep).collect();
    format!("{cut}...")
}

/// Uppercase the first character.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Localized status label, falling back to the capitalized raw status
/// when the locale table has no entry.
pub fn status_label(status: &str, locale: &HashMap<String, String>) -> String {
    let key = format!("status_{status}");
    locale
        .get(&key)
        .cloned()
        .unwrap_or_else(|| capitalize(status))
}
