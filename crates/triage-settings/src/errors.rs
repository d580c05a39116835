//! Settings error type.

use thiserror::Error;

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Why settings could not be loaded.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file exists but could not be read.
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    /// The settings file is not valid JSON (or not our shape).
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}
