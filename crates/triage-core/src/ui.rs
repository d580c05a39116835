//! Panel-wide UI state enums.

use serde::{Deserialize, Serialize};

/// Panel color theme. The backend remembers the choice per player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark theme (default).
    #[default]
    Dark,
    /// Light theme.
    Light,
}

/// Which panel tab is active.
///
/// Tab context scopes report selection: a report selected on one tab
/// is not visible as "selected" from another.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActiveTab {
    /// The player's own reports.
    #[default]
    MyReports,
    /// Staff view of every report.
    Admin,
    /// Aggregate statistics.
    Statistics,
}
