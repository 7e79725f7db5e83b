use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::id::RecordId;
use super::{lenient_datetime, zero_if_null};

/// Lifecycle of a savings goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalStatus {
    #[default]
    Planned,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl GoalStatus {
    pub const ALL: [GoalStatus; 3] = [
        GoalStatus::Planned,
        GoalStatus::InProgress,
        GoalStatus::Completed,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            GoalStatus::Planned => "Planned",
            GoalStatus::InProgress => "In Progress",
            GoalStatus::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for GoalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GoalStatus::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown goal status: {s}"))
    }
}

/// Anything other than a known label (`null`, a number, "Active") reads as
/// the default status instead of failing the whole goal.
fn lenient_status<'de, D>(deserializer: D) -> Result<GoalStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|label| label.parse().ok())
        .unwrap_or_default())
}

/// A savings goal as returned by `GET /goals`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: RecordId,

    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub target_amount: f64,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub current_amount: f64,

    #[serde(default, deserialize_with = "lenient_datetime")]
    pub deadline: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "lenient_status")]
    pub status: GoalStatus,
}

impl Goal {
    /// Progress towards the target, clamped to `0..=100` for display.
    /// A zero target reports 0 rather than NaN or infinity.
    #[must_use]
    pub fn progress_pct(&self) -> f64 {
        progress_pct(self.current_amount, self.target_amount)
    }
}

/// `current / target * 100` clamped to `0..=100`; 0 when `target` is not positive.
#[must_use]
pub fn progress_pct(current: f64, target: f64) -> f64 {
    if target <= 0.0 || !target.is_finite() {
        return 0.0;
    }
    let pct = current / target * 100.0;
    if pct.is_nan() {
        return 0.0;
    }
    pct.clamp(0.0, 100.0)
}

/// Body of `POST /goals` and `PUT /goals/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalPayload {
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: DateTime<Utc>,
    pub status: GoalStatus,
}
