use serde::{Deserialize, Serialize};

use super::expense::Expense;
use super::goal::Goal;
use super::id::RecordId;
use super::{skip_invalid, zero_if_null};

/// Server-computed overview returned by `GET /dashboard`. Read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_investments: f64,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_gains: f64,

    #[serde(default, deserialize_with = "skip_invalid")]
    pub investments: Vec<DashboardInvestment>,

    #[serde(default, deserialize_with = "skip_invalid")]
    pub goals: Vec<Goal>,

    #[serde(default, deserialize_with = "skip_invalid")]
    pub recent_expenses: Vec<Expense>,
}

/// Investment row of the dashboard. Unlike [`Investment`](super::investment::Investment),
/// returns and status are computed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardInvestment {
    pub id: RecordId,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub current_value: f64,

    /// Return percentage as reported by the backend
    #[serde(default)]
    pub returns: Option<f64>,

    #[serde(default)]
    pub status: Option<String>,
}

impl DashboardInvestment {
    #[must_use]
    pub fn trend(&self) -> Trend {
        Trend::from_status(self.status.as_deref())
    }
}

/// Backend status label of a dashboard investment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Growing,
    Stable,
    Declining,
    Unknown,
}

impl Trend {
    #[must_use]
    pub fn from_status(status: Option<&str>) -> Self {
        match status {
            Some("Growing") => Trend::Growing,
            Some("Stable") => Trend::Stable,
            Some("Declining") => Trend::Declining,
            _ => Trend::Unknown,
        }
    }
}
