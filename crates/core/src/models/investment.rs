use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::RecordId;
use super::{lenient_datetime, zero_if_null};

/// Investment categories offered by the entry form. The wire field stays a
/// free string, so records created elsewhere with other labels still load.
pub const INVESTMENT_TYPES: [&str; 10] = [
    "Mutual Fund",
    "Stocks",
    "ETF",
    "Fixed Deposit",
    "PPF",
    "Bonds",
    "Real Estate",
    "Gold",
    "Crypto",
    "Other",
];

/// A single investment as returned by `GET /investments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    pub id: RecordId,

    #[serde(default)]
    pub name: String,

    /// Category label, e.g. "Mutual Fund" (`type` on the wire)
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Amount originally put in
    #[serde(default, deserialize_with = "zero_if_null")]
    pub invested: f64,

    /// Latest valuation
    #[serde(default, deserialize_with = "zero_if_null")]
    pub current_value: f64,

    #[serde(default, deserialize_with = "lenient_datetime")]
    pub purchase_date: Option<DateTime<Utc>>,

    /// Goal this investment counts towards, if linked
    #[serde(default)]
    pub goal_id: Option<RecordId>,
}

impl Investment {
    /// Absolute gain: `current_value - invested`.
    #[must_use]
    pub fn gain(&self) -> f64 {
        self.current_value - self.invested
    }

    /// Percentage return on the invested amount. Zero when nothing was invested.
    #[must_use]
    pub fn returns_pct(&self) -> f64 {
        returns_pct(self.invested, self.current_value)
    }

    #[must_use]
    pub fn return_band(&self) -> ReturnBand {
        ReturnBand::from_pct(self.returns_pct())
    }
}

/// `(current - invested) / invested * 100`, or 0 when `invested` is zero.
#[must_use]
pub fn returns_pct(invested: f64, current: f64) -> f64 {
    if invested == 0.0 || !invested.is_finite() {
        return 0.0;
    }
    (current - invested) / invested * 100.0
}

/// Coarse grouping of a return percentage, used to colour table rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnBand {
    /// 10% or more
    High,
    /// Between 0% and 10%
    Medium,
    /// Negative
    Low,
}

impl ReturnBand {
    #[must_use]
    pub fn from_pct(pct: f64) -> Self {
        if pct >= 10.0 {
            ReturnBand::High
        } else if pct >= 0.0 {
            ReturnBand::Medium
        } else {
            ReturnBand::Low
        }
    }
}

/// Body of `POST /investments` and `PUT /investments/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentPayload {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub invested: f64,
    pub current_value: f64,
    pub purchase_date: DateTime<Utc>,
}

/// Body of `POST /investments/{id}/link-goal` and `/unlink-goal`.
/// A `None` goal serialises as `{"goal_id": null}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalLink {
    pub goal_id: Option<RecordId>,
}

/// Response of `GET /investments/by-goal/{goalId}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalInvestments {
    #[serde(default)]
    pub investments: Vec<Investment>,

    /// Sum of the linked investments' current values
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total: f64,

    #[serde(default)]
    pub count: u64,
}
