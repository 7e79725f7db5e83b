use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::RecordId;
use super::{lenient_datetime, zero_if_null};

/// A single expense (`GET /expenses`, and `recent_expenses` on the dashboard).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: RecordId,

    #[serde(default)]
    pub description: String,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub amount: f64,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "lenient_datetime")]
    pub date: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /expenses` and `PUT /expenses/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpensePayload {
    pub description: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub date: DateTime<Utc>,
}
