use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::RecordId;
use super::zero_if_null;

/// A budget envelope (`GET /budgets`).
///
/// No page edits budgets yet, so fields beyond the common ones are kept
/// verbatim in `extra` rather than dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: RecordId,

    #[serde(default)]
    pub category: String,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub amount: f64,

    #[serde(default)]
    pub period: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /budgets` and `PUT /budgets/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetPayload {
    pub category: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}
