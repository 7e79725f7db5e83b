use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::RecordId;
use super::zero_if_null;

/// The user's monthly figures (`GET /users/financials`). One per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFinancials {
    pub id: RecordId,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub monthly_income: f64,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub monthly_expenses: f64,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub monthly_savings: f64,
}

/// One editable figure on the Dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FinancialField {
    Income,
    Expenses,
    Savings,
}

impl FinancialField {
    pub const ALL: [FinancialField; 3] = [
        FinancialField::Income,
        FinancialField::Expenses,
        FinancialField::Savings,
    ];

    /// JSON key of this field.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            FinancialField::Income => "monthly_income",
            FinancialField::Expenses => "monthly_expenses",
            FinancialField::Savings => "monthly_savings",
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            FinancialField::Income => "Monthly Income",
            FinancialField::Expenses => "Expenses",
            FinancialField::Savings => "Savings",
        }
    }

    #[must_use]
    pub fn get(&self, financials: &UserFinancials) -> f64 {
        match self {
            FinancialField::Income => financials.monthly_income,
            FinancialField::Expenses => financials.monthly_expenses,
            FinancialField::Savings => financials.monthly_savings,
        }
    }

    pub fn set(&self, financials: &mut UserFinancials, value: f64) {
        match self {
            FinancialField::Income => financials.monthly_income = value,
            FinancialField::Expenses => financials.monthly_expenses = value,
            FinancialField::Savings => financials.monthly_savings = value,
        }
    }
}

/// Partial body of `PUT /users/{id}/financials`: only the edited field is sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FinancialsUpdate(Map<String, Value>);

impl FinancialsUpdate {
    #[must_use]
    pub fn single(field: FinancialField, value: f64) -> Self {
        let mut map = Map::new();
        map.insert(field.key().to_string(), Value::from(value));
        Self(map)
    }
}
