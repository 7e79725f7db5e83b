use std::collections::HashMap;
use tracing::error;

use crate::errors::CoreError;
use crate::models::dashboard::DashboardSummary;
use crate::models::financials::{FinancialField, FinancialsUpdate, UserFinancials};
use crate::services::analytics_service::AnalyticsService;
use crate::transport::api_client::ApiClient;
use super::form::parse_amount;
use super::prompt::UserPrompt;

pub const LOAD_FAILED: &str = "Failed to load dashboard data. Make sure the backend is running.";
pub const SAVE_FAILED: &str = "Failed to save changes. Please try again.";

/// What the Dashboard should render right now.
#[derive(Debug, PartialEq)]
pub enum DashboardView<'a> {
    Loading,
    Failed(&'a str),
    Ready(&'a DashboardSummary),
}

/// Controller behind the Dashboard.
///
/// Holds the read-only summary and the user's editable monthly figures.
/// A field is in edit mode exactly when it has a pending value.
pub struct DashboardPage {
    api: ApiClient,
    analytics: AnalyticsService,
    savings_target: f64,
    loading: bool,
    error: Option<String>,
    summary: DashboardSummary,
    financials: Option<UserFinancials>,
    pending: HashMap<FinancialField, String>,
}

impl DashboardPage {
    pub fn new(api: ApiClient, savings_target: f64) -> Self {
        Self {
            api,
            analytics: AnalyticsService::new(),
            savings_target,
            loading: true,
            error: None,
            summary: DashboardSummary::default(),
            financials: None,
            pending: HashMap::new(),
        }
    }

    // ── Fetching ────────────────────────────────────────────────────

    /// First render: the summary, then the financial profile.
    pub async fn mount(&mut self) -> Result<(), CoreError> {
        let result = self.refresh().await;
        if matches!(&result, Err(e) if e.is_auth_required()) {
            return result;
        }
        self.load_financials().await;
        result
    }

    /// Re-fetch the summary (also the "Retry" action of the error view).
    pub async fn refresh(&mut self) -> Result<(), CoreError> {
        self.loading = true;
        let outcome = self.api.dashboard_summary().await;
        self.loading = false;

        match outcome {
            Ok(summary) => {
                self.summary = summary;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                error!("Dashboard error: {e}");
                if !e.is_auth_required() {
                    self.error = Some(LOAD_FAILED.to_string());
                }
                Err(e)
            }
        }
    }

    /// The monthly figures are secondary; a failure only logs and leaves
    /// them displayed as zero.
    pub async fn load_financials(&mut self) {
        match self.api.users().get_financials().await {
            Ok(financials) => self.financials = Some(financials),
            Err(e) => error!("Failed to fetch user financials: {e}"),
        }
    }

    #[must_use]
    pub fn view(&self) -> DashboardView<'_> {
        if self.loading {
            DashboardView::Loading
        } else if let Some(error) = &self.error {
            DashboardView::Failed(error)
        } else {
            DashboardView::Ready(&self.summary)
        }
    }

    #[must_use]
    pub fn summary(&self) -> &DashboardSummary {
        &self.summary
    }

    #[must_use]
    pub fn financials(&self) -> Option<&UserFinancials> {
        self.financials.as_ref()
    }

    /// Value currently shown for `field` (0 until the profile loads).
    #[must_use]
    pub fn displayed(&self, field: FinancialField) -> f64 {
        self.financials.as_ref().map_or(0.0, |f| field.get(f))
    }

    /// Monthly savings as a share of the configured savings target.
    #[must_use]
    pub fn savings_goal_pct(&self) -> f64 {
        self.analytics
            .savings_goal_pct(self.displayed(FinancialField::Savings), self.savings_target)
    }

    // ── Field editing ───────────────────────────────────────────────

    #[must_use]
    pub fn is_editing(&self, field: FinancialField) -> bool {
        self.pending.contains_key(&field)
    }

    #[must_use]
    pub fn pending(&self, field: FinancialField) -> Option<&str> {
        self.pending.get(&field).map(String::as_str)
    }

    /// Enter edit mode with the displayed value as the starting text.
    pub fn begin_edit(&mut self, field: FinancialField) {
        let current = self.displayed(field).to_string();
        self.pending.insert(field, current);
    }

    /// Update the text of a field that is in edit mode.
    pub fn set_pending(&mut self, field: FinancialField, value: impl Into<String>) {
        if let Some(pending) = self.pending.get_mut(&field) {
            *pending = value.into();
        }
    }

    /// Leave edit mode without a request; the displayed value never changed.
    pub fn cancel_edit(&mut self, field: FinancialField) {
        self.pending.remove(&field);
    }

    /// Send the pending value for `field`.
    ///
    /// Only a successful response updates the displayed value and leaves
    /// edit mode. On failure the displayed value is untouched, an alert is
    /// shown, and the field stays in edit mode with its pending text so the
    /// user can retry or cancel.
    pub async fn save(
        &mut self,
        field: FinancialField,
        prompt: &dyn UserPrompt,
    ) -> Result<(), CoreError> {
        let Some(pending) = self.pending.get(&field) else {
            return Ok(());
        };
        let value = parse_amount(pending);

        let Some(user_id) = self.financials.as_ref().map(|f| f.id.clone()) else {
            error!("Failed to save: financial profile not loaded");
            prompt.alert(SAVE_FAILED);
            return Err(CoreError::NotLoaded("financial profile"));
        };

        let update = FinancialsUpdate::single(field, value);
        if let Err(e) = self.api.users().update_financials(&user_id, &update).await {
            error!("Failed to save: {e}");
            if !e.is_auth_required() {
                prompt.alert(SAVE_FAILED);
            }
            return Err(e);
        }

        if let Some(financials) = self.financials.as_mut() {
            field.set(financials, value);
        }
        self.pending.remove(&field);
        Ok(())
    }
}
