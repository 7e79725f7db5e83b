use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, error};

use crate::errors::CoreError;
use crate::models::goal::Goal;
use crate::models::id::RecordId;
use crate::models::investment::{Investment, InvestmentPayload};
use crate::services::analytics_service::{AnalyticsService, InvestmentTotals};
use crate::transport::api_client::ApiClient;
use super::form::{self, parse_amount, parse_form_date, Draft, FormMode, FormState};
use super::list::{ListState, ListView};
use super::prompt::UserPrompt;

pub const LOAD_FAILED: &str = "Failed to load investments. Make sure the backend is running.";
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this investment?";
pub const DELETE_FAILED: &str = "Failed to delete investment";
pub const LINKED: &str = "Investment linked to goal successfully!";
pub const UNLINKED: &str = "Investment unlinked from goal successfully!";
pub const LINK_FAILED: &str = "Failed to link/unlink investment to goal";
pub const UNKNOWN_GOAL: &str = "Unknown Goal";

/// Investment form fields as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvestmentDraft {
    pub name: String,
    pub kind: String,
    pub invested: String,
    pub current_value: String,
    /// `YYYY-MM-DD`, or blank for today
    pub purchase_date: String,
}

impl Draft for InvestmentDraft {
    type Record = Investment;
    type Payload = InvestmentPayload;
    const ENTITY: &'static str = "Investment";

    fn from_record(record: &Investment) -> Self {
        Self {
            name: record.name.clone(),
            kind: record.kind.clone(),
            invested: record.invested.to_string(),
            current_value: record.current_value.to_string(),
            purchase_date: form::format_form_date(record.purchase_date),
        }
    }

    fn record_id(record: &Investment) -> RecordId {
        record.id.clone()
    }

    fn to_payload(&self, now: DateTime<Utc>) -> Result<InvestmentPayload, CoreError> {
        form::require(&[
            self.name.as_str(),
            self.kind.as_str(),
            self.invested.as_str(),
            self.current_value.as_str(),
        ])?;
        Ok(InvestmentPayload {
            name: self.name.clone(),
            kind: self.kind.clone(),
            invested: parse_amount(&self.invested),
            current_value: parse_amount(&self.current_value),
            purchase_date: parse_form_date(&self.purchase_date, now)?,
        })
    }
}

/// The open "link to goal" dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkSelection {
    pub investment_id: RecordId,
    /// `None` is the "no goal" option
    pub goal_id: Option<RecordId>,
}

/// Controller behind the Investments page.
pub struct InvestmentsPage {
    api: ApiClient,
    analytics: AnalyticsService,
    dismiss_after: TimeDelta,
    list: ListState<Investment>,
    goals: Vec<Goal>,
    form: FormState<InvestmentDraft>,
    link: Option<LinkSelection>,
}

impl InvestmentsPage {
    pub fn new(api: ApiClient, dismiss_after: TimeDelta) -> Self {
        Self {
            api,
            analytics: AnalyticsService::new(),
            dismiss_after,
            list: ListState::new(),
            goals: Vec::new(),
            form: FormState::new(),
            link: None,
        }
    }

    // ── Fetching ────────────────────────────────────────────────────

    /// First render: investments, then the goals used for link names.
    pub async fn mount(&mut self) -> Result<(), CoreError> {
        let result = self.refresh().await;
        if matches!(&result, Err(e) if e.is_auth_required()) {
            return result;
        }
        self.fetch_goals().await;
        result
    }

    /// Re-fetch the whole investment list.
    pub async fn refresh(&mut self) -> Result<(), CoreError> {
        let client = self.api.investments();
        self.list.load(LOAD_FAILED, client.list_all()).await
    }

    /// Goal names are cosmetic here; a failure only logs.
    pub async fn fetch_goals(&mut self) {
        match self.api.goals().list_all().await {
            Ok(goals) => self.goals = goals,
            Err(e) => error!("Goals error: {e}"),
        }
    }

    #[must_use]
    pub fn investments(&self) -> &[Investment] {
        self.list.items()
    }

    #[must_use]
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    #[must_use]
    pub fn view(&self) -> ListView<'_, Investment> {
        self.list.view()
    }

    #[must_use]
    pub fn totals(&self) -> InvestmentTotals {
        self.analytics.investment_totals(self.list.items())
    }

    /// Name of a linked goal, or "Unknown Goal" when it is not in the
    /// locally fetched list.
    #[must_use]
    pub fn goal_name(&self, goal_id: &RecordId) -> &str {
        self.goals
            .iter()
            .find(|g| &g.id == goal_id)
            .map_or(UNKNOWN_GOAL, |g| g.name.as_str())
    }

    // ── Create / edit form ──────────────────────────────────────────

    #[must_use]
    pub fn form(&self) -> &FormState<InvestmentDraft> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState<InvestmentDraft> {
        &mut self.form
    }

    pub fn edit(&mut self, investment: &Investment) {
        self.form.open_edit(investment);
    }

    /// Validate and save the form, then re-fetch the list.
    ///
    /// A validation failure makes no request. A backend failure leaves the
    /// draft in place with an inline error.
    pub async fn submit(&mut self, now: DateTime<Utc>) -> Result<(), CoreError> {
        let (mode, payload) = self.form.begin_submit(now)?;
        let client = self.api.investments();

        let outcome = match &mode {
            FormMode::Creating => client.create(&payload).await.map(|_| ()),
            FormMode::Editing(id) => client.update(id, &payload).await,
        };

        if let Err(e) = outcome {
            error!("Investment operation error: {e}");
            if !e.is_auth_required() {
                self.form.submit_failed(&mode);
            }
            return Err(e);
        }

        self.form.submit_succeeded(&mode, now, self.dismiss_after);
        if let Err(e) = self.refresh().await {
            debug!("Refetch after save failed: {e}");
        }
        Ok(())
    }

    /// Close the form once the success banner has expired.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        self.form.tick(now)
    }

    // ── Delete ──────────────────────────────────────────────────────

    /// Delete after confirmation. Returns `Ok(false)` when the user declined,
    /// in which case nothing is sent.
    pub async fn delete(
        &mut self,
        id: &RecordId,
        prompt: &dyn UserPrompt,
    ) -> Result<bool, CoreError> {
        if !prompt.confirm(DELETE_CONFIRMATION) {
            return Ok(false);
        }

        if let Err(e) = self.api.investments().delete(id).await {
            error!("Delete error: {e}");
            if !e.is_auth_required() {
                prompt.alert(DELETE_FAILED);
            }
            return Err(e);
        }

        if let Err(e) = self.refresh().await {
            debug!("Refetch after delete failed: {e}");
        }
        Ok(true)
    }

    // ── Goal link dialog ────────────────────────────────────────────

    #[must_use]
    pub fn link_selection(&self) -> Option<&LinkSelection> {
        self.link.as_ref()
    }

    /// Open the dialog with the investment's current goal preselected.
    pub fn open_link(&mut self, investment: &Investment) {
        self.link = Some(LinkSelection {
            investment_id: investment.id.clone(),
            goal_id: investment.goal_id.clone(),
        });
    }

    pub fn select_goal(&mut self, goal_id: Option<RecordId>) {
        if let Some(link) = self.link.as_mut() {
            link.goal_id = goal_id;
        }
    }

    pub fn close_link(&mut self) {
        self.link = None;
    }

    /// Apply the selection: link to the chosen goal, or unlink for "none".
    /// On success the dialog closes and the list is re-fetched; on failure
    /// it stays open for another try.
    pub async fn submit_link(&mut self, prompt: &dyn UserPrompt) -> Result<(), CoreError> {
        let Some(selection) = self.link.clone() else {
            return Ok(());
        };
        let client = self.api.investments();

        let (outcome, success_message) = match &selection.goal_id {
            Some(goal_id) => (
                client
                    .link_to_goal(&selection.investment_id, Some(goal_id))
                    .await,
                LINKED,
            ),
            None => (
                client.unlink_from_goal(&selection.investment_id).await,
                UNLINKED,
            ),
        };

        if let Err(e) = outcome {
            error!("Link goal error: {e}");
            if !e.is_auth_required() {
                prompt.alert(LINK_FAILED);
            }
            return Err(e);
        }

        prompt.alert(success_message);
        self.link = None;
        if let Err(e) = self.refresh().await {
            debug!("Refetch after link change failed: {e}");
        }
        Ok(())
    }
}
