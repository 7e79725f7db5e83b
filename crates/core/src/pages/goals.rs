use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use tracing::{debug, error};

use crate::errors::CoreError;
use crate::models::goal::{Goal, GoalPayload, GoalStatus};
use crate::models::id::RecordId;
use crate::models::investment::GoalInvestments;
use crate::services::analytics_service::{AnalyticsService, GoalTotals};
use crate::transport::api_client::ApiClient;
use super::form::{self, parse_amount, parse_form_date, Draft, FormMode, FormState};
use super::list::{ListState, ListView};
use super::prompt::UserPrompt;

pub const LOAD_FAILED: &str = "Failed to load goals. Make sure the backend is running.";
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this goal?";
pub const DELETE_FAILED: &str = "Failed to delete goal";
pub const NO_LINKED_INVESTMENTS: &str = "No investments linked to this goal yet.";

/// Goal form fields as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalDraft {
    pub name: String,
    pub target_amount: String,
    pub current_amount: String,
    /// `YYYY-MM-DD`, or blank for today
    pub deadline: String,
    pub status: GoalStatus,
}

impl Draft for GoalDraft {
    type Record = Goal;
    type Payload = GoalPayload;
    const ENTITY: &'static str = "Goal";

    fn from_record(record: &Goal) -> Self {
        Self {
            name: record.name.clone(),
            target_amount: record.target_amount.to_string(),
            current_amount: record.current_amount.to_string(),
            deadline: form::format_form_date(record.deadline),
            status: record.status,
        }
    }

    fn record_id(record: &Goal) -> RecordId {
        record.id.clone()
    }

    fn to_payload(&self, now: DateTime<Utc>) -> Result<GoalPayload, CoreError> {
        form::require(&[self.name.as_str(), self.target_amount.as_str()])?;
        Ok(GoalPayload {
            name: self.name.clone(),
            target_amount: parse_amount(&self.target_amount),
            current_amount: parse_amount(&self.current_amount),
            deadline: parse_form_date(&self.deadline, now)?,
            status: self.status,
        })
    }
}

/// Controller behind the Goals page.
pub struct GoalsPage {
    api: ApiClient,
    analytics: AnalyticsService,
    dismiss_after: TimeDelta,
    list: ListState<Goal>,
    linked: HashMap<RecordId, GoalInvestments>,
    form: FormState<GoalDraft>,
    viewing: Option<GoalInvestments>,
}

impl GoalsPage {
    pub fn new(api: ApiClient, dismiss_after: TimeDelta) -> Self {
        Self {
            api,
            analytics: AnalyticsService::new(),
            dismiss_after,
            list: ListState::new(),
            linked: HashMap::new(),
            form: FormState::new(),
            viewing: None,
        }
    }

    pub async fn mount(&mut self) -> Result<(), CoreError> {
        self.refresh().await
    }

    /// Re-fetch all goals, then the investments linked to each.
    pub async fn refresh(&mut self) -> Result<(), CoreError> {
        let client = self.api.goals();
        self.list.load(LOAD_FAILED, client.list_all()).await?;
        if self.list.items().is_empty() {
            self.linked.clear();
            return Ok(());
        }
        self.fetch_linked_investments().await
    }

    /// One `by-goal` call per goal, in order. A goal whose call fails shows
    /// as having nothing linked. A 401 ends the pass at once and keeps the
    /// previous linked map, since the session is gone.
    pub async fn fetch_linked_investments(&mut self) -> Result<(), CoreError> {
        let client = self.api.investments();
        let mut linked = HashMap::with_capacity(self.list.items().len());

        for goal in self.list.items() {
            let summary = match client.by_goal(&goal.id).await {
                Ok(summary) => summary,
                Err(e) if e.is_auth_required() => {
                    error!("Session expired while fetching investments for goal {}", goal.id);
                    return Err(e);
                }
                Err(e) => {
                    error!("Error fetching investments for goal {}: {e}", goal.id);
                    GoalInvestments::default()
                }
            };
            linked.insert(goal.id.clone(), summary);
        }

        self.linked = linked;
        Ok(())
    }

    #[must_use]
    pub fn goals(&self) -> &[Goal] {
        self.list.items()
    }

    #[must_use]
    pub fn view(&self) -> ListView<'_, Goal> {
        self.list.view()
    }

    #[must_use]
    pub fn linked_investments(&self, goal_id: &RecordId) -> Option<&GoalInvestments> {
        self.linked.get(goal_id)
    }

    #[must_use]
    pub fn totals(&self) -> GoalTotals {
        self.analytics.goal_totals(self.list.items())
    }

    // ── Create / edit form ──────────────────────────────────────────

    #[must_use]
    pub fn form(&self) -> &FormState<GoalDraft> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState<GoalDraft> {
        &mut self.form
    }

    pub fn edit(&mut self, goal: &Goal) {
        self.form.open_edit(goal);
    }

    /// Validate and save the form, then re-fetch goals.
    pub async fn submit(&mut self, now: DateTime<Utc>) -> Result<(), CoreError> {
        let (mode, payload) = self.form.begin_submit(now)?;
        let client = self.api.goals();

        let outcome = match &mode {
            FormMode::Creating => client.create(&payload).await.map(|_| ()),
            FormMode::Editing(id) => client.update(id, &payload).await,
        };

        if let Err(e) = outcome {
            error!("Goal operation error: {e}");
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

    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        self.form.tick(now)
    }

    // ── Delete ──────────────────────────────────────────────────────

    /// Delete after confirmation. `Ok(false)` means the user declined.
    pub async fn delete(
        &mut self,
        id: &RecordId,
        prompt: &dyn UserPrompt,
    ) -> Result<bool, CoreError> {
        if !prompt.confirm(DELETE_CONFIRMATION) {
            return Ok(false);
        }

        if let Err(e) = self.api.goals().delete(id).await {
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

    // ── Linked investments dialog ───────────────────────────────────

    #[must_use]
    pub fn viewing(&self) -> Option<&GoalInvestments> {
        self.viewing.as_ref()
    }

    /// Open the linked-investments dialog, or alert when there is nothing
    /// to show. Returns whether the dialog opened.
    pub fn view_investments(&mut self, goal_id: &RecordId, prompt: &dyn UserPrompt) -> bool {
        match self.linked.get(goal_id) {
            Some(summary) if !summary.investments.is_empty() => {
                self.viewing = Some(summary.clone());
                true
            }
            _ => {
                prompt.alert(NO_LINKED_INVESTMENTS);
                false
            }
        }
    }

    pub fn close_investments(&mut self) {
        self.viewing = None;
    }
}
