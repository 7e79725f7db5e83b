use serde_json::Value;

use crate::errors::CoreError;
use crate::models::id::RecordId;
use crate::models::investment::{GoalInvestments, GoalLink, Investment};
use super::resource::ResourceClient;

/// Relationship calls that only investments have.
impl ResourceClient<Investment> {
    /// Link to `goal_id`, or unlink when `None`.
    pub async fn link_to_goal(
        &self,
        id: &RecordId,
        goal_id: Option<&RecordId>,
    ) -> Result<(), CoreError> {
        let Some(goal_id) = goal_id else {
            return self.unlink_from_goal(id).await;
        };
        let path = format!("{}/link-goal", Self::item_path(id));
        let link = GoalLink {
            goal_id: Some(goal_id.clone()),
        };
        let _: Value = self.api.post(&path, &link).await?;
        Ok(())
    }

    /// Clear the goal link. Accepted for investments that are not linked.
    pub async fn unlink_from_goal(&self, id: &RecordId) -> Result<(), CoreError> {
        let path = format!("{}/unlink-goal", Self::item_path(id));
        let _: Value = self.api.post(&path, &GoalLink { goal_id: None }).await?;
        Ok(())
    }

    /// `GET /investments/by-goal/{goal_id}`
    pub async fn by_goal(&self, goal_id: &RecordId) -> Result<GoalInvestments, CoreError> {
        let summary: Option<GoalInvestments> = self
            .api
            .get(&format!("/investments/by-goal/{goal_id}"))
            .await?;
        Ok(summary.unwrap_or_default())
    }
}
