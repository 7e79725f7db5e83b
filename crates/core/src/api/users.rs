use serde_json::Value;

use crate::errors::CoreError;
use crate::models::financials::{FinancialsUpdate, UserFinancials};
use crate::models::id::RecordId;
use crate::transport::api_client::ApiClient;

/// Calls on the current user's financial profile.
#[derive(Debug, Clone)]
pub struct UserClient {
    api: ApiClient,
}

impl UserClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /users/financials`
    pub async fn get_financials(&self) -> Result<UserFinancials, CoreError> {
        self.api.get("/users/financials").await
    }

    /// `PUT /users/{id}/financials` with only the fields being changed.
    pub async fn update_financials(
        &self,
        user_id: &RecordId,
        update: &FinancialsUpdate,
    ) -> Result<(), CoreError> {
        let _: Value = self
            .api
            .put(&format!("/users/{user_id}/financials"), update)
            .await?;
        Ok(())
    }
}
