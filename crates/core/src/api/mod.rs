pub mod investments;
pub mod resource;
pub mod users;

use crate::models::{
    budget::Budget, dashboard::DashboardSummary, expense::Expense, goal::Goal,
    investment::Investment,
};
use crate::transport::api_client::ApiClient;
use crate::errors::CoreError;
use resource::ResourceClient;
use users::UserClient;

/// Typed entry points, one per backend resource.
impl ApiClient {
    #[must_use]
    pub fn investments(&self) -> ResourceClient<Investment> {
        ResourceClient::new(self.clone())
    }

    #[must_use]
    pub fn goals(&self) -> ResourceClient<Goal> {
        ResourceClient::new(self.clone())
    }

    #[must_use]
    pub fn budgets(&self) -> ResourceClient<Budget> {
        ResourceClient::new(self.clone())
    }

    #[must_use]
    pub fn expenses(&self) -> ResourceClient<Expense> {
        ResourceClient::new(self.clone())
    }

    #[must_use]
    pub fn users(&self) -> UserClient {
        UserClient::new(self.clone())
    }

    /// `GET /dashboard`.
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, CoreError> {
        self.get("/dashboard").await
    }
}
