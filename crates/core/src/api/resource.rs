use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;

use crate::errors::CoreError;
use crate::models::budget::{Budget, BudgetPayload};
use crate::models::expense::{Expense, ExpensePayload};
use crate::models::goal::{Goal, GoalPayload};
use crate::models::id::RecordId;
use crate::models::investment::{Investment, InvestmentPayload};
use crate::transport::api_client::ApiClient;

/// A backend collection exposing the standard CRUD endpoints under `PATH`.
pub trait Resource: DeserializeOwned {
    /// Collection path, e.g. `/goals`.
    const PATH: &'static str;

    /// Body accepted by create and update.
    type Payload: Serialize;
}

impl Resource for Investment {
    const PATH: &'static str = "/investments";
    type Payload = InvestmentPayload;
}

impl Resource for Goal {
    const PATH: &'static str = "/goals";
    type Payload = GoalPayload;
}

impl Resource for Budget {
    const PATH: &'static str = "/budgets";
    type Payload = BudgetPayload;
}

impl Resource for Expense {
    const PATH: &'static str = "/expenses";
    type Payload = ExpensePayload;
}

/// CRUD calls for one resource type.
///
/// Pure pass-through over [`ApiClient`]: no local validation, no retries.
/// A failure seen here may still have been applied by the backend.
#[derive(Debug, Clone)]
pub struct ResourceClient<R> {
    pub(crate) api: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    /// `GET {PATH}`. A `null` body is an empty list.
    pub async fn list_all(&self) -> Result<Vec<R>, CoreError> {
        let items: Option<Vec<R>> = self.api.get(R::PATH).await?;
        Ok(items.unwrap_or_default())
    }

    /// `GET {PATH}/{id}`
    pub async fn get_one(&self, id: &RecordId) -> Result<R, CoreError> {
        self.api.get(&Self::item_path(id)).await
    }

    /// `POST {PATH}`, returning the record the backend created.
    pub async fn create(&self, data: &R::Payload) -> Result<R, CoreError> {
        self.api.post(R::PATH, data).await
    }

    /// `PUT {PATH}/{id}`. The response body is not interpreted.
    pub async fn update(&self, id: &RecordId, data: &R::Payload) -> Result<(), CoreError> {
        let _: Value = self.api.put(&Self::item_path(id), data).await?;
        Ok(())
    }

    /// `DELETE {PATH}/{id}`
    pub async fn delete(&self, id: &RecordId) -> Result<(), CoreError> {
        let _: Value = self.api.delete(&Self::item_path(id)).await?;
        Ok(())
    }

    pub(crate) fn item_path(id: &RecordId) -> String {
        format!("{}/{id}", R::PATH)
    }
}
