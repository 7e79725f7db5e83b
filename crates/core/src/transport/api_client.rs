use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::config::ClientConfig;
use crate::errors::{CoreError, GENERIC_API_FAILURE};
use crate::services::session_service::SessionHandle;
use super::traits::{HttpBackend, Method, Navigator, RawResponse};

/// The transport adapter every resource call goes through.
///
/// Turns a [`RawResponse`] into either the decoded JSON body or one of:
/// - `AuthRequired` on 401, after resetting the session and navigating to
///   the login path,
/// - `Api { status, message }` on any other non-2xx, with the backend's
///   `{error}` message or a generic fallback,
/// - `Network` when the backend could not be reached.
///
/// Cheap to clone: all state is shared behind `Arc`s.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    login_path: String,
    backend: Arc<dyn HttpBackend>,
    navigator: Arc<dyn Navigator>,
    session: SessionHandle,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("login_path", &self.login_path)
            .field("session", &self.session.current())
            .finish()
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

impl ApiClient {
    pub fn new(
        config: &ClientConfig,
        backend: Arc<dyn HttpBackend>,
        navigator: Arc<dyn Navigator>,
        session: SessionHandle,
    ) -> Self {
        Self {
            base_url: config.base_url().to_string(),
            login_path: config.login_path.clone(),
            backend,
            navigator,
            session,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Issue one request and decode the JSON response.
    ///
    /// A body is only sent for POST and PUT; it is dropped for other verbs.
    pub async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<Value>,
    ) -> Result<T, CoreError> {
        let url = format!("{}{endpoint}", self.base_url);
        let body = body.filter(|_| method.has_body());

        let response = match self.backend.execute(method, &url, body.as_ref()).await {
            Ok(response) => response,
            Err(e) => {
                error!("API Error: {method} {endpoint}: {e}");
                return Err(e);
            }
        };

        self.interpret(method, endpoint, response)
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, CoreError> {
        self.call(endpoint, Method::Get, None).await
    }

    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T, CoreError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = encode(body)?;
        self.call(endpoint, Method::Post, Some(body)).await
    }

    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> Result<T, CoreError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = encode(body)?;
        self.call(endpoint, Method::Put, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, CoreError> {
        self.call(endpoint, Method::Delete, None).await
    }

    /// `GET /health`, returned as raw JSON.
    pub async fn health(&self) -> Result<Value, CoreError> {
        self.get("/health").await
    }

    fn interpret<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        response: RawResponse,
    ) -> Result<T, CoreError> {
        if response.status == 401 {
            // The body is deliberately left unread.
            warn!("{method} {endpoint} returned 401, ending session");
            self.session.invalidate();
            self.navigator.navigate(&self.login_path);
            return Err(CoreError::AuthRequired);
        }

        if !response.is_success() {
            let message = error_message(&response.body);
            error!("API Error: {method} {endpoint} -> {}: {message}", response.status);
            return Err(CoreError::Api {
                status: response.status,
                message,
            });
        }

        debug!("{method} {endpoint} -> {}", response.status);
        decode(&response.body)
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value, CoreError> {
    serde_json::to_value(body)
        .map_err(|e| CoreError::Serialization(format!("Failed to encode request body: {e}")))
}

/// Empty 2xx bodies decode as JSON `null`, so `Value` and `Option` targets
/// accept them.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, CoreError> {
    let text = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(text)
        .map_err(|e| CoreError::Deserialization(format!("Unexpected response shape: {e}")))
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| GENERIC_API_FAILURE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_uses_error_field() {
        assert_eq!(error_message(r#"{"error":"Goal not found"}"#), "Goal not found");
    }

    #[test]
    fn error_message_falls_back_on_other_shapes() {
        assert_eq!(error_message("<html>502</html>"), GENERIC_API_FAILURE);
        assert_eq!(error_message(r#"{"message":"nope"}"#), GENERIC_API_FAILURE);
        assert_eq!(error_message(r#"{"error":""}"#), GENERIC_API_FAILURE);
        assert_eq!(error_message(""), GENERIC_API_FAILURE);
    }

    #[test]
    fn empty_body_decodes_as_null() {
        let value: Value = decode("").unwrap();
        assert_eq!(value, Value::Null);
        let missing: Option<Vec<u8>> = decode("  ").unwrap();
        assert!(missing.is_none());
    }
}
