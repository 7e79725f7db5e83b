use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
#[cfg(not(target_arch = "wasm32"))]
use std::sync::Arc;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::debug;

use crate::config::ClientConfig;
use crate::errors::CoreError;
use super::traits::{HttpBackend, Method, RawResponse};

/// Production [`HttpBackend`] built on reqwest.
///
/// - **Native**: a cookie jar holds the session cookie set by `/login` and
///   replays it on every request, the way a browser does with
///   `credentials: 'include'`.
/// - **WASM**: requests go through `fetch` with credentials included; the
///   browser owns the cookie.
pub struct ReqwestBackend {
    client: Client,
    #[cfg(not(target_arch = "wasm32"))]
    jar: Arc<reqwest::cookie::Jar>,
    #[cfg(not(target_arch = "wasm32"))]
    base_url: String,
}

impl ReqwestBackend {
    pub fn new(config: &ClientConfig) -> Result<Self, CoreError> {
        config.validate()?;
        let builder = Client::builder();

        #[cfg(not(target_arch = "wasm32"))]
        let jar = Arc::new(reqwest::cookie::Jar::default());
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder
            .cookie_provider(Arc::clone(&jar))
            .timeout(Duration::from_secs(config.request_timeout_secs));

        let client = builder
            .build()
            .map_err(|e| CoreError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            #[cfg(not(target_arch = "wasm32"))]
            jar,
            #[cfg(not(target_arch = "wasm32"))]
            base_url: config.base_url().to_string(),
        })
    }

    /// Seed the jar with an existing session cookie (`name=value`), e.g. one
    /// obtained from a browser login.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_session_cookie(self, cookie: &str) -> Result<Self, CoreError> {
        let url: reqwest::Url = self
            .base_url
            .parse()
            .map_err(|e| CoreError::Config(format!("Invalid api_base_url: {e}")))?;
        self.jar.add_cookie_str(cookie, &url);
        Ok(self)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl HttpBackend for ReqwestBackend {
    async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<RawResponse, CoreError> {
        let request = match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Delete => self.client.delete(url),
        }
        .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let request = match body {
            Some(body) => request.json(body),
            None => request,
        };

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        debug!("{method} {url}");
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("{method} {url} -> {status}");

        Ok(RawResponse { status, body })
    }
}
