pub mod api;
pub mod config;
pub mod errors;
pub mod format;
pub mod models;
pub mod pages;
pub mod routes;
pub mod services;
pub mod transport;

use chrono::TimeDelta;
use std::sync::Arc;

use config::ClientConfig;
use errors::CoreError;
use models::session::SessionState;
use pages::{dashboard::DashboardPage, goals::GoalsPage, investments::InvestmentsPage};
use routes::RouteDecision;
use services::session_service::{SessionGuard, SessionHandle};
use transport::api_client::ApiClient;
use transport::reqwest_backend::ReqwestBackend;
use transport::traits::{HttpBackend, Navigator};

/// Main entry point for the Money Tracker client library.
///
/// Wires one session handle into both the session guard and the transport
/// adapter, so a 401 seen by any page ends the session everywhere. Page
/// controllers are created per page load and never share data.
#[must_use]
pub struct MoneyTracker {
    config: ClientConfig,
    api: ApiClient,
    session: SessionGuard,
}

impl std::fmt::Debug for MoneyTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoneyTracker")
            .field("api_base_url", &self.config.api_base_url)
            .field("session", &self.session.state())
            .finish()
    }
}

impl MoneyTracker {
    /// Build from explicit seams (tests, or a host with its own HTTP stack).
    pub fn new(
        config: ClientConfig,
        backend: Arc<dyn HttpBackend>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, CoreError> {
        config.validate()?;
        let handle = SessionHandle::new();
        let api = ApiClient::new(
            &config,
            Arc::clone(&backend),
            Arc::clone(&navigator),
            handle.clone(),
        );
        let session = SessionGuard::new(&config, backend, navigator, handle);
        Ok(Self {
            config,
            api,
            session,
        })
    }

    /// Build with the reqwest backend.
    pub fn connect(config: ClientConfig, navigator: Arc<dyn Navigator>) -> Result<Self, CoreError> {
        let backend = ReqwestBackend::new(&config)?;
        Self::new(config, Arc::new(backend), navigator)
    }

    /// Build with the reqwest backend and an existing session cookie.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn connect_with_cookie(
        config: ClientConfig,
        navigator: Arc<dyn Navigator>,
        session_cookie: &str,
    ) -> Result<Self, CoreError> {
        let backend = ReqwestBackend::new(&config)?.with_session_cookie(session_cookie)?;
        Self::new(config, Arc::new(backend), navigator)
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub fn session(&self) -> &SessionGuard {
        &self.session
    }

    // ── Session ─────────────────────────────────────────────────────

    /// App start: resolve the session once. Pages should only mount after this.
    pub async fn start(&self) -> SessionState {
        self.session.resolve().await
    }

    pub async fn logout(&self) {
        self.session.logout().await;
    }

    /// What to do when the user navigates to `path`.
    #[must_use]
    pub fn route(&self, path: &str) -> RouteDecision {
        self.session.decide(path)
    }

    // ── Pages ───────────────────────────────────────────────────────

    pub fn dashboard_page(&self) -> DashboardPage {
        DashboardPage::new(self.api.clone(), self.config.monthly_savings_target)
    }

    pub fn investments_page(&self) -> InvestmentsPage {
        InvestmentsPage::new(self.api.clone(), self.form_dismiss_delay())
    }

    pub fn goals_page(&self) -> GoalsPage {
        GoalsPage::new(self.api.clone(), self.form_dismiss_delay())
    }

    /// `GET /health`.
    pub async fn health(&self) -> Result<serde_json::Value, CoreError> {
        self.api.health().await
    }

    fn form_dismiss_delay(&self) -> TimeDelta {
        let ms = i64::try_from(self.config.form_dismiss_ms).unwrap_or(i64::MAX);
        TimeDelta::try_milliseconds(ms).unwrap_or(TimeDelta::MAX)
    }
}
