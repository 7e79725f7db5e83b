use std::sync::{Arc, RwLock};
use tracing::{error, info, warn};

use crate::config::ClientConfig;
use crate::models::session::{MeResponse, SessionState};
use crate::routes::{self, RouteDecision};
use crate::transport::traits::{HttpBackend, Method, Navigator};

/// Shared, process-wide session state.
///
/// One handle is created per app load and cloned into every component that
/// needs it: the guard writes the resolved state, the transport adapter
/// resets it on 401.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    state: Arc<RwLock<SessionState>>,
}

impl SessionHandle {
    /// A fresh handle in the `Loading` state.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current().is_authenticated()
    }

    /// Drop to `Anonymous` (logout, or a 401 anywhere).
    pub fn invalidate(&self) {
        self.set(SessionState::Anonymous);
    }

    pub(crate) fn set(&self, state: SessionState) {
        *self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = state;
    }
}

/// Resolves "am I logged in" against `GET /me` and gates protected routes.
///
/// The check runs once per app load; there is no re-check on navigation.
/// An expired session is noticed the next time any call gets a 401.
pub struct SessionGuard {
    base_url: String,
    login_path: String,
    backend: Arc<dyn HttpBackend>,
    navigator: Arc<dyn Navigator>,
    handle: SessionHandle,
}

impl std::fmt::Debug for SessionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGuard")
            .field("base_url", &self.base_url)
            .field("state", &self.handle.current())
            .finish()
    }
}

impl SessionGuard {
    pub fn new(
        config: &ClientConfig,
        backend: Arc<dyn HttpBackend>,
        navigator: Arc<dyn Navigator>,
        handle: SessionHandle,
    ) -> Self {
        Self {
            base_url: config.base_url().to_string(),
            login_path: config.login_path.clone(),
            backend,
            navigator,
            handle,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.handle.current()
    }

    #[must_use]
    pub fn handle(&self) -> &SessionHandle {
        &self.handle
    }

    /// Resolve the session if it is still `Loading`; otherwise return the
    /// current state without touching the network.
    pub async fn resolve(&self) -> SessionState {
        let current = self.handle.current();
        if !current.is_loading() {
            return current;
        }
        self.check().await
    }

    /// Ask the backend unconditionally. Used after a login completes.
    ///
    /// Never leaves the state at `Loading`: a network failure, a non-2xx
    /// status or an unreadable body all resolve to `Anonymous`. This call
    /// does not navigate.
    pub async fn check(&self) -> SessionState {
        let url = format!("{}/me", self.base_url);

        let state = match self.backend.execute(Method::Get, &url, None).await {
            Ok(response) if response.is_success() => {
                match serde_json::from_str::<MeResponse>(&response.body) {
                    Ok(me) => me.into_state(),
                    Err(e) => {
                        warn!("Auth check returned an unreadable body: {e}");
                        SessionState::Anonymous
                    }
                }
            }
            Ok(response) => {
                info!("Auth check returned {}, treating as anonymous", response.status);
                SessionState::Anonymous
            }
            Err(e) => {
                error!("Auth check failed: {e}");
                SessionState::Anonymous
            }
        };

        self.handle.set(state.clone());
        state
    }

    /// End the session. The backend call is fire-and-forget: whatever it
    /// returns, the client ends up `Anonymous` on the login page.
    pub async fn logout(&self) {
        let url = format!("{}/logout", self.base_url);
        match self.backend.execute(Method::Post, &url, None).await {
            Ok(response) if !response.is_success() => {
                warn!("Logout returned {}", response.status);
            }
            Ok(_) => {}
            Err(e) => error!("Logout failed: {e}"),
        }
        self.handle.invalidate();
        self.navigator.navigate(&self.login_path);
    }

    /// Route decision for `path` under the current session state.
    #[must_use]
    pub fn decide(&self, path: &str) -> RouteDecision {
        routes::decide(path, &self.handle.current(), &self.login_path)
    }
}
