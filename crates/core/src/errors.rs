use thiserror::Error;

/// Generic message used when a non-2xx response carries no `{error}` body.
pub const GENERIC_API_FAILURE: &str = "API request failed";

/// Unified error type for the entire money-tracker-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Transport ───────────────────────────────────────────────────
    /// The backend answered 401. Navigation to the login path has already
    /// been triggered; callers must not try to recover.
    #[error("Authentication required")]
    AuthRequired,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Client-side ─────────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Not loaded yet: {0}")]
    NotLoaded(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// True for the 401 case, after which no further processing should happen.
    #[must_use]
    pub fn is_auth_required(&self) -> bool {
        matches!(self, CoreError::AuthRequired)
    }

    /// The message carried by an `Api` error, if any.
    #[must_use]
    pub fn api_message(&self) -> Option<&str> {
        match self {
            CoreError::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Session cookies never appear in URLs, but query strings may carry
        // identifiers; keep log lines free of them.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
