use serde::{Deserialize, Serialize};
use std::{env, fmt::Display, str::FromStr};
use tracing::{info, warn};

use crate::errors::CoreError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/v1";
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Client-side configuration. Everything here is display or transport
/// policy; the backend remains authoritative for all data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to (no trailing slash needed).
    pub api_base_url: String,

    /// Client route the app navigates to when the session ends.
    pub login_path: String,

    /// Request timeout in seconds. Ignored on wasm, where the browser decides.
    pub request_timeout_secs: u64,

    /// How long a form stays open showing its success banner.
    pub form_dismiss_ms: u64,

    /// Denominator of the Dashboard "savings goal" percentage.
    pub monthly_savings_target: f64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            request_timeout_secs: 30,
            form_dismiss_ms: 2000,
            monthly_savings_target: 35_000.0,
        }
    }
}

impl ClientConfig {
    /// Build a config from `MONEY_TRACKER_*` environment variables, falling
    /// back to defaults for anything missing or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: try_load("MONEY_TRACKER_API_URL", defaults.api_base_url),
            login_path: try_load("MONEY_TRACKER_LOGIN_PATH", defaults.login_path),
            request_timeout_secs: try_load(
                "MONEY_TRACKER_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            ),
            form_dismiss_ms: try_load("MONEY_TRACKER_FORM_DISMISS_MS", defaults.form_dismiss_ms),
            monthly_savings_target: try_load(
                "MONEY_TRACKER_SAVINGS_TARGET",
                defaults.monthly_savings_target,
            ),
        }
    }

    /// Reject values that would make every request fail.
    pub fn validate(&self) -> Result<(), CoreError> {
        let base = self.api_base_url.trim();
        if base.is_empty() {
            return Err(CoreError::Config("api_base_url must not be empty".into()));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(CoreError::Config(format!(
                "api_base_url must start with http:// or https:// (got '{base}')"
            )));
        }
        if !self.login_path.starts_with('/') {
            return Err(CoreError::Config(format!(
                "login_path must be an absolute path (got '{}')",
                self.login_path
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::Config("request_timeout_secs must be positive".into()));
        }
        if !self.monthly_savings_target.is_finite() || self.monthly_savings_target <= 0.0 {
            return Err(CoreError::Config(
                "monthly_savings_target must be a positive number".into(),
            ));
        }
        Ok(())
    }

    /// Base URL without a trailing slash, ready for `format!("{base}{endpoint}")`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim().trim_end_matches('/')
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value '{raw}': {e}, using default: {default}");
            default
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url(), "http://localhost:8080/api/v1");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ClientConfig {
            api_base_url: "https://money.example/api/v1/".into(),
            ..ClientConfig::default()
        };
        assert_eq!(config.base_url(), "https://money.example/api/v1");
    }

    #[test]
    fn rejects_non_http_base() {
        let config = ClientConfig {
            api_base_url: "ftp://nope".into(),
            ..ClientConfig::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = ClientConfig {
            request_timeout_secs: 0,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"api_base_url":"https://x.test/api"}"#).unwrap();
        assert_eq!(config.api_base_url, "https://x.test/api");
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.form_dismiss_ms, 2000);
    }
}
