// ═══════════════════════════════════════════════════════════════════
// Error Tests: CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use money_tracker_core::errors::{CoreError, GENERIC_API_FAILURE};

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn auth_required() {
        assert_eq!(CoreError::AuthRequired.to_string(), "Authentication required");
    }

    #[test]
    fn api_error() {
        let err = CoreError::Api {
            status: 404,
            message: "Goal not found".into(),
        };
        assert_eq!(err.to_string(), "API error (404): Goal not found");
    }

    #[test]
    fn api_error_generic_message() {
        let err = CoreError::Api {
            status: 500,
            message: GENERIC_API_FAILURE.into(),
        };
        assert_eq!(err.to_string(), "API error (500): API request failed");
    }

    #[test]
    fn network() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("bad body".into());
        assert_eq!(err.to_string(), "Serialization error: bad body");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("missing field `id`".into());
        assert_eq!(err.to_string(), "Deserialization error: missing field `id`");
    }

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("Please fill in all required fields".into());
        assert_eq!(
            err.to_string(),
            "Validation failed: Please fill in all required fields"
        );
    }

    #[test]
    fn not_loaded() {
        let err = CoreError::NotLoaded("financial profile");
        assert_eq!(err.to_string(), "Not loaded yet: financial profile");
    }

    #[test]
    fn config() {
        let err = CoreError::Config("api_base_url must not be empty".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: api_base_url must not be empty"
        );
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

mod helpers {
    use super::*;

    #[test]
    fn only_auth_required_is_auth() {
        assert!(CoreError::AuthRequired.is_auth_required());
        assert!(!CoreError::Network("x".into()).is_auth_required());
        assert!(!CoreError::Api {
            status: 403,
            message: "forbidden".into()
        }
        .is_auth_required());
    }

    #[test]
    fn api_message_only_for_api_errors() {
        let err = CoreError::Api {
            status: 422,
            message: "amount must be positive".into(),
        };
        assert_eq!(err.api_message(), Some("amount must be positive"));
        assert_eq!(CoreError::AuthRequired.api_message(), None);
        assert_eq!(CoreError::Network("x".into()).api_message(), None);
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod from_impls {
    use super::*;

    #[test]
    fn from_serde_json_error() {
        let result: Result<Vec<String>, _> = serde_json::from_str("{{invalid json");
        let core_err: CoreError = result.unwrap_err().into();
        match &core_err {
            CoreError::Deserialization(msg) => assert!(!msg.is_empty()),
            other => panic!("Expected Deserialization, got {:?}", other),
        }
    }

    #[test]
    fn from_serde_json_error_eof() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("");
        let core_err: CoreError = result.unwrap_err().into();
        match &core_err {
            CoreError::Deserialization(msg) => assert!(msg.contains("EOF")),
            other => panic!("Expected Deserialization, got {:?}", other),
        }
    }
}

// ── Error is std::error::Error ──────────────────────────────────────

mod std_error {
    use super::*;

    #[test]
    fn core_error_implements_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CoreError::NotLoaded("test"));
        assert!(err.to_string().contains("test"));
    }

    #[test]
    fn core_error_implements_send() {
        fn assert_send<T: Send>() {}
        assert_send::<CoreError>();
    }

    #[test]
    fn core_error_implements_sync() {
        fn assert_sync<T: Sync>() {}
        assert_sync::<CoreError>();
    }
}
