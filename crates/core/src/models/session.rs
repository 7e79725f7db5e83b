use serde::{Deserialize, Serialize};

use super::id::RecordId;

/// Who the backend says is logged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
    pub user_id: RecordId,
}

/// Client view of the session.
///
/// Starts as `Loading`, resolves once to `Authenticated` or `Anonymous`,
/// and drops back to `Anonymous` on logout or any 401.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Loading,
    Authenticated(Identity),
    Anonymous,
}

impl SessionState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }
}

/// Response of `GET /me`.
///
/// Identity may come nested under `user` or flattened next to `loggedIn`;
/// both shapes are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeResponse {
    #[serde(rename = "loggedIn", default)]
    pub logged_in: bool,

    #[serde(default)]
    pub user: Option<Identity>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub user_id: Option<RecordId>,
}

impl MeResponse {
    /// Session state this response implies.
    #[must_use]
    pub fn into_state(self) -> SessionState {
        if !self.logged_in {
            return SessionState::Anonymous;
        }
        match (self.user, self.email, self.user_id) {
            (Some(identity), _, _) => SessionState::Authenticated(identity),
            (None, Some(email), Some(user_id)) => {
                SessionState::Authenticated(Identity { email, user_id })
            }
            _ => SessionState::Anonymous,
        }
    }
}
