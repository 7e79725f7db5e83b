use crate::models::session::SessionState;

/// Client routes of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Investments,
    Goals,
    About,
    Contact,
    Home,
    NotFound,
}

impl Route {
    pub const DEFAULT_PATH: &'static str = "/dashboard";

    /// Match a path (query and fragment ignored, trailing slash tolerated).
    /// The root path is not a page of its own and yields `None`.
    #[must_use]
    pub fn from_path(path: &str, login_path: &str) -> Option<Route> {
        let path = normalize(path);
        if path == normalize(login_path) {
            return Some(Route::Login);
        }
        let route = match path.as_str() {
            "/" => return None,
            "/dashboard" => Route::Dashboard,
            "/investments" => Route::Investments,
            "/goal" => Route::Goals,
            "/about" => Route::About,
            "/contact" => Route::Contact,
            "/home" => Route::Home,
            _ => Route::NotFound,
        };
        Some(route)
    }

    /// Everything except the login page needs a session.
    #[must_use]
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

/// What the router should do with a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session check still running: show a loading indicator, nothing else.
    Loading,
    Render(Route),
    Redirect(String),
}

/// Gate a path on the session state.
#[must_use]
pub fn decide(path: &str, session: &SessionState, login_path: &str) -> RouteDecision {
    let route = Route::from_path(path, login_path);

    if route == Some(Route::Login) {
        return RouteDecision::Render(Route::Login);
    }

    match session {
        SessionState::Loading => RouteDecision::Loading,
        SessionState::Anonymous => RouteDecision::Redirect(login_path.to_string()),
        SessionState::Authenticated(_) => match route {
            Some(route) => RouteDecision::Render(route),
            None => RouteDecision::Redirect(Route::DEFAULT_PATH.to_string()),
        },
    }
}

fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or("").trim();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
