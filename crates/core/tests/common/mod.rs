// Shared mocks for the integration tests: a scripted HTTP backend, a
// navigator that records redirects, and a prompt with a fixed answer.
#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use money_tracker_core::config::ClientConfig;
use money_tracker_core::errors::CoreError;
use money_tracker_core::pages::prompt::UserPrompt;
use money_tracker_core::transport::traits::{HttpBackend, Method, Navigator, RawResponse};
use money_tracker_core::MoneyTracker;

pub const BASE: &str = "http://api.test/api/v1";

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Clone)]
enum Scripted {
    Respond(RawResponse),
    Unreachable,
}

/// Backend that answers from a script keyed by `(method, path)`.
///
/// Several responses queued for the same route are served in order; the
/// last one then repeats. Unscripted routes answer 404.
#[derive(Default)]
pub struct MockBackend {
    script: Mutex<HashMap<(Method, String), VecDeque<Scripted>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: &str) -> &Self {
        self.push(method, path, Scripted::Respond(RawResponse::new(status, body)));
        self
    }

    pub fn respond_json(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        self.respond(method, path, status, &body.to_string())
    }

    pub fn unreachable(&self, method: Method, path: &str) -> &Self {
        self.push(method, path, Scripted::Unreachable);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests_to(method, path).len()
    }

    fn push(&self, method: Method, path: &str, entry: Scripted) {
        self.script
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(entry);
    }

    fn next(&self, method: Method, path: &str) -> Option<Scripted> {
        let mut script = self.script.lock().unwrap();
        let queue = script.get_mut(&(method, path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl HttpBackend for MockBackend {
    async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<RawResponse, CoreError> {
        let path = url.strip_prefix(BASE).unwrap_or(url).to_string();
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            path: path.clone(),
            body: body.cloned(),
        });

        match self.next(method, &path) {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Unreachable) => {
                Err(CoreError::Network("connection refused".into()))
            }
            None => Ok(RawResponse::new(404, r#"{"error":"no such route"}"#)),
        }
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visits.lock().unwrap().push(path.to_string());
    }
}

/// Prompt that answers every confirmation the same way and records what it
/// was asked.
pub struct ScriptedPrompt {
    answer: bool,
    confirms: Mutex<Vec<String>>,
    alerts: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn accepting() -> Self {
        Self::answering(true)
    }

    pub fn declining() -> Self {
        Self::answering(false)
    }

    fn answering(answer: bool) -> Self {
        Self {
            answer,
            confirms: Mutex::new(Vec::new()),
            alerts: Mutex::new(Vec::new()),
        }
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl UserPrompt for ScriptedPrompt {
    fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        self.answer
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

pub fn test_config() -> ClientConfig {
    ClientConfig {
        api_base_url: BASE.to_string(),
        ..ClientConfig::default()
    }
}

pub fn tracker(backend: &Arc<MockBackend>, navigator: &Arc<RecordingNavigator>) -> MoneyTracker {
    MoneyTracker::new(test_config(), backend.clone(), navigator.clone()).unwrap()
}

pub fn signed_in_backend() -> Arc<MockBackend> {
    let backend = MockBackend::new();
    backend.respond(
        Method::Get,
        "/me",
        200,
        r#"{"loggedIn":true,"user":{"email":"asha@example.com","user_id":7}}"#,
    );
    backend
}
