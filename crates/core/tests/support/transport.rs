//! Scripted mock for the `JsonTransport` port.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use palsync_core::{HttpResult, JsonObject, JsonTransport};
use palsync_domain::{PalSyncError, Result as DomainResult};
use parking_lot::Mutex;
use serde_json::Value;

/// Recorded JSON POST.
#[derive(Debug, Clone)]
pub struct JsonCall {
    pub uri: String,
    pub body: JsonObject,
}

/// Recorded form POST.
#[derive(Debug, Clone)]
pub struct FormCall {
    pub uri: String,
    pub params: Vec<(String, String)>,
}

impl FormCall {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }
}

/// In-memory transport with per-URI scripted responses.
///
/// Responses are queued per URI; the last queued response is repeated once
/// the queue is down to one entry. Unscripted URIs behave like an
/// unreachable server.
#[derive(Default)]
pub struct MockTransport {
    json_responses: Mutex<HashMap<String, VecDeque<Option<JsonObject>>>>,
    form_responses: Mutex<HashMap<String, VecDeque<DomainResult<HttpResult>>>>,
    json_calls: Mutex<Vec<JsonCall>>,
    form_calls: Mutex<Vec<FormCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON response; `None` simulates any transport/decode failure.
    pub fn with_json(self, uri: impl Into<String>, response: Option<Value>) -> Self {
        let response = response.map(|value| match value {
            Value::Object(map) => map,
            other => panic!("scripted JSON response must be an object, got {other}"),
        });
        self.json_responses.lock().entry(uri.into()).or_default().push_back(response);
        self
    }

    pub fn with_form(self, uri: impl Into<String>, status: u16, body: &str) -> Self {
        self.form_responses
            .lock()
            .entry(uri.into())
            .or_default()
            .push_back(Ok(HttpResult::new(status, body)));
        self
    }

    pub fn with_form_error(self, uri: impl Into<String>, error: PalSyncError) -> Self {
        self.form_responses.lock().entry(uri.into()).or_default().push_back(Err(error));
        self
    }

    pub fn json_calls(&self) -> Vec<JsonCall> {
        self.json_calls.lock().clone()
    }

    pub fn json_calls_to(&self, uri: &str) -> Vec<JsonCall> {
        self.json_calls.lock().iter().filter(|call| call.uri == uri).cloned().collect()
    }

    pub fn form_calls(&self) -> Vec<FormCall> {
        self.form_calls.lock().clone()
    }
}

fn next_response<T: Clone>(queue: Option<&mut VecDeque<T>>) -> Option<T> {
    let queue = queue?;
    if queue.len() > 1 {
        queue.pop_front()
    } else {
        queue.front().cloned()
    }
}

#[async_trait]
impl JsonTransport for MockTransport {
    async fn post_json(&self, uri: &str, body: &JsonObject) -> Option<JsonObject> {
        self.json_calls.lock().push(JsonCall { uri: uri.to_string(), body: body.clone() });
        next_response(self.json_responses.lock().get_mut(uri)).flatten()
    }

    async fn post_form(&self, uri: &str, params: &[(String, String)]) -> DomainResult<HttpResult> {
        self.form_calls.lock().push(FormCall { uri: uri.to_string(), params: params.to_vec() });
        next_response(self.form_responses.lock().get_mut(uri))
            .unwrap_or_else(|| Err(PalSyncError::Network("HTTP connection failure".into())))
    }
}
