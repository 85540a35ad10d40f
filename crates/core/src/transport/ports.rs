//! Port interfaces for HTTP transport

use async_trait::async_trait;
use palsync_domain::Result;
use serde_json::{Map, Value};

/// A decoded JSON object.
pub type JsonObject = Map<String, Value>;

pub const STATUS_OK: u16 = 200;
pub const STATUS_UNAUTHORIZED: u16 = 401;

/// Raw response of a form POST, left for the caller to classify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResult {
    pub status: u16,
    pub body: String,
}

impl HttpResult {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Single-request POST transport shared by the handshake and sync fetches.
#[async_trait]
pub trait JsonTransport: Send + Sync {
    /// POST `body` as a JSON document.
    ///
    /// Returns the decoded response object on HTTP 200. Every other outcome
    /// (non-200 status, I/O failure, body that is not a JSON object) is
    /// `None`.
    async fn post_json(&self, uri: &str, body: &JsonObject) -> Option<JsonObject>;

    /// POST `params` as `application/x-www-form-urlencoded`.
    ///
    /// # Errors
    /// Returns [`palsync_domain::PalSyncError::Network`] when no response was
    /// received at all.
    async fn post_form(&self, uri: &str, params: &[(String, String)]) -> Result<HttpResult>;
}
