//! Two-step session handshake against the JSON server
//!
//! 1. connect: POST `{}` to the connect endpoint, read `sessid`
//! 2. login: POST `{sessid, name, pass}` to the login endpoint
//!
//! Login only runs when connect produced a session id. Any JSON object
//! returned by login counts as success.

use std::sync::Arc;

use palsync_domain::constants::{PARAM_PASSWORD, PARAM_SESSION_ID, PARAM_USERNAME};
use palsync_domain::{Credentials, EndpointConfig, ServiceConfig, SessionId};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::errors::HandshakeError;
use crate::session::SessionStore;
use crate::transport::{JsonObject, JsonTransport};

/// Session handshake over a [`JsonTransport`]
pub struct AuthProtocol {
    transport: Arc<dyn JsonTransport>,
    session: Arc<SessionStore>,
    connect_uri: String,
    login_uri: String,
}

impl AuthProtocol {
    pub fn new(
        transport: Arc<dyn JsonTransport>,
        session: Arc<SessionStore>,
        service: &ServiceConfig,
        endpoints: &EndpointConfig,
    ) -> Self {
        Self {
            transport,
            session,
            connect_uri: service.endpoint_uri(&endpoints.connect),
            login_uri: service.endpoint_uri(&endpoints.login),
        }
    }

    /// Run the full handshake once.
    ///
    /// Returns `true` only if both steps succeeded. Connect and login
    /// failures are not distinguished here; they are logged.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn authenticate(&self, credentials: &Credentials) -> bool {
        match self.handshake(credentials).await {
            Ok(response) => {
                info!(fields = response.len(), "authentication successful");
                true
            }
            Err(err) => {
                warn!(step = err.step(), error = %err, "authentication failed");
                false
            }
        }
    }

    /// Obtain a new session id and store it.
    ///
    /// The session store is overwritten with the outcome, so a failed
    /// connect leaves it unset rather than holding a stale id.
    ///
    /// # Errors
    /// [`HandshakeError::Connect`] when no response object came back or it
    /// has no string `sessid` field.
    pub async fn connect_for_session(&self) -> Result<SessionId, HandshakeError> {
        debug!(uri = %self.connect_uri, "requesting session id");

        let result = match self.transport.post_json(&self.connect_uri, &JsonObject::new()).await {
            Some(response) => extract_session_id(&response),
            None => Err(HandshakeError::Connect("no response object from connect".into())),
        };

        self.session.replace(result.as_ref().ok().cloned());
        debug!(established = result.is_ok(), "session store updated");
        result
    }

    async fn handshake(&self, credentials: &Credentials) -> Result<JsonObject, HandshakeError> {
        let session_id = self.connect_for_session().await?;
        self.login(&session_id, credentials).await
    }

    async fn login(
        &self,
        session_id: &SessionId,
        credentials: &Credentials,
    ) -> Result<JsonObject, HandshakeError> {
        let mut body = JsonObject::new();
        body.insert(PARAM_SESSION_ID.into(), Value::String(session_id.as_str().to_owned()));
        body.insert(PARAM_USERNAME.into(), Value::String(credentials.username.clone()));
        body.insert(PARAM_PASSWORD.into(), Value::String(credentials.password.clone()));

        debug!(uri = %self.login_uri, "logging in");

        self.transport
            .post_json(&self.login_uri, &body)
            .await
            .ok_or_else(|| HandshakeError::Login("no response object from login".into()))
    }
}

fn extract_session_id(response: &JsonObject) -> Result<SessionId, HandshakeError> {
    response
        .get(PARAM_SESSION_ID)
        .and_then(Value::as_str)
        .map(SessionId::new)
        .ok_or_else(|| HandshakeError::Connect("could not find sessid in connect response".into()))
}
