//! Authenticated form POSTs returning arrays of records
//!
//! Both fetches share one routine: same transport, same status policy,
//! different endpoint and record type.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use palsync_domain::constants::PARAM_SESSION_ID;
use palsync_domain::{
    Account, AuthToken, EndpointConfig, JsonRecord, ServiceConfig, User, UserStatus,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use super::errors::FetchError;
use super::request::{credential_params, UpdateRequest};
use crate::session::SessionStore;
use crate::transport::{JsonTransport, STATUS_OK, STATUS_UNAUTHORIZED};

/// Friend update and status fetches over a [`JsonTransport`]
pub struct SyncFetcher {
    transport: Arc<dyn JsonTransport>,
    session: Arc<SessionStore>,
    friend_updates_uri: String,
    statuses_uri: String,
    attach_session_id: bool,
}

impl SyncFetcher {
    pub fn new(
        transport: Arc<dyn JsonTransport>,
        session: Arc<SessionStore>,
        service: &ServiceConfig,
        endpoints: &EndpointConfig,
    ) -> Self {
        Self {
            transport,
            session,
            friend_updates_uri: service.endpoint_uri(&endpoints.friend_updates),
            statuses_uri: service.endpoint_uri(&endpoints.statuses),
            attach_session_id: service.attach_session_id,
        }
    }

    /// Fetch friends changed since the last sync point.
    ///
    /// # Errors
    /// - [`FetchError::Authentication`] on HTTP 401
    /// - [`FetchError::Server`] on any other non-200 status or I/O failure
    /// - [`FetchError::Protocol`] when the body is not an array of users
    pub async fn fetch_friend_updates(
        &self,
        account: &Account,
        auth_token: &AuthToken,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<User>, FetchError> {
        let mut request = UpdateRequest::new(account.clone(), auth_token.clone());
        request.since = since;
        self.fetch_updates(&request).await
    }

    /// Same as [`Self::fetch_friend_updates`], from a prepared request.
    ///
    /// # Errors
    /// See [`Self::fetch_friend_updates`].
    #[instrument(skip(self, request), fields(account = %request.account.name, since = ?request.since))]
    pub async fn fetch_updates(&self, request: &UpdateRequest) -> Result<Vec<User>, FetchError> {
        let users = self
            .fetch_records(&self.friend_updates_uri, request.form_params(), "friend updates")
            .await?;
        info!(count = users.len(), "fetched friend updates");
        Ok(users)
    }

    /// Fetch status messages of the account's friends.
    ///
    /// # Errors
    /// Same classification as [`Self::fetch_friend_updates`].
    #[instrument(skip(self, account, auth_token), fields(account = %account.name))]
    pub async fn fetch_friend_statuses(
        &self,
        account: &Account,
        auth_token: &AuthToken,
    ) -> Result<Vec<UserStatus>, FetchError> {
        let statuses = self
            .fetch_records(
                &self.statuses_uri,
                credential_params(account, auth_token),
                "friend statuses",
            )
            .await?;
        info!(count = statuses.len(), "fetched friend statuses");
        Ok(statuses)
    }

    async fn fetch_records<R>(
        &self,
        uri: &str,
        mut params: Vec<(String, String)>,
        what: &'static str,
    ) -> Result<Vec<R>, FetchError>
    where
        R: JsonRecord + Send,
    {
        if self.attach_session_id {
            if let Some(session_id) = self.session.current() {
                params.push((PARAM_SESSION_ID.to_string(), session_id.as_str().to_owned()));
            }
        }

        debug!(uri, fields = params.len(), "posting sync request");

        let response = self.transport.post_form(uri, &params).await.map_err(|err| {
            error!(what, error = %err, "transport failure while fetching");
            FetchError::from(err)
        })?;

        match response.status {
            STATUS_OK => {}
            STATUS_UNAUTHORIZED => {
                error!(what, "authentication rejected while fetching");
                return Err(FetchError::Authentication(format!(
                    "{uri} returned status {STATUS_UNAUTHORIZED}"
                )));
            }
            status => {
                error!(what, status, "server error while fetching");
                return Err(FetchError::Server(format!("{uri} returned status {status}")));
            }
        }

        decode_array(&response.body)
            .map_err(|err| FetchError::Protocol(format!("{what} from {uri}: {err}")))
    }
}

/// Decode a JSON array body, preserving element order.
///
/// All-or-nothing: a single bad element fails the whole array.
fn decode_array<R: JsonRecord>(body: &str) -> Result<Vec<R>, String> {
    let items: Vec<Value> =
        serde_json::from_str(body).map_err(|e| format!("expected a JSON array: {e}"))?;

    items.iter().map(|item| R::from_json(item).map_err(|e| e.to_string())).collect()
}
