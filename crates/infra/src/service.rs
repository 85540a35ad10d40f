//! Long-lived service wiring transport, session, handshake and fetches
//!
//! One `NetworkService` owns one transport (and its connection pool) and
//! one session store; every operation goes through those two.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use palsync_core::{AuthProtocol, AuthResultSink, FetchError, JsonTransport, SessionStore, SyncFetcher};
use palsync_domain::{Account, AuthToken, Config, Credentials, Result, User, UserStatus};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::http::HttpTransport;
use crate::tasks::{OriginContext, ResultDispatcher, TaskRunner};

/// Client facade for the JSON server
pub struct NetworkService {
    session: Arc<SessionStore>,
    auth: Arc<AuthProtocol>,
    fetcher: Arc<SyncFetcher>,
    runner: TaskRunner,
    dispatcher: ResultDispatcher,
}

impl NetworkService {
    /// Create a service backed by [`HttpTransport`] on the current runtime.
    ///
    /// # Errors
    /// Returns `PalSyncError::Internal` when called outside a tokio runtime.
    pub fn new(config: &Config) -> Result<Self> {
        let transport = Arc::new(HttpTransport::from_config(&config.service));
        Ok(Self::with_transport(config, transport, TaskRunner::current()?))
    }

    /// Create a service over any transport implementation.
    pub fn with_transport(
        config: &Config,
        transport: Arc<dyn JsonTransport>,
        runner: TaskRunner,
    ) -> Self {
        let session = Arc::new(SessionStore::new());
        let auth = AuthProtocol::new(
            Arc::clone(&transport),
            Arc::clone(&session),
            &config.service,
            &config.endpoints,
        );
        let fetcher =
            SyncFetcher::new(transport, Arc::clone(&session), &config.service, &config.endpoints);

        info!(base_url = %config.service.base_url, "network service created");

        Self {
            session,
            auth: Arc::new(auth),
            fetcher: Arc::new(fetcher),
            runner,
            dispatcher: ResultDispatcher::new(),
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Authenticate in the background and post the outcome to `context`.
    ///
    /// Returns immediately. The outcome reaches `sink` only once the caller
    /// drains the queue behind `context`; with no sink or no context it is
    /// dropped. The handle may be awaited for the same outcome or dropped.
    pub fn attempt_auth(
        &self,
        credentials: Credentials,
        sink: Option<Arc<dyn AuthResultSink>>,
        context: Option<OriginContext>,
    ) -> JoinHandle<bool> {
        let auth = Arc::clone(&self.auth);
        let dispatcher = self.dispatcher;

        self.runner.run_in_background(async move {
            let outcome = AssertUnwindSafe(auth.authenticate(&credentials))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| {
                    error!("authentication task panicked");
                    false
                });

            dispatcher.dispatch(outcome, sink.as_ref(), context.as_ref());
            outcome
        })
    }

    /// Run the handshake on the calling task.
    pub async fn authenticate(&self, credentials: &Credentials) -> bool {
        self.auth.authenticate(credentials).await
    }

    /// See [`SyncFetcher::fetch_friend_updates`].
    ///
    /// # Errors
    /// Authentication, server or protocol failure of the fetch.
    pub async fn fetch_friend_updates(
        &self,
        account: &Account,
        auth_token: &AuthToken,
        since: Option<DateTime<Utc>>,
    ) -> std::result::Result<Vec<User>, FetchError> {
        self.fetcher.fetch_friend_updates(account, auth_token, since).await
    }

    /// See [`SyncFetcher::fetch_friend_statuses`].
    ///
    /// # Errors
    /// Authentication, server or protocol failure of the fetch.
    pub async fn fetch_friend_statuses(
        &self,
        account: &Account,
        auth_token: &AuthToken,
    ) -> std::result::Result<Vec<UserStatus>, FetchError> {
        self.fetcher.fetch_friend_statuses(account, auth_token).await
    }

    /// Fetch friend updates on a background task; failures come back
    /// through the handle.
    pub fn spawn_friend_updates(
        &self,
        account: Account,
        auth_token: AuthToken,
        since: Option<DateTime<Utc>>,
    ) -> JoinHandle<std::result::Result<Vec<User>, FetchError>> {
        let fetcher = Arc::clone(&self.fetcher);
        self.runner.run_in_background(async move {
            fetcher.fetch_friend_updates(&account, &auth_token, since).await
        })
    }

    /// Fetch friend statuses on a background task.
    pub fn spawn_friend_statuses(
        &self,
        account: Account,
        auth_token: AuthToken,
    ) -> JoinHandle<std::result::Result<Vec<UserStatus>, FetchError>> {
        let fetcher = Arc::clone(&self.fetcher);
        self.runner.run_in_background(async move {
            fetcher.fetch_friend_statuses(&account, &auth_token).await
        })
    }
}
