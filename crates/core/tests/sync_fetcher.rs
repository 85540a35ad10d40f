//! Integration tests for friend update and status fetches
//!
//! Covers parameter encoding, status classification and decoding through
//! the scripted `MockTransport`.

mod support;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use palsync_core::{FetchError, FetchErrorCategory, SessionStore, SyncFetcher, UpdateRequest};
use palsync_domain::{Account, AuthToken, PalSyncError, ServiceConfig, SessionId};
use support::transport::MockTransport;

const UPDATES: &str = "/fetch_friend_updates";
const STATUSES: &str = "/fetch_status";

const TWO_USERS: &str = r#"[
    {"u": "bob", "f": "Bob", "i": 2},
    {"u": "carol", "f": "Carol", "d": true, "i": 3}
]"#;

fn fetcher_with(transport: Arc<MockTransport>, service: ServiceConfig) -> (SyncFetcher, Arc<SessionStore>) {
    let session = Arc::new(SessionStore::new());
    let fetcher = SyncFetcher::new(transport, session.clone(), &service, &support::endpoints());
    (fetcher, session)
}

fn fetcher(transport: Arc<MockTransport>) -> SyncFetcher {
    fetcher_with(transport, support::service_config()).0
}

fn account() -> Account {
    Account::new("alice")
}

fn token() -> AuthToken {
    AuthToken::new("tok")
}

#[tokio::test]
async fn updates_without_since_omit_timestamp() {
    let transport = Arc::new(MockTransport::new().with_form(support::uri(UPDATES), 200, "[]"));
    let fetcher = fetcher(transport.clone());

    let users = fetcher.fetch_friend_updates(&account(), &token(), None).await.unwrap();
    assert!(users.is_empty());

    let calls = transport.form_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].param("name"), Some("alice"));
    assert_eq!(calls[0].param("pass"), Some("tok"));
    assert_eq!(calls[0].param("timestamp"), None);
}

#[tokio::test]
async fn updates_with_since_send_utc_timestamp() {
    let transport = Arc::new(MockTransport::new().with_form(support::uri(UPDATES), 200, "[]"));
    let fetcher = fetcher(transport.clone());
    let since = Utc.with_ymd_and_hms(2011, 11, 5, 18, 42, 10).unwrap();

    fetcher.fetch_friend_updates(&account(), &token(), Some(since)).await.unwrap();

    assert_eq!(transport.form_calls()[0].param("timestamp"), Some("2011/11/05 18:42"));
}

#[tokio::test]
async fn two_element_array_yields_two_users_in_order() {
    let transport = Arc::new(MockTransport::new().with_form(support::uri(UPDATES), 200, TWO_USERS));
    let fetcher = fetcher(transport);

    let users = fetcher.fetch_friend_updates(&account(), &token(), None).await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].user_name, "bob");
    assert_eq!(users[1].user_name, "carol");
    assert!(users[1].deleted);
}

#[tokio::test]
async fn prepared_request_matches_convenience_call() {
    let transport = Arc::new(MockTransport::new().with_form(support::uri(UPDATES), 200, TWO_USERS));
    let fetcher = fetcher(transport.clone());
    let request = UpdateRequest::new(account(), token())
        .since(Utc.with_ymd_and_hms(2020, 2, 29, 0, 0, 0).unwrap());

    let users = fetcher.fetch_updates(&request).await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(transport.form_calls()[0].params, request.form_params());
}

#[tokio::test]
async fn unauthorized_is_authentication_failure_for_both_fetches() {
    let transport = Arc::new(
        MockTransport::new()
            .with_form(support::uri(UPDATES), 401, "")
            .with_form(support::uri(STATUSES), 401, ""),
    );
    let fetcher = fetcher(transport);

    let updates = fetcher.fetch_friend_updates(&account(), &token(), None).await;
    let statuses = fetcher.fetch_friend_statuses(&account(), &token()).await;

    assert!(matches!(updates, Err(FetchError::Authentication(_))));
    assert!(matches!(statuses, Err(FetchError::Authentication(_))));
}

#[tokio::test]
async fn other_statuses_are_server_failures() {
    for status in [201, 403, 404, 500, 503] {
        let transport =
            Arc::new(MockTransport::new().with_form(support::uri(STATUSES), status, "[]"));
        let fetcher = fetcher(transport);

        let err = fetcher.fetch_friend_statuses(&account(), &token()).await.unwrap_err();
        assert_eq!(err.category(), FetchErrorCategory::Server, "status {status}");
        assert!(!err.is_authentication());
    }
}

#[tokio::test]
async fn transport_failure_is_server_failure() {
    let transport = Arc::new(MockTransport::new().with_form_error(
        support::uri(UPDATES),
        PalSyncError::Network("HTTP request timed out".into()),
    ));
    let fetcher = fetcher(transport);

    let err = fetcher.fetch_friend_updates(&account(), &token(), None).await.unwrap_err();
    assert_eq!(err, FetchError::Server("HTTP request timed out".into()));
    assert!(err.is_recoverable());
}

#[tokio::test]
async fn non_array_body_is_protocol_failure() {
    let transport = Arc::new(
        MockTransport::new().with_form(support::uri(STATUSES), 200, r#"{"i": 1, "s": "hi"}"#),
    );
    let fetcher = fetcher(transport);

    let err = fetcher.fetch_friend_statuses(&account(), &token()).await.unwrap_err();
    assert_eq!(err.category(), FetchErrorCategory::Protocol);
    assert!(!err.is_recoverable());
}

#[tokio::test]
async fn statuses_decode_in_order() {
    let transport = Arc::new(MockTransport::new().with_form(
        support::uri(STATUSES),
        200,
        r#"[{"i": 3, "s": "busy"}, {"i": 1, "s": "free"}]"#,
    ));
    let fetcher = fetcher(transport.clone());

    let statuses = fetcher.fetch_friend_statuses(&account(), &token()).await.unwrap();

    assert_eq!(statuses.len(), 2);
    assert_eq!((statuses[0].user_id, statuses[0].status.as_str()), (3, "busy"));
    assert_eq!((statuses[1].user_id, statuses[1].status.as_str()), (1, "free"));
    assert_eq!(transport.form_calls()[0].param("timestamp"), None);
}

#[tokio::test]
async fn session_id_is_not_sent_by_default() {
    let transport = Arc::new(MockTransport::new().with_form(support::uri(STATUSES), 200, "[]"));
    let (fetcher, session) = fetcher_with(transport.clone(), support::service_config());
    session.replace(Some(SessionId::new("S1")));

    fetcher.fetch_friend_statuses(&account(), &token()).await.unwrap();

    assert_eq!(transport.form_calls()[0].param("sessid"), None);
}

#[tokio::test]
async fn session_id_attached_when_enabled() {
    let transport = Arc::new(MockTransport::new().with_form(support::uri(STATUSES), 200, "[]"));
    let service = ServiceConfig { attach_session_id: true, ..support::service_config() };
    let (fetcher, session) = fetcher_with(transport.clone(), service);

    // No session yet: nothing to attach
    fetcher.fetch_friend_statuses(&account(), &token()).await.unwrap();
    session.replace(Some(SessionId::new("S1")));
    fetcher.fetch_friend_statuses(&account(), &token()).await.unwrap();

    let calls = transport.form_calls();
    assert_eq!(calls[0].param("sessid"), None);
    assert_eq!(calls[1].param("sessid"), Some("S1"));
}
