//! Shared helpers for infra integration tests

use palsync_domain::{Config, EndpointConfig, LoggingConfig, ServiceConfig};
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Config pointing every endpoint at `server`.
pub fn config_for(server: &MockServer) -> Config {
    Config {
        service: ServiceConfig {
            connect_timeout_seconds: 2,
            read_timeout_seconds: 2,
            ..ServiceConfig::new(server.uri())
        },
        endpoints: EndpointConfig::default(),
        logging: LoggingConfig::default(),
    }
}

/// Answer POSTs to `route` with a JSON body.
pub async fn mount_json(server: &MockServer, route: &str, status: u16, body: Value) {
    Mock::given(method("POST"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Answer POSTs to `route` with a raw string body.
pub async fn mount_text(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("POST"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}
