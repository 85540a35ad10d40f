//! Shared test helpers for `palsync-core` integration tests.
//!
//! Provides a scripted in-memory transport so handshake and fetch tests can
//! focus on protocol behaviour instead of HTTP plumbing.

#![allow(dead_code)]

pub mod transport;

use palsync_domain::{EndpointConfig, ServiceConfig};

pub const BASE_URL: &str = "https://jsonserver.test";

pub fn service_config() -> ServiceConfig {
    ServiceConfig::new(BASE_URL)
}

pub fn endpoints() -> EndpointConfig {
    EndpointConfig::default()
}

pub fn uri(path: &str) -> String {
    service_config().endpoint_uri(path)
}
