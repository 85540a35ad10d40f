//! Configuration management

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CONNECT_PATH, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_FRIEND_UPDATES_PATH,
    DEFAULT_LOGIN_PATH, DEFAULT_READ_TIMEOUT_SECS, DEFAULT_STATUS_PATH,
};

/// Library configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    #[serde(default)]
    pub endpoints: EndpointConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the JSON server (e.g. "https://example.org/services/json")
    pub base_url: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    #[serde(default = "default_read_timeout")]
    pub read_timeout_seconds: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Add the current session id as `sessid` to sync fetch requests.
    #[serde(default)]
    pub attach_session_id: bool,
}

/// Endpoint paths, relative to [`ServiceConfig::base_url`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub connect: String,
    pub login: String,
    pub friend_updates: String,
    pub statuses: String,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. "info" or "palsync_infra=debug"
    pub level: String,
    pub json: bool,
}

impl ServiceConfig {
    /// Create a service configuration with default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout_seconds: DEFAULT_CONNECT_TIMEOUT_SECS,
            read_timeout_seconds: DEFAULT_READ_TIMEOUT_SECS,
            user_agent: None,
            attach_session_id: false,
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_seconds)
    }

    /// Join an endpoint path onto the base URL.
    pub fn endpoint_uri(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new("http://localhost")
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            connect: DEFAULT_CONNECT_PATH.to_string(),
            login: DEFAULT_LOGIN_PATH.to_string(),
            friend_updates: DEFAULT_FRIEND_UPDATES_PATH.to_string(),
            statuses: DEFAULT_STATUS_PATH.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}

fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_read_timeout() -> u64 {
    DEFAULT_READ_TIMEOUT_SECS
}
