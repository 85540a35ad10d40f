use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use palsync_core::{HttpResult, JsonObject, JsonTransport};
use palsync_domain::constants::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS, MIME_JSON,
};
use palsync_domain::{PalSyncError, Result, ServiceConfig};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, StatusCode};
use tracing::{debug, warn};

use crate::errors::InfraError;

/// JSON/form POST transport over one shared reqwest client.
///
/// The client (and with it the connection pool) is built on first use and
/// reused for every later request made through this transport.
pub struct HttpTransport {
    client: OnceCell<ReqwestClient>,
    connect_timeout: Duration,
    read_timeout: Duration,
    user_agent: Option<String>,
}

impl HttpTransport {
    /// Start building a new transport.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::default()
    }

    /// Transport with the default 30 second timeouts.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Transport configured from the service section of the config.
    pub fn from_config(service: &ServiceConfig) -> Self {
        let builder = Self::builder()
            .connect_timeout(service.connect_timeout())
            .read_timeout(service.read_timeout());

        match &service.user_agent {
            Some(agent) => builder.user_agent(agent.clone()).build(),
            None => builder.build(),
        }
    }

    /// Whether the underlying client has been created yet.
    pub fn is_initialized(&self) -> bool {
        self.client.get().is_some()
    }

    fn client(&self) -> Result<&ReqwestClient> {
        self.client.get_or_try_init(|| {
            debug!(
                connect_timeout_ms = self.connect_timeout.as_millis() as u64,
                read_timeout_ms = self.read_timeout.as_millis() as u64,
                "creating shared HTTP client"
            );

            let mut builder = ReqwestClient::builder()
                .connect_timeout(self.connect_timeout)
                .read_timeout(self.read_timeout)
                .no_proxy();

            if let Some(agent) = &self.user_agent {
                builder = builder.user_agent(agent.clone());
            }

            builder.build().map_err(|err| {
                let infra: InfraError = err.into();
                PalSyncError::from(infra)
            })
        })
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JsonTransport for HttpTransport {
    async fn post_json(&self, uri: &str, body: &JsonObject) -> Option<JsonObject> {
        let client = match self.client() {
            Ok(client) => client,
            Err(err) => {
                warn!(error = %err, "HTTP client unavailable");
                return None;
            }
        };

        let payload = match serde_json::to_string(body) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "unable to encode JSON for HTTP request");
                return None;
            }
        };

        debug!(%uri, "sending JSON POST");

        let response = match client
            .post(uri)
            .header(ACCEPT, MIME_JSON)
            .header(CONTENT_TYPE, MIME_JSON)
            .body(payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                let mapped = PalSyncError::from(InfraError::from(err));
                debug!(%uri, error = %mapped, "JSON POST failed");
                return None;
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            debug!(%uri, %status, "error POSTing");
            return None;
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => {
                debug!(%uri, error = %err, "unable to read response body");
                return None;
            }
        };

        match serde_json::from_str::<JsonObject>(&text) {
            Ok(json) => {
                debug!(%uri, "successful POST");
                Some(json)
            }
            Err(err) => {
                debug!(%uri, body_len = text.len(), error = %err, "could not decode JSON response");
                None
            }
        }
    }

    async fn post_form(&self, uri: &str, params: &[(String, String)]) -> Result<HttpResult> {
        let client = self.client()?;

        debug!(%uri, fields = params.len(), "sending form POST");

        let response = client.post(uri).form(params).send().await.map_err(|err| {
            let infra: InfraError = err.into();
            PalSyncError::from(infra)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|err| {
            let infra: InfraError = err.into();
            PalSyncError::from(infra)
        })?;

        debug!(%uri, %status, body_len = body.len(), "received form POST response");
        Ok(HttpResult::new(status.as_u16(), body))
    }
}

/// Builder for [`HttpTransport`].
#[derive(Debug)]
pub struct HttpTransportBuilder {
    connect_timeout: Duration,
    read_timeout: Duration,
    user_agent: Option<String>,
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            read_timeout: Duration::from_secs(DEFAULT_READ_TIMEOUT_SECS),
            user_agent: None,
        }
    }
}

impl HttpTransportBuilder {
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the transport. The reqwest client itself is created lazily.
    pub fn build(self) -> HttpTransport {
        HttpTransport {
            client: OnceCell::new(),
            connect_timeout: self.connect_timeout,
            read_timeout: self.read_timeout,
            user_agent: self.user_agent,
        }
    }
}
