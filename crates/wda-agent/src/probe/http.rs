//! Status probe over the agent's HTTP `/status` route

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

use wda_core::traits::StatusProbe;
use wda_core::{AgentEndpoint, BuildMetadata, StatusReport, TransportError};

/// Body of a `/status` response
#[derive(Debug, Deserialize)]
struct StatusEnvelope {
    #[serde(default)]
    value: Option<StatusValue>,
}

#[derive(Debug, Deserialize)]
struct StatusValue {
    #[serde(default)]
    build: Option<BuildMetadata>,
}

/// Queries `GET <endpoint>/status` on a running agent.
///
/// A refused connection means nothing is listening and maps to `Ok(None)`,
/// as does a response without build metadata. Timeouts, non-success status
/// codes and undecodable bodies are errors.
pub struct HttpStatusProbe {
    client: reqwest::Client,
    status_url: Url,
}

impl HttpStatusProbe {
    /// Create a probe for `endpoint` with a per-request `timeout`
    pub fn new(endpoint: &AgentEndpoint, timeout: Duration) -> Result<Self, TransportError> {
        let status_url = endpoint.status_url();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|e| TransportError::Request {
                url: status_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self { client, status_url })
    }

    /// URL this probe queries
    pub fn status_url(&self) -> &Url {
        &self.status_url
    }

    fn request_error(&self, err: reqwest::Error) -> TransportError {
        TransportError::Request {
            url: self.status_url.to_string(),
            reason: err.to_string(),
        }
    }
}

#[async_trait]
impl StatusProbe for HttpStatusProbe {
    async fn status(&self) -> Result<Option<StatusReport>, TransportError> {
        let response = match self.client.get(self.status_url.clone()).send().await {
            Ok(response) => response,
            Err(e) if e.is_connect() && !e.is_timeout() => {
                tracing::debug!("WebDriverAgent is not listening at {}", self.status_url);
                return Ok(None);
            }
            Err(e) => return Err(self.request_error(e)),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: self.status_url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.request_error(e))?;
        let envelope: StatusEnvelope =
            serde_json::from_slice(&body).map_err(|e| TransportError::Malformed {
                url: self.status_url.to_string(),
                reason: e.to_string(),
            })?;

        match envelope.value.and_then(|v| v.build) {
            Some(build) => {
                tracing::debug!("WebDriverAgent at {} reports {}", self.status_url, build);
                Ok(Some(StatusReport::new(build)))
            }
            None => {
                tracing::debug!(
                    "WebDriverAgent at {} reports no build metadata",
                    self.status_url
                );
                Ok(None)
            }
        }
    }
}
