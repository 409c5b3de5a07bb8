//! Agent endpoint resolution

use reqwest::Url;
use std::fmt;

use crate::config::AgentConfig;
use crate::error::ConfigError;

/// Scheme and host the agent listens on when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost";

/// Port the agent listens on when no local port is configured
pub const DEFAULT_AGENT_PORT: u16 = 8100;

/// Where a session's agent can be reached.
///
/// Resolved once from configuration and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentEndpoint {
    url: Url,
    overridden: bool,
}

impl AgentEndpoint {
    /// Resolve the endpoint for `config`.
    ///
    /// A `webDriverAgentUrl` override is taken as-is and the base URL and
    /// local port settings are ignored. Otherwise the scheme and host come
    /// from `wdaBaseUrl` (trailing separators stripped, empty means unset),
    /// the port from `wdaLocalPort`, and the path is `/`.
    pub fn resolve(config: &AgentConfig) -> Result<Self, ConfigError> {
        if let Some(raw) = config
            .web_driver_agent_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            let url = Url::parse(raw).map_err(|e| {
                ConfigError::Invalid(format!("webDriverAgentUrl {:?}: {}", raw, e))
            })?;
            return Ok(Self {
                url,
                overridden: true,
            });
        }

        let base = config
            .wda_base_url
            .as_deref()
            .map(|s| s.trim().trim_end_matches('/'))
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_BASE_URL);
        let port = config.wda_local_port.unwrap_or(DEFAULT_AGENT_PORT);

        let parsed = Url::parse(base)
            .map_err(|e| ConfigError::Invalid(format!("wdaBaseUrl {:?}: {}", base, e)))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| ConfigError::Invalid(format!("wdaBaseUrl {:?} has no host", base)))?;

        let url = Url::parse(&format!("{}://{}:{}/", parsed.scheme(), host, port))
            .map_err(|e| ConfigError::Invalid(format!("agent URL for {:?}: {}", base, e)))?;

        Ok(Self {
            url,
            overridden: false,
        })
    }

    /// Full URL of the agent
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Host component
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    /// Port, including the scheme default when none is explicit
    pub fn port(&self) -> Option<u16> {
        self.url.port_or_known_default()
    }

    /// Path the agent routes are mounted under
    pub fn base_path(&self) -> &str {
        self.url.path()
    }

    /// Whether this endpoint came from a `webDriverAgentUrl` override
    pub fn is_override(&self) -> bool {
        self.overridden
    }

    /// URL of the agent's `/status` route
    pub fn status_url(&self) -> Url {
        let mut url = self.url.clone();
        let path = format!("{}/status", url.path().trim_end_matches('/'));
        url.set_path(&path);
        url.set_query(None);
        url
    }
}

impl fmt::Display for AgentEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}
