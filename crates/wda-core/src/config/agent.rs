//! Agent configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::absolute;
use super::serde_utils::{duration_secs, lenient_port};
use crate::types::{AGENT_PROJECT_FILE, DEFAULT_RUNNER_BUNDLE_ID};

/// Session configuration consumed when an agent handle is constructed.
///
/// Keys follow the capability names the automation server receives
/// (`webDriverAgentUrl`, `wdaLocalPort`, ...), so a capability JSON object
/// deserializes straight into this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AgentConfig {
    /// Device UDID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udid: Option<String>,

    /// Platform version of the device under test
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_version: Option<String>,

    /// Host of the automation server owning this session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Port of the automation server owning this session
    #[serde(with = "lenient_port", skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Whether the device is physical rather than a simulator
    pub real_device: bool,

    /// Root of the bundled agent sources
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bootstrap_path: Option<PathBuf>,

    /// Xcode project to build (defaults to the project under the bootstrap root)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_path: Option<PathBuf>,

    /// DerivedData location handed to the build step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived_data_path: Option<PathBuf>,

    /// URL of an externally managed agent; disables build and install
    #[serde(rename = "webDriverAgentUrl", skip_serializing_if = "Option::is_none")]
    pub web_driver_agent_url: Option<String>,

    /// Scheme and host the agent listens on (default `http://localhost`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wda_base_url: Option<String>,

    /// Local port the agent listens on (default 8100)
    #[serde(with = "lenient_port", skip_serializing_if = "Option::is_none")]
    pub wda_local_port: Option<u16>,

    /// Bundle identifier the running agent is expected to carry
    #[serde(rename = "updatedWDABundleId", skip_serializing_if = "Option::is_none")]
    pub updated_wda_bundle_id: Option<String>,

    /// Timeout for a single status request
    #[serde(with = "duration_secs")]
    pub wda_connection_timeout: Duration,

    /// How long to wait for a freshly started agent to answer
    #[serde(with = "duration_secs")]
    pub wda_launch_timeout: Duration,

    /// Run a previously built agent instead of building it
    #[serde(rename = "usePrebuiltWDA")]
    pub use_prebuilt_wda: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            udid: None,
            platform_version: None,
            host: None,
            port: None,
            real_device: false,
            bootstrap_path: None,
            agent_path: None,
            derived_data_path: None,
            web_driver_agent_url: None,
            wda_base_url: None,
            wda_local_port: None,
            updated_wda_bundle_id: None,
            wda_connection_timeout: Duration::from_secs(10),
            wda_launch_timeout: Duration::from_secs(60),
            use_prebuilt_wda: false,
        }
    }
}

impl AgentConfig {
    /// Bundle id a reusable agent must report, falling back to the stock runner id
    pub fn expected_bundle_id(&self) -> &str {
        self.updated_wda_bundle_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(DEFAULT_RUNNER_BUNDLE_ID)
    }

    /// Bootstrap root, falling back to the default location.
    ///
    /// Relative paths are resolved against the current directory.
    pub fn resolved_bootstrap_path(&self) -> PathBuf {
        let path = self
            .bootstrap_path
            .clone()
            .unwrap_or_else(super::default_bootstrap_path);
        absolute(path)
    }

    /// Agent project path.
    ///
    /// An explicit `agent_path` wins; otherwise the project file under the
    /// (possibly custom) bootstrap root.
    pub fn resolved_agent_path(&self) -> PathBuf {
        match &self.agent_path {
            Some(path) => absolute(path.clone()),
            None => self.resolved_bootstrap_path().join(AGENT_PROJECT_FILE),
        }
    }
}
