//! Core domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bundle identifier the stock WebDriverAgent runner is installed under
pub const DEFAULT_RUNNER_BUNDLE_ID: &str = "com.facebook.WebDriverAgentRunner";

/// `CFBundleName` shared by every installed runner, whatever its bundle id
pub const RUNNER_BUNDLE_NAME: &str = "WebDriverAgentRunner-Runner";

/// Xcode project file inside the bootstrap root
pub const AGENT_PROJECT_FILE: &str = "WebDriverAgent.xcodeproj";

/// Build metadata reported by a running agent.
///
/// Every field may be missing; a missing field is a signal of its own and
/// is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildMetadata {
    /// Human-readable build time, e.g. `Jun 24 2018 17:08:21`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// Bundle identifier the running agent was built with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_bundle_identifier: Option<String>,

    /// Revision token of the sources the running agent was built from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgraded_at: Option<String>,
}

impl BuildMetadata {
    /// Metadata carrying only a build time
    pub fn with_time(time: impl Into<String>) -> Self {
        Self {
            time: Some(time.into()),
            ..Default::default()
        }
    }

    /// Metadata carrying only a revision token
    pub fn with_upgraded_at(revision: impl Into<String>) -> Self {
        Self {
            upgraded_at: Some(revision.into()),
            ..Default::default()
        }
    }
}

/// Status of a reachable agent.
///
/// An unreachable agent is represented by the absence of a report
/// (`Option<StatusReport>::None`), so a report always carries `build`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Build metadata; possibly empty
    pub build: BuildMetadata,
}

impl StatusReport {
    /// Wrap build metadata in a report
    pub fn new(build: BuildMetadata) -> Self {
        Self { build }
    }
}

impl From<BuildMetadata> for StatusReport {
    fn from(build: BuildMetadata) -> Self {
        Self::new(build)
    }
}

impl fmt::Display for BuildMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "time={} productBundleIdentifier={} upgradedAt={}",
            field(&self.time),
            field(&self.product_bundle_identifier),
            field(&self.upgraded_at)
        )
    }
}
