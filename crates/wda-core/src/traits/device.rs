//! Device-side collaborator traits

use async_trait::async_trait;
use reqwest::Url;
use std::path::PathBuf;

use crate::error::{LifecycleError, TransportError};

/// Installed-application registry of a single device
#[async_trait]
pub trait BundleRegistry: Send + Sync {
    /// Bundle identifiers of user-installed apps whose bundle name is
    /// `bundle_name`, in the order the device reports them
    async fn installed_bundle_ids(&self, bundle_name: &str) -> Result<Vec<String>, TransportError>;

    /// Remove the app installed under `bundle_id`
    async fn remove_app(&self, bundle_id: &str) -> Result<(), TransportError>;
}

/// Everything the build/install collaborator needs to bring an agent up
#[derive(Debug, Clone)]
pub struct LaunchContext {
    /// Session the agent is launched for
    pub session_id: String,
    /// Device UDID
    pub udid: Option<String>,
    /// Platform version of the device
    pub platform_version: Option<String>,
    /// Whether the device is physical
    pub real_device: bool,
    /// Root of the bundled agent sources
    pub bootstrap_path: PathBuf,
    /// Xcode project to build
    pub agent_path: PathBuf,
    /// DerivedData location for the build, if customised
    pub derived_data_path: Option<PathBuf>,
    /// URL the agent is expected to listen on once started
    pub url: Url,
    /// Skip the build step and run a previously built agent
    pub use_prebuilt: bool,
}

/// Builds, installs and starts the agent on the device
#[async_trait]
pub trait BuildPipeline: Send + Sync {
    /// Start the agent described by `ctx`.
    ///
    /// Returns once the start has been issued; readiness is checked by the
    /// caller through the status probe.
    async fn start(&self, ctx: &LaunchContext) -> Result<(), LifecycleError>;

    /// Stop an agent previously started by this pipeline
    async fn stop(&self) -> Result<(), LifecycleError>;
}
