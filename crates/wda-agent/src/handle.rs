//! Session-level agent handle
//!
//! One [`AgentHandle`] exists per test session. It resolves paths and the
//! agent endpoint from configuration once, then drives the lifecycle:
//! reuse an agent already running on the device, clean up stale installs,
//! or hand off to the build pipeline to start a fresh one.

use reqwest::Url;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use wda_core::config::AgentConfig;
use wda_core::traits::{BuildPipeline, BundleRegistry, LaunchContext, RevisionOracle, StatusProbe};
use wda_core::types::RUNNER_BUNDLE_NAME;
use wda_core::{AgentEndpoint, LifecycleError, StatusReport, TransportError};

use crate::cache::{decide, CacheDecision};
use crate::probe::{FsRevisionOracle, HttpStatusProbe};
use crate::uninstall::{reconcile, UninstallReport};

/// Interval between status polls while waiting for a started agent
const LAUNCH_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Lifecycle facade for the agent serving one session.
///
/// Mutating operations take `&mut self`, so at most one lifecycle operation
/// runs against a handle at a time.
pub struct AgentHandle {
    config: AgentConfig,
    bootstrap_path: PathBuf,
    agent_path: PathBuf,
    derived_data_path: Option<PathBuf>,
    endpoint: AgentEndpoint,
    /// URL of an agent confirmed usable for this session
    webdriveragent_url: Option<Url>,
    status_probe: Arc<dyn StatusProbe>,
    revision_oracle: Arc<dyn RevisionOracle>,
    registry: Arc<dyn BundleRegistry>,
    pipeline: Option<Arc<dyn BuildPipeline>>,
    started: bool,
}

impl AgentHandle {
    /// Create a handle for `config` on the device behind `registry`.
    ///
    /// Uses the HTTP status probe and the filesystem revision oracle; swap
    /// them with [`with_status_probe`](Self::with_status_probe) and
    /// [`with_revision_oracle`](Self::with_revision_oracle).
    pub fn new(
        config: AgentConfig,
        registry: Arc<dyn BundleRegistry>,
    ) -> Result<Self, LifecycleError> {
        let endpoint = AgentEndpoint::resolve(&config)?;
        let status_probe: Arc<dyn StatusProbe> = Arc::new(HttpStatusProbe::new(
            &endpoint,
            config.wda_connection_timeout,
        )?);

        let bootstrap_path = config.resolved_bootstrap_path();
        let agent_path = config.resolved_agent_path();
        let derived_data_path = config.derived_data_path.clone();

        tracing::debug!(
            "Agent handle for {:?}: bootstrap {:?}, project {:?}, endpoint {}",
            config.udid,
            bootstrap_path,
            agent_path,
            endpoint
        );

        Ok(Self {
            config,
            bootstrap_path,
            agent_path,
            derived_data_path,
            endpoint,
            webdriveragent_url: None,
            status_probe,
            revision_oracle: Arc::new(FsRevisionOracle::default()),
            registry,
            pipeline: None,
            started: false,
        })
    }

    /// Replace the status probe
    pub fn with_status_probe(mut self, probe: Arc<dyn StatusProbe>) -> Self {
        self.status_probe = probe;
        self
    }

    /// Replace the revision oracle
    pub fn with_revision_oracle(mut self, oracle: Arc<dyn RevisionOracle>) -> Self {
        self.revision_oracle = oracle;
        self
    }

    /// Attach the pipeline used to build and start the agent
    pub fn with_build_pipeline(mut self, pipeline: Arc<dyn BuildPipeline>) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    /// Configuration this handle was created from
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Root of the bundled agent sources
    pub fn bootstrap_path(&self) -> &Path {
        &self.bootstrap_path
    }

    /// Xcode project of the agent
    pub fn agent_path(&self) -> &Path {
        &self.agent_path
    }

    /// DerivedData location handed to the build pipeline
    pub fn derived_data_path(&self) -> Option<&Path> {
        self.derived_data_path.as_deref()
    }

    /// Resolved endpoint
    pub fn endpoint(&self) -> &AgentEndpoint {
        &self.endpoint
    }

    /// URL the agent is reachable at
    pub fn url(&self) -> &Url {
        self.endpoint.url()
    }

    /// URL of an agent confirmed usable for this session, if any
    pub fn webdriveragent_url(&self) -> Option<&Url> {
        self.webdriveragent_url.as_ref()
    }

    /// Current status of the agent, `None` if nothing answers
    pub async fn status(&self) -> Result<Option<StatusReport>, TransportError> {
        self.status_probe.status().await
    }

    /// Whether an agent answers at the endpoint
    pub async fn is_running(&self) -> Result<bool, TransportError> {
        Ok(self.status().await?.is_some())
    }

    /// Decide whether the agent already running on the device can be reused.
    ///
    /// A reusable agent's URL is recorded in
    /// [`webdriveragent_url`](Self::webdriveragent_url). A running agent that
    /// cannot be reused is uninstalled, together with any other stale copies.
    /// Failing to remove some copies is logged and does not fail the call.
    pub async fn setup_caching(&mut self) -> Result<CacheDecision, LifecycleError> {
        let status = self.status_probe.status().await?;

        let local_revision = match &status {
            Some(report) if report.build.upgraded_at.is_some() => {
                self.revision_oracle
                    .local_revision(&self.bootstrap_path)
                    .await
            }
            _ => None,
        };

        let decision = decide(
            status.as_ref(),
            local_revision.as_deref(),
            self.config.expected_bundle_id(),
        );
        tracing::info!("Agent cache check: {}", decision.reason);

        // Settled before cleanup so a failed listing cannot leave a stale URL
        self.webdriveragent_url = if decision.reuse {
            tracing::info!("Reusing running agent at {}", self.endpoint);
            Some(self.endpoint.url().clone())
        } else {
            None
        };

        if decision.requires_uninstall() {
            let report = self.uninstall().await?;
            if !report.is_complete() {
                tracing::warn!(
                    "{} stale agent install(s) could not be removed, continuing",
                    report.failed.len()
                );
            }
        }

        Ok(decision)
    }

    /// Remove every installed copy of the agent runner from the device
    pub async fn uninstall(&self) -> Result<UninstallReport, TransportError> {
        reconcile(self.registry.as_ref(), RUNNER_BUNDLE_NAME).await
    }

    /// Make an agent available for `session_id` and return its status.
    ///
    /// With a `webDriverAgentUrl` override the agent is managed elsewhere,
    /// and after [`setup_caching`](Self::setup_caching) confirmed a reusable
    /// agent it is already running. In both cases nothing is built or
    /// installed and the current status is returned as is. Otherwise the
    /// build pipeline starts the agent and the call waits until it answers,
    /// up to `wdaLaunchTimeout`.
    pub async fn launch(&mut self, session_id: &str) -> Result<Option<StatusReport>, LifecycleError> {
        if self.endpoint.is_override() || self.webdriveragent_url.is_some() {
            tracing::info!(
                "Using WebDriverAgent at {} for session {}",
                self.endpoint,
                session_id
            );
            self.webdriveragent_url = Some(self.endpoint.url().clone());
            return Ok(self.status_probe.status().await?);
        }

        let pipeline = self
            .pipeline
            .clone()
            .ok_or(LifecycleError::NoBuildPipeline)?;

        let ctx = self.launch_context(session_id);
        tracing::info!(
            "Starting WebDriverAgent from {:?} for session {}",
            ctx.agent_path,
            session_id
        );
        pipeline.start(&ctx).await?;
        self.started = true;

        let status = self.wait_until_reachable().await?;
        self.webdriveragent_url = Some(self.endpoint.url().clone());
        Ok(Some(status))
    }

    /// Stop an agent this handle started and forget the cached URL
    pub async fn quit(&mut self) -> Result<(), LifecycleError> {
        self.webdriveragent_url = None;

        if !self.started {
            return Ok(());
        }
        self.started = false;

        if let Some(pipeline) = &self.pipeline {
            tracing::info!("Stopping WebDriverAgent at {}", self.endpoint);
            pipeline.stop().await?;
        }
        Ok(())
    }

    fn launch_context(&self, session_id: &str) -> LaunchContext {
        LaunchContext {
            session_id: session_id.to_string(),
            udid: self.config.udid.clone(),
            platform_version: self.config.platform_version.clone(),
            real_device: self.config.real_device,
            bootstrap_path: self.bootstrap_path.clone(),
            agent_path: self.agent_path.clone(),
            derived_data_path: self.derived_data_path.clone(),
            url: self.endpoint.url().clone(),
            use_prebuilt: self.config.use_prebuilt_wda,
        }
    }

    async fn wait_until_reachable(&self) -> Result<StatusReport, LifecycleError> {
        let limit = self.config.wda_launch_timeout;
        let probe = Arc::clone(&self.status_probe);
        let endpoint = &self.endpoint;

        let poll = async move {
            loop {
                match probe.status().await {
                    Ok(Some(status)) => return status,
                    Ok(None) => {}
                    // Expected while the agent is still coming up
                    Err(e) => tracing::debug!("Agent at {} not ready: {}", endpoint, e),
                }
                tokio::time::sleep(LAUNCH_POLL_INTERVAL).await;
            }
        };

        tokio::time::timeout(limit, poll)
            .await
            .map_err(|_| LifecycleError::LaunchTimeout(limit))
    }
}
