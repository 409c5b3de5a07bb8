//! Check command implementation

use anyhow::{Context, Result};

use crate::output::{format_decision, print_error};
use wda_agent::{decide, FsRevisionOracle, HttpStatusProbe};
use wda_core::config::AgentConfig;
use wda_core::traits::{RevisionOracle, StatusProbe};
use wda_core::AgentEndpoint;

/// Run the cache validity check without touching the device
pub async fn check_command(config: &AgentConfig) -> Result<()> {
    let endpoint = AgentEndpoint::resolve(config).context("Failed to resolve agent endpoint")?;
    let probe = HttpStatusProbe::new(&endpoint, config.wda_connection_timeout)?;

    let status = match probe.status().await {
        Ok(status) => status,
        Err(e) => {
            print_error(&format!("Failed to query {}: {}", probe.status_url(), e));
            return Err(e.into());
        }
    };

    let bootstrap_path = config.resolved_bootstrap_path();
    let local_revision = FsRevisionOracle::default()
        .local_revision(&bootstrap_path)
        .await;

    let decision = decide(
        status.as_ref(),
        local_revision.as_deref(),
        config.expected_bundle_id(),
    );
    tracing::info!("Cache check for {}: {}", endpoint, decision.reason);

    println!(
        "{}",
        format_decision(
            &endpoint,
            status.as_ref(),
            local_revision.as_deref(),
            config.expected_bundle_id(),
            &decision,
        )
    );
    Ok(())
}
