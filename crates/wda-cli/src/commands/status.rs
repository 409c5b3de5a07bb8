//! Status command implementation

use anyhow::{Context, Result};

use crate::output::{format_build, print_error, print_warning};
use wda_agent::HttpStatusProbe;
use wda_core::config::AgentConfig;
use wda_core::traits::StatusProbe;
use wda_core::AgentEndpoint;

/// Probe the agent and print the build metadata it reports
pub async fn status_command(config: &AgentConfig, json: bool) -> Result<()> {
    let endpoint = AgentEndpoint::resolve(config).context("Failed to resolve agent endpoint")?;
    let probe = HttpStatusProbe::new(&endpoint, config.wda_connection_timeout)?;

    let status = match probe.status().await {
        Ok(status) => status,
        Err(e) => {
            print_error(&format!("Failed to query {}: {}", probe.status_url(), e));
            return Err(e.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    match status {
        Some(report) => println!("{}", format_build(&endpoint, &report.build)),
        None => print_warning(&format!("No WebDriverAgent running at {}", endpoint)),
    }
    Ok(())
}
