//! URL command implementation

use anyhow::{Context, Result};

use wda_core::config::AgentConfig;
use wda_core::AgentEndpoint;

/// Print the URL the agent is expected to listen on
pub fn url_command(config: &AgentConfig) -> Result<()> {
    let endpoint = AgentEndpoint::resolve(config).context("Failed to resolve agent endpoint")?;
    println!("{}", endpoint);
    Ok(())
}
