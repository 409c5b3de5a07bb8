//! Config command implementations and session config loading

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::output::{print_info, print_success};
use wda_core::config::{self, AgentConfig};

/// Per-field overrides applied on top of the config file
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigOverrides {
    /// Scheme and host the agent listens on (e.g. http://localhost)
    #[arg(long, global = true, env = "WDA_BASE_URL")]
    pub wda_base_url: Option<String>,

    /// Local port the agent listens on
    #[arg(long, global = true, env = "WDA_LOCAL_PORT")]
    pub wda_local_port: Option<u16>,

    /// URL of an externally managed agent (disables base URL and port)
    #[arg(long = "webdriveragent-url", global = true, env = "WDA_URL")]
    pub web_driver_agent_url: Option<String>,

    /// Root of the bundled agent sources
    #[arg(long, global = true)]
    pub bootstrap_path: Option<PathBuf>,

    /// Bundle id a reusable agent must carry
    #[arg(long = "updated-bundle-id", global = true)]
    pub updated_wda_bundle_id: Option<String>,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut AgentConfig) {
        if let Some(base) = &self.wda_base_url {
            config.wda_base_url = Some(base.clone());
        }
        if let Some(port) = self.wda_local_port {
            config.wda_local_port = Some(port);
        }
        if let Some(url) = &self.web_driver_agent_url {
            config.web_driver_agent_url = Some(url.clone());
        }
        if let Some(path) = &self.bootstrap_path {
            config.bootstrap_path = Some(path.clone());
        }
        if let Some(id) = &self.updated_wda_bundle_id {
            config.updated_wda_bundle_id = Some(id.clone());
        }
    }
}

/// Load the session config and apply command-line overrides.
///
/// An explicit `--config` file must exist; the default file is optional.
pub fn load_session_config(
    config_path: Option<&PathBuf>,
    overrides: &ConfigOverrides,
) -> Result<AgentConfig> {
    let mut config = match config_path {
        Some(path) => config::load_config(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => {
            let path = config::default_config_path();
            if path.exists() {
                config::load_config(&path)
                    .with_context(|| format!("Failed to load config from {:?}", path))?
            } else {
                tracing::debug!("No config file at {:?}, using defaults", path);
                AgentConfig::default()
            }
        }
    };

    overrides.apply(&mut config);
    Ok(config)
}

/// Show the effective configuration as TOML
pub fn config_show(config: &AgentConfig) -> Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to render config")?;
    if rendered.trim().is_empty() {
        print_info("Using built-in defaults");
    }
    println!("{}", rendered);
    Ok(())
}

/// Write a config file holding the command-line overrides.
///
/// The file at `config_path` (or the default location) is never read, so a
/// broken file can be replaced with `force`.
pub fn config_init(
    config_path: Option<&PathBuf>,
    overrides: &ConfigOverrides,
    force: bool,
) -> Result<PathBuf> {
    let path = config_path
        .cloned()
        .unwrap_or_else(config::default_config_path);

    let mut config = AgentConfig::default();
    overrides.apply(&mut config);

    config::save_config(&path, &config, force)
        .with_context(|| format!("Failed to write config to {:?}", path))?;
    print_success(&format!("Wrote {}", path.display()));
    Ok(path)
}

/// Show where the config file is looked up
pub fn config_path(config_path: Option<&PathBuf>) {
    let path = config_path
        .cloned()
        .unwrap_or_else(config::default_config_path);
    println!("{}", path.display());
}
