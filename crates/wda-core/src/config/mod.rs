//! Configuration management for the WebDriverAgent lifecycle manager

mod agent;
pub mod serde_utils;

pub use agent::AgentConfig;

use crate::error::ConfigError;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable overriding the default bootstrap root
pub const BOOTSTRAP_PATH_ENV: &str = "WDA_BOOTSTRAP_PATH";

/// Get the default configuration directory
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wda-lifecycle")
}

/// Get the default configuration file path
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.toml")
}

/// Default root of the bundled WebDriverAgent sources
pub fn default_bootstrap_path() -> PathBuf {
    let path = match std::env::var_os(BOOTSTRAP_PATH_ENV).filter(|p| !p.is_empty()) {
        Some(path) => PathBuf::from(path),
        None => dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wda-lifecycle")
            .join("WebDriverAgent"),
    };
    absolute(path)
}

/// Resolve a relative path against the current directory
pub(crate) fn absolute(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path,
    }
}

/// Load a config file.
///
/// Keys use the capability names, so a file holds e.g. `wdaLocalPort = 9100`.
pub fn load_config(path: &Path) -> Result<AgentConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
        _ => ConfigError::Invalid(format!("cannot read {}: {}", path.display(), e)),
    })?;
    Ok(toml::from_str(&content)?)
}

/// Write `config` to `path`, creating parent directories.
///
/// An existing file is only replaced when `overwrite` is set.
pub fn save_config(path: &Path, config: &AgentConfig, overwrite: bool) -> Result<(), ConfigError> {
    if !overwrite && path.exists() {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }

    let content = toml::to_string_pretty(config)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::Invalid(format!("cannot create {}: {}", parent.display(), e))
        })?;
    }
    std::fs::write(path, content)
        .map_err(|e| ConfigError::Invalid(format!("cannot write {}: {}", path.display(), e)))
}
