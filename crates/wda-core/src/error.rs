//! Core error types for the WebDriverAgent lifecycle manager

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Top-level error type for lifecycle operations
#[derive(Error, Debug)]
pub enum LifecycleError {
    /// Transport error talking to the agent or the device
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Launch requested without an override URL or a build pipeline
    #[error("No build pipeline configured and no webDriverAgentUrl override set")]
    NoBuildPipeline,

    /// The build pipeline failed
    #[error("Build pipeline failed: {0}")]
    Pipeline(String),

    /// The agent never answered its status endpoint after launch
    #[error("WebDriverAgent did not become reachable within {0:?}")]
    LaunchTimeout(Duration),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A probe or registry call that failed outright.
///
/// Never used for a legitimately absent value; those are `None`.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Request could not be completed (timeout, reset, DNS, ...)
    #[error("Request to {url} failed: {reason}")]
    Request {
        /// Target URL
        url: String,
        /// Underlying failure
        reason: String,
    },

    /// Agent answered with a non-success status code
    #[error("Unexpected HTTP status {status} from {url}")]
    Status {
        /// Target URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Response body could not be decoded
    #[error("Malformed response from {url}: {reason}")]
    Malformed {
        /// Target URL
        url: String,
        /// Decoder message
        reason: String,
    },

    /// Device command failed
    #[error("Device error: {0}")]
    Device(String),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// Refusing to replace an existing config file
    #[error("Config file already exists: {0}")]
    AlreadyExists(PathBuf),

    /// Invalid configuration
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialize error
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
