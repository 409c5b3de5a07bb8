//! wda-core: Core abstractions and configuration for the WebDriverAgent
//! lifecycle manager
//!
//! This crate provides the status data model, the collaborator traits the
//! lifecycle engine consumes (status probe, revision oracle, bundle registry,
//! build pipeline), endpoint resolution, and configuration structures.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod traits;
pub mod types;

pub use endpoint::AgentEndpoint;
pub use error::{ConfigError, LifecycleError, TransportError};
pub use types::{BuildMetadata, StatusReport};
