//! wda-agent: WebDriverAgent lifecycle engine
//!
//! Decides whether an agent already running on a device can be reused for a
//! new session, removes stale installations when it cannot, and exposes the
//! session-level lifecycle through [`AgentHandle`]. Building and installing
//! the agent, and talking to the device, are delegated to the collaborator
//! traits in `wda_core::traits`.

pub mod cache;
pub mod handle;
pub mod probe;
pub mod uninstall;

pub use cache::{decide, CacheDecision, DecisionReason};
pub use handle::AgentHandle;
pub use probe::{FsRevisionOracle, HttpStatusProbe};
pub use uninstall::{reconcile, RemovalFailure, UninstallReport};
