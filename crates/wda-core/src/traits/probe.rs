//! Probe traits

use async_trait::async_trait;
use std::path::Path;

use crate::error::TransportError;
use crate::types::StatusReport;

/// Queries a running agent for its build metadata
#[async_trait]
pub trait StatusProbe: Send + Sync {
    /// Fetch the current status.
    ///
    /// `Ok(None)` means no agent is reachable. A request that fails outright
    /// is an `Err`, and callers must not treat it as `Ok(None)`.
    async fn status(&self) -> Result<Option<StatusReport>, TransportError>;
}

/// Computes the freshness token of the locally bundled agent sources
#[async_trait]
pub trait RevisionOracle: Send + Sync {
    /// Revision token of the sources under `bootstrap_path`.
    ///
    /// Returns `None` when the sources or their revision marker are missing
    /// or unreadable.
    async fn local_revision(&self, bootstrap_path: &Path) -> Option<String>;
}
