//! Cache validity decisions
//!
//! Given what a running agent reports about itself and the revision of the
//! locally bundled sources, decide whether the running agent can serve a new
//! session or has to be thrown away.
//!
//! Rules, first match wins:
//!
//! 1. nothing answered: not reusable, nothing to remove
//! 2. the agent reports `upgradedAt`: compare it with the local revision;
//!    an unknown local revision keeps the agent
//! 3. the agent reports `productBundleIdentifier`: it must equal the
//!    expected bundle id
//! 4. anything else keeps the agent

use std::fmt;

use wda_core::StatusReport;

/// Why a decision came out the way it did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionReason {
    /// No agent answered the status probe
    NotRunning,
    /// The agent reports a revision but the local one is unknown
    RevisionUnknown,
    /// The agent was built from other sources than the bundled ones
    RevisionMismatch {
        /// Revision reported by the agent
        remote: String,
        /// Revision of the bundled sources
        local: String,
    },
    /// The agent was built from the bundled sources
    RevisionMatch,
    /// The agent carries the expected bundle id
    BundleIdMatch,
    /// The agent carries another bundle id
    BundleIdMismatch {
        /// Bundle id reported by the agent
        actual: String,
        /// Bundle id the session expects
        expected: String,
    },
    /// The agent reports neither a revision nor a bundle id
    InsufficientIdentity,
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionReason::NotRunning => write!(f, "no agent is running, nothing to cache"),
            DecisionReason::RevisionUnknown => write!(
                f,
                "local agent revision cannot be determined, assuming the running agent is current"
            ),
            DecisionReason::RevisionMismatch { remote, local } => write!(
                f,
                "running agent revision {} differs from bundled revision {}",
                remote, local
            ),
            DecisionReason::RevisionMatch => {
                write!(f, "running agent revision matches the bundled one")
            }
            DecisionReason::BundleIdMatch => {
                write!(f, "running agent bundle id matches the expected one")
            }
            DecisionReason::BundleIdMismatch { actual, expected } => write!(
                f,
                "running agent bundle id {} differs from expected {}",
                actual, expected
            ),
            DecisionReason::InsufficientIdentity => write!(
                f,
                "running agent reports no revision or bundle id, reusing it"
            ),
        }
    }
}

/// Outcome of a cache validity check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheDecision {
    /// Whether the running agent may serve the session
    pub reuse: bool,
    /// Rule that produced the decision
    pub reason: DecisionReason,
}

impl CacheDecision {
    fn reuse(reason: DecisionReason) -> Self {
        Self {
            reuse: true,
            reason,
        }
    }

    fn invalidate(reason: DecisionReason) -> Self {
        Self {
            reuse: false,
            reason,
        }
    }

    /// A running agent was seen and rejected, so installed copies must go
    pub fn requires_uninstall(&self) -> bool {
        !self.reuse && self.reason != DecisionReason::NotRunning
    }
}

/// Decide whether the agent behind `status` can be reused.
///
/// `local_revision` is the revision of the bundled sources, `None` when it
/// could not be determined. `expected_bundle_id` is the bundle id a reusable
/// agent must report when it reports no revision.
pub fn decide(
    status: Option<&StatusReport>,
    local_revision: Option<&str>,
    expected_bundle_id: &str,
) -> CacheDecision {
    let Some(report) = status else {
        return CacheDecision::invalidate(DecisionReason::NotRunning);
    };
    let build = &report.build;

    if let Some(remote) = build.upgraded_at.as_deref() {
        return match local_revision {
            None => CacheDecision::reuse(DecisionReason::RevisionUnknown),
            Some(local) if local != remote => {
                CacheDecision::invalidate(DecisionReason::RevisionMismatch {
                    remote: remote.to_string(),
                    local: local.to_string(),
                })
            }
            Some(_) => CacheDecision::reuse(DecisionReason::RevisionMatch),
        };
    }

    if let Some(actual) = build.product_bundle_identifier.as_deref() {
        return if actual == expected_bundle_id {
            CacheDecision::reuse(DecisionReason::BundleIdMatch)
        } else {
            CacheDecision::invalidate(DecisionReason::BundleIdMismatch {
                actual: actual.to_string(),
                expected: expected_bundle_id.to_string(),
            })
        };
    }

    CacheDecision::reuse(DecisionReason::InsufficientIdentity)
}
