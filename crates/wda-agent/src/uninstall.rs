//! Stale agent removal
//!
//! Every build of the agent installs a runner app whose bundle name is the
//! same regardless of the bundle id it was signed with, so earlier sessions
//! may have left several copies behind. Reconciliation lists all of them and
//! removes each one. A removal that fails is recorded and the remaining ones
//! are still attempted, so one stuck install cannot block later cleanups.

use wda_core::traits::BundleRegistry;
use wda_core::TransportError;

/// A bundle that could not be removed
#[derive(Debug)]
pub struct RemovalFailure {
    /// Bundle id that was left installed
    pub bundle_id: String,
    /// Why removal failed
    pub error: TransportError,
}

/// Result of a reconciliation pass
#[derive(Debug, Default)]
pub struct UninstallReport {
    /// Bundle ids removed, in removal order
    pub removed: Vec<String>,
    /// Bundle ids whose removal failed
    pub failed: Vec<RemovalFailure>,
}

impl UninstallReport {
    /// Number of bundles removed
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    /// Number of removals attempted
    pub fn attempted(&self) -> usize {
        self.removed.len() + self.failed.len()
    }

    /// Whether every listed bundle was removed
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Remove every installed app whose bundle name is `bundle_name`.
///
/// Fails only if the installed apps cannot be listed. Removal failures end up
/// in [`UninstallReport::failed`].
pub async fn reconcile(
    registry: &dyn BundleRegistry,
    bundle_name: &str,
) -> Result<UninstallReport, TransportError> {
    let bundle_ids = registry.installed_bundle_ids(bundle_name).await?;
    let mut report = UninstallReport::default();

    if bundle_ids.is_empty() {
        tracing::debug!("No installed apps named {}, nothing to uninstall", bundle_name);
        return Ok(report);
    }

    tracing::debug!(
        "Found {} installed app(s) named {}: {:?}",
        bundle_ids.len(),
        bundle_name,
        bundle_ids
    );

    for bundle_id in bundle_ids {
        tracing::info!("Uninstalling {}", bundle_id);
        match registry.remove_app(&bundle_id).await {
            Ok(()) => report.removed.push(bundle_id),
            Err(error) => {
                tracing::warn!("Failed to uninstall {}: {}", bundle_id, error);
                report.failed.push(RemovalFailure { bundle_id, error });
            }
        }
    }

    if !report.is_complete() {
        tracing::warn!(
            "Uninstalled {} of {} app(s) named {}",
            report.removed_count(),
            report.attempted(),
            bundle_name
        );
    }

    Ok(report)
}
