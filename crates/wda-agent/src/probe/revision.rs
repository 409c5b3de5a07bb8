//! Revision of the locally bundled agent sources

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use wda_core::traits::RevisionOracle;

/// File under the bootstrap root whose modification time marks the revision
pub const DEFAULT_REVISION_MARKER: &str = "package.json";

/// Derives the revision token from the modification time of a marker file.
///
/// The token is the mtime in milliseconds since the UNIX epoch, which is
/// what an upgraded agent reports back as `upgradedAt`.
#[derive(Debug, Clone)]
pub struct FsRevisionOracle {
    marker: PathBuf,
}

impl FsRevisionOracle {
    /// Use `marker`, relative to the bootstrap root
    pub fn new(marker: impl Into<PathBuf>) -> Self {
        Self {
            marker: marker.into(),
        }
    }
}

impl Default for FsRevisionOracle {
    fn default() -> Self {
        Self::new(DEFAULT_REVISION_MARKER)
    }
}

#[async_trait]
impl RevisionOracle for FsRevisionOracle {
    async fn local_revision(&self, bootstrap_path: &Path) -> Option<String> {
        let path = bootstrap_path.join(&self.marker);
        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::debug!("Cannot read agent revision marker {:?}: {}", path, e);
                return None;
            }
        };

        let millis = metadata
            .modified()
            .ok()?
            .duration_since(UNIX_EPOCH)
            .ok()?
            .as_millis();
        Some(millis.to_string())
    }
}
