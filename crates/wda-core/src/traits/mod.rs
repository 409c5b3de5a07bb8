//! Collaborator trait definitions

mod device;
mod probe;

pub use device::{BuildPipeline, BundleRegistry, LaunchContext};
pub use probe::{RevisionOracle, StatusProbe};
