//! Default collaborator implementations

mod http;
mod revision;

pub use http::HttpStatusProbe;
pub use revision::{FsRevisionOracle, DEFAULT_REVISION_MARKER};
