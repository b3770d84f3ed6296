//! Crate-wide error type.
//!
//! Each subsystem has its own error type; [`MapkubeapisError`] unifies them
//! for callers that want a single type.

use std::path::PathBuf;

use thiserror::Error;

use crate::cluster::ClusterError;
use crate::mapping::CatalogError;
use crate::version::VersionParseError;

#[derive(Debug, Error)]
pub enum MapkubeapisError {
    /// The mapping catalog could not be obtained.
    #[error("Failed to load mapping file: {}: {}", path.display(), source)]
    CatalogUnavailable {
        path: PathBuf,
        #[source]
        source: CatalogError,
    },

    #[error(transparent)]
    ClusterUnreachable(#[from] ClusterError),

    #[error("Failed to get Kubernetes server version: {0}")]
    VersionParse(#[from] VersionParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MapkubeapisError>;
