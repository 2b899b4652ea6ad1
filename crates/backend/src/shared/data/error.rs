use std::path::PathBuf;
use thiserror::Error;

use super::provider::Resource;

/// Failures to obtain the source tables. Nothing past the load step produces
/// an error: bad rows are skipped and orphaned references are dropped.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Required resource '{resource}' not found at {}", .path.display())]
    MissingResource { resource: Resource, path: PathBuf },

    #[error("Resource '{resource}' is unreadable: {reason}")]
    InvalidResource { resource: Resource, reason: String },
}
