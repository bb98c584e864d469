//! Catalog error type.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading or persisting a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog file not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("Failed to read catalog {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to persist catalog {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog has no backing file to persist to")]
    Detached,
}

impl CatalogError {
    /// `true` when the backing file simply does not exist yet.
    pub fn is_missing(&self) -> bool {
        matches!(self, CatalogError::Missing { .. })
    }
}
