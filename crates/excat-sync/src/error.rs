//! Synchronization error type.

use excat_catalog::CatalogError;
use excat_scan::ScanError;
use thiserror::Error;

/// Errors from a synchronization run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Scan(#[from] ScanError),
}
