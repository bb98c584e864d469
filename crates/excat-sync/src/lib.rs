//! # excat-sync
//!
//! **Tier 2 (Reconciliation)**
//!
//! Diffs scanned method keys against a catalog in both directions and
//! writes back what is missing.
//!
//! ## What belongs here
//! * Missing / unused detection
//! * Placeholder and reserved-key population
//! * Opt-in pruning of stale entries
//!
//! ## What does NOT belong here
//! * Source parsing (use excat-scan)
//! * The on-disk format (use excat-props via excat-catalog)
//!
//! ## Example
//! ```ignore
//! use excat_catalog::Catalog;
//! use excat_settings::{ScanOptions, SyncOptions};
//!
//! let mut catalog = Catalog::open("exceptions.properties")?;
//! let outcome = excat_sync::generate_missing_entries(
//!     "src".as_ref(),
//!     &mut catalog,
//!     &ScanOptions::default(),
//!     &SyncOptions::default(),
//! )?;
//! println!("added {}", outcome.added.len());
//! ```

mod check;
mod error;
mod update;

pub use check::{check_missing, check_unused, missing_reserved, report};
pub use error::SyncError;
pub use update::{
    SyncOutcome, generate_missing_entries, update_catalog, update_catalog_with_unused,
};
