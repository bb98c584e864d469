//! Catalog write-back.

use std::path::Path;

use excat_catalog::Catalog;
use excat_settings::{PruneMode, ScanOptions, SyncOptions};
use excat_types::{MethodKey, ScanResult, is_reserved};
use serde::Serialize;
use tracing::{info, warn};

use crate::SyncError;
use crate::check::{check_missing, check_unused};

/// What a synchronization run did to the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    /// Method keys that received the placeholder, in discovery order.
    pub added: Vec<MethodKey>,
    /// Reserved keys that were written with their defaults.
    pub reserved_added: Vec<String>,
    /// Unused keys that were left in place.
    pub unused: Vec<String>,
    /// Unused keys that were deleted.
    pub removed: Vec<String>,
    /// Whether the backing file was written.
    pub persisted: bool,
}

impl SyncOutcome {
    /// `true` when nothing was added or removed.
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.reserved_added.is_empty() && self.removed.is_empty()
    }
}

/// Scan `dir` and fill every missing entry of `catalog`.
///
/// Missing method keys get the placeholder message, and any absent reserved
/// key gets its default. Entries no scanned method accounts for are handled
/// per [`SyncOptions::prune`]. The catalog is persisted once at the end, and
/// only if something changed, so a second run over an unchanged tree leaves
/// the file untouched.
pub fn generate_missing_entries(
    dir: &Path,
    catalog: &mut Catalog,
    scan_opts: &ScanOptions,
    opts: &SyncOptions,
) -> Result<SyncOutcome, SyncError> {
    let scan = excat_scan::scan(dir, scan_opts)?;
    let mut outcome = SyncOutcome::default();

    for (key, value) in opts.defaults.entries() {
        if !catalog.contains(key) {
            catalog.set(key, &value);
            outcome.reserved_added.push(key.to_string());
        }
    }
    outcome.added = add_placeholders(catalog, &scan, &opts.placeholder);

    let unused: Vec<String> = check_unused(catalog, &scan.key_set()).into_keys().collect();
    handle_unused(catalog, &scan, &unused, opts.prune, &mut outcome);

    outcome.persisted = persist(catalog)?;
    log_outcome(catalog, &outcome);
    Ok(outcome)
}

/// Write the placeholder for every scanned key the catalog lacks, then persist.
///
/// Reserved keys are left alone and nothing is removed.
pub fn update_catalog(
    catalog: &mut Catalog,
    scan: &ScanResult,
    opts: &SyncOptions,
) -> Result<SyncOutcome, SyncError> {
    let mut outcome = SyncOutcome {
        added: add_placeholders(catalog, scan, &opts.placeholder),
        ..SyncOutcome::default()
    };
    outcome.persisted = persist(catalog)?;
    log_outcome(catalog, &outcome);
    Ok(outcome)
}

/// [`update_catalog`], plus handling of a precomputed list of unused keys.
///
/// With [`PruneMode::ReportOnly`] the keys are logged and returned in
/// [`SyncOutcome::unused`]. With [`PruneMode::Remove`] they are deleted.
/// Reserved keys and keys the scan still produces are never deleted.
pub fn update_catalog_with_unused(
    catalog: &mut Catalog,
    scan: &ScanResult,
    unused: &[String],
    opts: &SyncOptions,
) -> Result<SyncOutcome, SyncError> {
    let mut outcome = SyncOutcome {
        added: add_placeholders(catalog, scan, &opts.placeholder),
        ..SyncOutcome::default()
    };

    handle_unused(catalog, scan, unused, opts.prune, &mut outcome);

    outcome.persisted = persist(catalog)?;
    log_outcome(catalog, &outcome);
    Ok(outcome)
}

fn handle_unused(
    catalog: &mut Catalog,
    scan: &ScanResult,
    unused: &[String],
    prune: PruneMode,
    outcome: &mut SyncOutcome,
) {
    for key in unused {
        if is_reserved(key) || scan.contains(key) || !catalog.contains(key) {
            continue;
        }
        match prune {
            PruneMode::ReportOnly => {
                warn!(key = %key, "unused catalog entry");
                outcome.unused.push(key.clone());
            }
            PruneMode::Remove => {
                catalog.remove(key);
                outcome.removed.push(key.clone());
            }
        }
    }
}

fn add_placeholders(
    catalog: &mut Catalog,
    scan: &ScanResult,
    placeholder: &str,
) -> Vec<MethodKey> {
    let missing = check_missing(catalog, &scan.flatten());
    for key in &missing {
        catalog.set(key.as_str(), placeholder);
    }
    missing
}

/// In-memory catalogs have nowhere to go; edits stay in memory.
fn persist(catalog: &mut Catalog) -> Result<bool, SyncError> {
    if catalog.path().is_none() {
        return Ok(false);
    }
    Ok(catalog.persist()?)
}

fn log_outcome(catalog: &Catalog, outcome: &SyncOutcome) {
    let path = catalog
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    if outcome.is_noop() {
        info!(catalog = %path, "catalog already up to date");
        return;
    }
    info!(
        catalog = %path,
        added = outcome.added.len(),
        reserved = outcome.reserved_added.len(),
        removed = outcome.removed.len(),
        persisted = outcome.persisted,
        "catalog updated"
    );
}
