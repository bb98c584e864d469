//! Process-wide catalog cache.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::SystemTime;

use parking_lot::RwLock;
use tracing::debug;

use crate::{CATALOG_ENV, Catalog, DEFAULT_CATALOG_FILE};

/// Modification time plus size of the backing file; `None` when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Stamp {
    modified: Option<SystemTime>,
    len: u64,
}

fn stamp(path: &Path) -> Option<Stamp> {
    let meta = fs::metadata(path).ok()?;
    Some(Stamp {
        modified: meta.modified().ok(),
        len: meta.len(),
    })
}

#[derive(Debug)]
struct Cached {
    catalog: Arc<Catalog>,
    stamp: Option<Stamp>,
}

/// Read-mostly cache of one catalog file.
///
/// [`SharedCatalog::snapshot`] revalidates the file's stamp on every call and
/// reloads only when it changed, so edits on disk show up without a restart.
/// A missing or unreadable file yields an empty catalog.
#[derive(Debug)]
pub struct SharedCatalog {
    path: PathBuf,
    state: RwLock<Option<Cached>>,
}

impl SharedCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: RwLock::new(None),
        }
    }

    /// The cache shared by the whole process.
    ///
    /// Backed by `$EXCAT_CATALOG`, or `exceptions.properties` in the working
    /// directory.
    pub fn global() -> &'static SharedCatalog {
        static GLOBAL: OnceLock<SharedCatalog> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            let path = env::var_os(CATALOG_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_FILE));
            SharedCatalog::new(path)
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current catalog, reloaded if the file changed since the last call.
    pub fn snapshot(&self) -> Arc<Catalog> {
        let current = stamp(&self.path);

        {
            let guard = self.state.read();
            if let Some(cached) = guard.as_ref()
                && cached.stamp == current
            {
                return Arc::clone(&cached.catalog);
            }
        }

        let mut guard = self.state.write();
        if let Some(cached) = guard.as_ref()
            && cached.stamp == current
        {
            return Arc::clone(&cached.catalog);
        }

        debug!(path = %self.path.display(), "reloading shared catalog");
        let catalog = Arc::new(Catalog::load_or_empty(&self.path));
        *guard = Some(Cached {
            catalog: Arc::clone(&catalog),
            stamp: current,
        });
        catalog
    }

    /// Drop the cached copy; the next snapshot reloads unconditionally.
    pub fn invalidate(&self) {
        *self.state.write() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_of_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let shared = SharedCatalog::new(dir.path().join("none.properties"));
        assert!(shared.snapshot().is_empty());
    }

    #[test]
    fn unchanged_file_reuses_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.properties");
        fs::write(&path, "A.b=M1\n").unwrap();

        let shared = SharedCatalog::new(&path);
        let first = shared.snapshot();
        let second = shared.snapshot();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn edited_file_is_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.properties");
        fs::write(&path, "A.b=M1\n").unwrap();

        let shared = SharedCatalog::new(&path);
        assert_eq!(shared.snapshot().get("A.b"), Some("M1"));

        fs::write(&path, "A.b=Changed message\n").unwrap();
        assert_eq!(shared.snapshot().get("A.b"), Some("Changed message"));
    }

    #[test]
    fn file_appearing_later_is_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.properties");
        let shared = SharedCatalog::new(&path);
        assert!(shared.snapshot().is_empty());

        fs::write(&path, "DEBUG=true\n").unwrap();
        assert!(shared.snapshot().debug());
    }

    #[test]
    fn invalidate_forces_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.properties");
        fs::write(&path, "A.b=M1\n").unwrap();

        let shared = SharedCatalog::new(&path);
        let first = shared.snapshot();
        shared.invalidate();
        let second = shared.snapshot();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.get("A.b"), Some("M1"));
    }

    #[test]
    fn shared_catalog_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedCatalog>();
    }
}
