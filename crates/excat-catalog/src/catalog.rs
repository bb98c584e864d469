//! The editable catalog.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use excat_props::PropsDocument;
use excat_types::{DEBUG_KEY, DEFAULT_MESSAGE_KEY, LINE_KEY};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::CatalogError;

/// Key -> message mapping bound (optionally) to a backing file.
///
/// Edits stay in memory until [`Catalog::persist`], which writes only when
/// something actually changed.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    path: Option<PathBuf>,
    doc: PropsDocument,
    exists: bool,
    dirty: bool,
}

impl Catalog {
    /// An empty catalog with no backing file.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// An in-memory catalog parsed from text.
    pub fn from_text(text: &str) -> Self {
        Self {
            doc: PropsDocument::parse(text),
            ..Self::default()
        }
    }

    /// Load the catalog stored at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CatalogError::Missing {
                    path: path.to_path_buf(),
                });
            }
            Err(source) => {
                return Err(CatalogError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let doc = PropsDocument::parse(&text);
        debug!(path = %path.display(), entries = doc.len(), "loaded catalog");
        Ok(Self {
            path: Some(path.to_path_buf()),
            doc,
            exists: true,
            dirty: false,
        })
    }

    /// Load `path` for editing. A missing file yields an empty catalog that
    /// will be created on the first persist; read failures still error so a
    /// file we could not read is never overwritten.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        match Self::load(path.as_ref()) {
            Err(CatalogError::Missing { path }) => {
                debug!(path = %path.display(), "catalog does not exist yet");
                Ok(Self::unbacked(path))
            }
            other => other,
        }
    }

    /// Load `path`, falling back to an empty catalog on any failure.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(catalog) => catalog,
            Err(err) => {
                warn!(error = %err, "catalog unavailable, continuing with an empty catalog");
                Self::unbacked(path.to_path_buf())
            }
        }
    }

    fn unbacked(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            ..Self::default()
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.doc.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.doc.contains_key(key)
    }

    /// Insert or update an entry. Returns `true` if the catalog changed.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        let changed = self.doc.set(key, value);
        self.dirty |= changed;
        changed
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let removed = self.doc.remove(key);
        self.dirty |= removed.is_some();
        removed
    }

    /// Keys in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.doc.keys()
    }

    /// `(key, message)` pairs in file order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.doc.entries()
    }

    pub fn len(&self) -> usize {
        self.doc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc.is_empty()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether the backing file existed when loaded (or has since been written).
    pub fn exists(&self) -> bool {
        self.exists
    }

    /// Whether there are edits not yet persisted.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Value of `DEBUG`: only a case-insensitive `true` enables debug mode.
    pub fn debug(&self) -> bool {
        self.get(DEBUG_KEY)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    }

    /// Value of `defaultMessage`, or `""` when absent.
    pub fn default_message(&self) -> &str {
        self.get(DEFAULT_MESSAGE_KEY).unwrap_or("")
    }

    /// Value of `line`, or `""` when absent.
    pub fn line_label(&self) -> &str {
        self.get(LINE_KEY).unwrap_or("")
    }

    /// Current text as it would be persisted.
    pub fn render(&self) -> String {
        self.doc.render()
    }

    /// Write pending edits to the backing file.
    ///
    /// Returns `Ok(false)` without touching the file when nothing changed.
    /// The write goes through a temporary file in the same directory and a
    /// rename, so readers never observe a half-written catalog.
    pub fn persist(&mut self) -> Result<bool, CatalogError> {
        if !self.dirty {
            return Ok(false);
        }
        let path = self.path.clone().ok_or(CatalogError::Detached)?;
        let persist_err = |source| CatalogError::Persist {
            path: path.clone(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(persist_err)?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(persist_err)?;
        tmp.write_all(self.doc.render().as_bytes())
            .map_err(persist_err)?;
        tmp.as_file().sync_all().map_err(persist_err)?;
        tmp.persist(&path).map_err(|e| persist_err(e.error))?;

        info!(path = %path.display(), entries = self.doc.len(), "persisted catalog");
        self.dirty = false;
        self.exists = true;
        Ok(true)
    }
}
