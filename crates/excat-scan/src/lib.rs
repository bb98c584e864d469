//! # excat-scan
//!
//! **Tier 1 (Adapter)**
//!
//! Enumerates the fully-qualified method keys a codebase defines. Rust
//! sources are parsed with `syn`; each method becomes a `Class.method` key
//! where the class is the module path plus the implementing type, e.g.
//! `shop::orders::Cart.checkout`.
//!
//! ## What belongs here
//! * Crate layout detection (`Cargo.toml` name, `src/` root)
//! * Module path derivation and item enumeration
//!
//! ## What does NOT belong here
//! * Catalog access or diffing (use excat-sync)
//! * File traversal rules (use excat-walk)

mod collect;
mod module_path;

use std::fs;
use std::path::{Path, PathBuf};

use excat_settings::ScanOptions;
use excat_types::ScanResult;
use excat_walk::WalkOptions;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

pub use module_path::module_path;

/// Errors from scanning.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Scan target is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Failed to walk {}: {message}", path.display())]
    Walk { path: PathBuf, message: String },
}

/// Where sources live and what the crate is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrateLayout {
    pub crate_name: String,
    pub src_root: PathBuf,
}

impl CrateLayout {
    /// Work out the layout of `root`.
    ///
    /// * `root/Cargo.toml` with a `[package]` -> that name, sources in `root/src`
    /// * `root` named `src` next to a `Cargo.toml` -> the parent's package name
    /// * otherwise the directory name, sources in `root` itself
    ///
    /// A virtual workspace root is not a crate; point the scan at a member.
    ///
    /// `-` in crate names becomes `_`, as it does in symbol paths.
    pub fn detect(root: &Path, name_override: Option<&str>) -> Self {
        let mut crate_name = name_override.map(str::to_string);
        let mut src_root = root.to_path_buf();

        if let Some(name) = package_name(&root.join("Cargo.toml")) {
            crate_name.get_or_insert(name);
            let src = root.join("src");
            if src.is_dir() {
                src_root = src;
            }
        } else if root.file_name().is_some_and(|n| n == "src")
            && let Some(parent) = root.parent()
            && let Some(name) = package_name(&parent.join("Cargo.toml"))
        {
            crate_name.get_or_insert(name);
        }

        let crate_name = crate_name
            .or_else(|| dir_name(root))
            .unwrap_or_else(|| "crate".to_string())
            .replace('-', "_");

        Self {
            crate_name,
            src_root,
        }
    }
}

#[derive(Deserialize)]
struct Manifest {
    package: Option<Package>,
    workspace: Option<toml::Table>,
}

impl Manifest {
    /// A `[workspace]` root with no `[package]` of its own.
    fn is_virtual(&self) -> bool {
        self.package.is_none() && self.workspace.is_some()
    }
}

#[derive(Deserialize)]
struct Package {
    name: String,
}

fn read_manifest(manifest: &Path) -> Option<Manifest> {
    let text = fs::read_to_string(manifest).ok()?;
    match toml::from_str::<Manifest>(&text) {
        Ok(m) => Some(m),
        Err(err) => {
            warn!(path = %manifest.display(), error = %err, "ignoring unparsable manifest");
            None
        }
    }
}

fn package_name(manifest: &Path) -> Option<String> {
    let m = read_manifest(manifest)?;
    if m.is_virtual() {
        warn!(
            path = %manifest.display(),
            "virtual workspace has no [package], keys fall back to directory paths"
        );
    }
    m.package.map(|p| p.name)
}

fn dir_name(root: &Path) -> Option<String> {
    let resolved = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    resolved
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
}

/// Scan `root` and return every admitted method key, grouped by class.
///
/// A missing or empty directory yields an empty result. Files that cannot be
/// read or parsed are skipped and listed in [`ScanResult::skipped`].
pub fn scan(root: &Path, opts: &ScanOptions) -> Result<ScanResult, ScanError> {
    if !root.exists() {
        debug!(path = %root.display(), "scan target does not exist");
        return Ok(ScanResult::new());
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let layout = CrateLayout::detect(root, opts.crate_name.as_deref());
    let walk = WalkOptions {
        excluded: opts.excluded.clone(),
        hidden: opts.hidden,
        ..WalkOptions::with_extension("rs")
    };
    let files =
        excat_walk::list_files(&layout.src_root, &walk).map_err(|err| ScanError::Walk {
            path: layout.src_root.clone(),
            message: format!("{err:#}"),
        })?;

    let mut result = ScanResult::new();
    for rel in files {
        let rel_str = rel.to_string_lossy().replace('\\', "/");
        let full = layout.src_root.join(&rel);

        let text = match fs::read_to_string(&full) {
            Ok(text) => text,
            Err(err) => {
                warn!(file = %rel_str, error = %err, "skipping unreadable source file");
                result.skipped.push(rel_str);
                continue;
            }
        };
        let file = match syn::parse_file(&text) {
            Ok(file) => file,
            Err(err) => {
                warn!(file = %rel_str, error = %err, "skipping unparsable source file");
                result.skipped.push(rel_str);
                continue;
            }
        };

        let module = module_path(&layout.crate_name, &rel_str);
        let before = result.len();
        collect::collect_items(&file.items, &module, opts.visibility, &mut result);
        debug!(file = %rel_str, module = %module, methods = result.len() - before, "scanned");
    }

    Ok(result)
}
