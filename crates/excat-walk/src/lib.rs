//! # excat-walk
//!
//! **Tier 1 (Utilities)**
//!
//! Source file listing for the scanner. Walks a directory respecting
//! `.gitignore` / `.ignore` files and user exclude globs.
//!
//! ## What belongs here
//! * Filesystem traversal
//! * Exclude pattern handling
//!
//! ## What does NOT belong here
//! * Parsing file contents (use excat-scan)
//! * File modification

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;

/// Traversal options.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Only list files with one of these extensions (without the dot). Empty lists everything.
    pub extensions: Vec<String>,
    /// Gitignore-style patterns to skip.
    pub excluded: Vec<String>,
    /// Descend into hidden files and directories.
    pub hidden: bool,
}

impl WalkOptions {
    pub fn with_extension(ext: &str) -> Self {
        Self {
            extensions: vec![ext.to_string()],
            ..Self::default()
        }
    }
}

/// List files under `root`, relative to it, sorted by path.
///
/// A missing `root` yields an empty list; a `root` that exists but is not a
/// directory is an error.
pub fn list_files(root: &Path, opts: &WalkOptions) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Ok(Vec::new());
    }
    if !root.is_dir() {
        anyhow::bail!("Not a directory: {}", root.display());
    }

    let mut overrides = OverrideBuilder::new(root);
    for pattern in &opts.excluded {
        overrides
            .add(&format!("!{pattern}"))
            .with_context(|| format!("Invalid exclude pattern: {pattern}"))?;
    }
    let overrides = overrides.build().context("Failed to build exclude patterns")?;

    let mut builder = WalkBuilder::new(root);
    builder.hidden(!opts.hidden);
    builder.git_ignore(true);
    builder.git_exclude(true);
    builder.git_global(false);
    builder.require_git(false);
    builder.follow_links(false);
    builder.overrides(overrides);

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in builder.build() {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let path = entry.path();
        if !has_wanted_extension(path, &opts.extensions) {
            continue;
        }
        let rel = path.strip_prefix(root).unwrap_or(path).to_path_buf();
        files.push(rel);
    }

    files.sort_by(|a, b| a.to_string_lossy().cmp(&b.to_string_lossy()));
    Ok(files)
}

fn has_wanted_extension(path: &Path, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want == ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let files = list_files(&dir.path().join("nope"), &WalkOptions::default()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn file_root_is_error() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.rs");
        let result = list_files(&dir.path().join("a.rs"), &WalkOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn filters_by_extension_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "src/b.rs");
        touch(dir.path(), "src/a.rs");
        touch(dir.path(), "README.md");
        let files = list_files(dir.path(), &WalkOptions::with_extension("rs")).unwrap();
        assert_eq!(files, [PathBuf::from("src/a.rs"), PathBuf::from("src/b.rs")]);
    }

    #[test]
    fn excluded_patterns_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "src/keep.rs");
        touch(dir.path(), "generated/skip.rs");
        let opts = WalkOptions {
            excluded: vec!["generated".to_string()],
            ..WalkOptions::with_extension("rs")
        };
        let files = list_files(dir.path(), &opts).unwrap();
        assert_eq!(files, [PathBuf::from("src/keep.rs")]);
    }

    #[test]
    fn hidden_files_need_opt_in() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), ".hidden/a.rs");
        touch(dir.path(), "b.rs");
        let visible = list_files(dir.path(), &WalkOptions::with_extension("rs")).unwrap();
        assert_eq!(visible, [PathBuf::from("b.rs")]);

        let opts = WalkOptions {
            hidden: true,
            ..WalkOptions::with_extension("rs")
        };
        let all = list_files(dir.path(), &opts).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn gitignore_is_respected_without_git_repo() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".gitignore"), "target/\n").unwrap();
        touch(dir.path(), "target/debug/build.rs");
        touch(dir.path(), "src/lib.rs");
        let files = list_files(dir.path(), &WalkOptions::with_extension("rs")).unwrap();
        assert_eq!(files, [PathBuf::from("src/lib.rs")]);
    }
}
