//! # excat-settings
//!
//! **Tier 0 (Pure Settings)**
//!
//! Clap-free settings types for the scan and sync layers. These mirror the
//! CLI arguments and `excat.toml` sections without any parsing concerns, so
//! library consumers can drive the scanner and synchronizer directly.
//!
//! ## What belongs here
//! * Pure data types with Serde derive
//! * Scan and sync settings, reserved-key defaults
//! * Default values
//!
//! ## What does NOT belong here
//! * Clap parsing (use excat-config)
//! * I/O operations
//! * Business logic

use excat_types::{DEBUG_KEY, DEFAULT_MESSAGE_KEY, LINE_KEY, PLACEHOLDER_MESSAGE};
use serde::{Deserialize, Serialize};

/// Which methods a scan reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    /// Only `pub` items.
    #[default]
    Public,
    /// `pub` plus `pub(crate)`, `pub(super)` and `pub(in ...)` items.
    Crate,
    /// Every method, private ones included.
    All,
}

/// What an update does with catalog entries no scanned method accounts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum PruneMode {
    /// Log and return unused keys; leave the catalog untouched.
    #[default]
    ReportOnly,
    /// Delete unused keys (reserved keys are never deleted).
    Remove,
}

/// Options for the code scanner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    /// Visibility level of the methods to report.
    #[serde(default)]
    pub visibility: Visibility,

    /// Crate name used as the root of every class path.
    ///
    /// Defaults to `[package].name` from `Cargo.toml`, then the directory name.
    #[serde(default)]
    pub crate_name: Option<String>,

    /// Gitignore-style patterns to skip.
    #[serde(default)]
    pub excluded: Vec<String>,

    /// Scan hidden files and directories.
    #[serde(default)]
    pub hidden: bool,
}

/// Values written for the reserved keys when a catalog lacks them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservedDefaults {
    #[serde(default)]
    pub debug: bool,

    #[serde(default = "default_default_message")]
    pub default_message: String,

    #[serde(default = "default_line_label")]
    pub line: String,
}

impl Default for ReservedDefaults {
    fn default() -> Self {
        Self {
            debug: false,
            default_message: default_default_message(),
            line: default_line_label(),
        }
    }
}

impl ReservedDefaults {
    /// `(key, value)` pairs in the order they are written to a fresh catalog.
    pub fn entries(&self) -> [(&'static str, String); 3] {
        [
            (DEBUG_KEY, self.debug.to_string()),
            (DEFAULT_MESSAGE_KEY, self.default_message.clone()),
            (LINE_KEY, self.line.clone()),
        ]
    }
}

fn default_default_message() -> String {
    "An unexpected error has occurred.".to_string()
}

fn default_line_label() -> String {
    "line".to_string()
}

/// Options for the catalog synchronizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOptions {
    /// Message written for newly discovered methods.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    #[serde(default)]
    pub defaults: ReservedDefaults,

    #[serde(default)]
    pub prune: PruneMode,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            defaults: ReservedDefaults::default(),
            prune: PruneMode::ReportOnly,
        }
    }
}

fn default_placeholder() -> String {
    PLACEHOLDER_MESSAGE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let opts = SyncOptions::default();
        assert_eq!(opts.placeholder, "<auto-generated message>");
        assert_eq!(opts.prune, PruneMode::ReportOnly);
        assert!(!opts.defaults.debug);
        assert_eq!(opts.defaults.line, "line");
        assert_eq!(ScanOptions::default().visibility, Visibility::Public);
    }

    #[test]
    fn reserved_entries_are_ordered() {
        let entries = ReservedDefaults::default().entries();
        let keys: Vec<&str> = entries.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ["DEBUG", "defaultMessage", "line"]);
        assert_eq!(entries[0].1, "false");
    }

    #[test]
    fn enums_use_kebab_case() {
        assert_eq!(
            serde_json::to_string(&PruneMode::ReportOnly).unwrap(),
            "\"report-only\""
        );
        assert_eq!(serde_json::to_string(&Visibility::All).unwrap(), "\"all\"");
    }
}
