//! # excat-types
//!
//! **Tier 0 (Core Types)**
//!
//! Data types shared by every excat crate: method keys, stack frames,
//! scan results, sync reports and the reserved catalog keys.
//!
//! ## What belongs here
//! * Pure data structs with Serde derives
//! * Reserved key names and the placeholder message
//!
//! ## What does NOT belong here
//! * File I/O
//! * CLI argument parsing
//! * Resolution or synchronization logic

use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Catalog key holding the boolean debug flag.
pub const DEBUG_KEY: &str = "DEBUG";

/// Catalog key holding the fallback message used when no frame matches.
pub const DEFAULT_MESSAGE_KEY: &str = "defaultMessage";

/// Catalog key holding the label printed before line numbers in debug output.
pub const LINE_KEY: &str = "line";

/// All reserved keys, in the order they are written to a fresh catalog.
pub const RESERVED_KEYS: [&str; 3] = [DEBUG_KEY, DEFAULT_MESSAGE_KEY, LINE_KEY];

/// Message written for every newly discovered method without an entry.
pub const PLACEHOLDER_MESSAGE: &str = "<auto-generated message>";

/// Returns `true` for `DEBUG`, `defaultMessage` and `line` (case-sensitive).
#[must_use]
pub fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Canonical `Class.method` catalog key.
///
/// The class part may itself contain dots or `::` separators; the method
/// name is always the segment after the last `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodKey(String);

impl MethodKey {
    /// Join a class name and a method name with `.`.
    #[must_use]
    pub fn new(class_name: &str, method_name: &str) -> Self {
        let mut key = String::with_capacity(class_name.len() + method_name.len() + 1);
        key.push_str(class_name);
        key.push('.');
        key.push_str(method_name);
        Self(key)
    }

    /// Parse a catalog key back into a `MethodKey`.
    ///
    /// Returns `None` for reserved keys and for anything without a
    /// non-empty class part and method part around the last `.`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if is_reserved(raw) {
            return None;
        }
        let (class, method) = raw.rsplit_once('.')?;
        if class.is_empty() || method.is_empty() {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn class_name(&self) -> &str {
        self.0.rsplit_once('.').map(|(c, _)| c).unwrap_or("")
    }

    pub fn method_name(&self) -> &str {
        self.0.rsplit_once('.').map(|(_, m)| m).unwrap_or(&self.0)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MethodKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for MethodKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One call-stack frame as seen by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub class_name: String,
    pub method_name: String,
    /// Source line, when the stack capture knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl Frame {
    pub fn new(
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        line: Option<u32>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
            line,
        }
    }

    /// The catalog key this frame is looked up under.
    #[must_use]
    pub fn key(&self) -> MethodKey {
        MethodKey::new(&self.class_name, &self.method_name)
    }
}

/// Methods found by a scan, grouped by declaring class in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub classes: IndexMap<String, Vec<MethodKey>>,

    /// Source files that could not be parsed (forward slashes, relative to the scan root).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `class_name.method_name`. Same-named methods collapse to one key.
    ///
    /// Returns `true` when the key was not yet present.
    pub fn insert(&mut self, class_name: &str, method_name: &str) -> bool {
        let key = MethodKey::new(class_name, method_name);
        let methods = self.classes.entry(class_name.to_string()).or_default();
        if methods.contains(&key) {
            return false;
        }
        methods.push(key);
        true
    }

    /// Every key, class declaration order first, then method declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &MethodKey> {
        self.classes.values().flatten()
    }

    /// Flattened copy of [`ScanResult::keys`].
    #[must_use]
    pub fn flatten(&self) -> Vec<MethodKey> {
        self.keys().cloned().collect()
    }

    #[must_use]
    pub fn key_set(&self) -> BTreeSet<MethodKey> {
        self.keys().cloned().collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys().any(|k| k.as_str() == key)
    }

    /// Number of distinct method keys.
    pub fn len(&self) -> usize {
        self.classes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}

/// Drift between a scan and a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Scanned keys with no catalog entry, in discovery order.
    pub missing: Vec<MethodKey>,

    /// Non-reserved catalog entries no scanned method accounts for, with their messages.
    pub unused: BTreeMap<String, String>,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.unused.is_empty()
    }
}
