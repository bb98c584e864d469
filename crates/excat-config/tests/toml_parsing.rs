//! TOML parsing tests for excat-config.
//!
//! Tests cover section defaults, enum spellings, invalid config handling, and
//! the conversions into settings types.

use std::io::Write;

use excat_config::{DefaultsConfig, PruneMode, TomlConfig, Visibility};
use excat_settings::ReservedDefaults;
use tempfile::NamedTempFile;

// ── 1. Empty and partial files ──────────────────────────────────────────

#[test]
fn empty_string_yields_default_config() {
    let config = TomlConfig::parse("").expect("empty TOML is valid");
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn partial_section_leaves_other_fields_unset() {
    let config = TomlConfig::parse("[scan]\nhidden = true\n").expect("valid TOML");
    assert_eq!(config.scan.hidden, Some(true));
    assert!(config.scan.root.is_none());
    assert!(config.scan.visibility.is_none());
    assert!(config.catalog.path.is_none());
}

// ── 2. Full file ────────────────────────────────────────────────────────

#[test]
fn full_config_round_trips_every_section() {
    let toml_str = r#"
[catalog]
path = "res/exceptions.properties"

[scan]
root = "src"
visibility = "all"
crate_name = "shop"
exclude = ["generated/**"]
hidden = false

[sync]
placeholder = "TODO: describe this failure"
prune = "remove"

[defaults]
debug = true
default_message = "Something went wrong."
line = "Line"
"#;
    let config = TomlConfig::parse(toml_str).expect("valid TOML");

    assert_eq!(config.catalog.path.as_deref(), Some("res/exceptions.properties"));
    assert_eq!(config.scan.root.as_deref(), Some("src"));
    assert_eq!(config.scan.visibility, Some(Visibility::All));
    assert_eq!(config.scan.crate_name.as_deref(), Some("shop"));
    assert_eq!(config.scan.exclude, Some(vec!["generated/**".to_string()]));
    assert_eq!(config.scan.hidden, Some(false));
    assert_eq!(
        config.sync.placeholder.as_deref(),
        Some("TODO: describe this failure")
    );
    assert_eq!(config.sync.prune, Some(PruneMode::Remove));
    assert_eq!(config.defaults.debug, Some(true));
    assert_eq!(
        config.defaults.default_message.as_deref(),
        Some("Something went wrong.")
    );
    assert_eq!(config.defaults.line.as_deref(), Some("Line"));
}

#[test]
fn prune_mode_uses_kebab_case() {
    let config = TomlConfig::parse("[sync]\nprune = \"report-only\"\n").expect("valid TOML");
    assert_eq!(config.sync.prune, Some(PruneMode::ReportOnly));
}

// ── 3. Invalid input ────────────────────────────────────────────────────

#[test]
fn unknown_visibility_is_an_error() {
    assert!(TomlConfig::parse("[scan]\nvisibility = \"private\"\n").is_err());
}

#[test]
fn wrong_type_is_an_error() {
    assert!(TomlConfig::parse("[scan]\nhidden = \"yes\"\n").is_err());
}

#[test]
fn malformed_toml_is_an_error() {
    assert!(TomlConfig::parse("[scan\nroot = ").is_err());
}

#[test]
fn unknown_sections_are_ignored() {
    let config = TomlConfig::parse("[future]\nflag = 1\n").expect("valid TOML");
    assert_eq!(config, TomlConfig::default());
}

// ── 4. from_file ────────────────────────────────────────────────────────

#[test]
fn from_file_reads_disk() {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(file, "[catalog]\npath = \"errors.properties\"").expect("write");

    let config = TomlConfig::from_file(file.path()).expect("valid file");

    assert_eq!(config.catalog.path.as_deref(), Some("errors.properties"));
}

#[test]
fn from_file_reports_invalid_data() {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(file, "[scan]\nhidden = 3").expect("write");

    let err = TomlConfig::from_file(file.path()).expect_err("invalid file");

    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}

#[test]
fn from_file_missing_is_not_found() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = TomlConfig::from_file(&dir.path().join("absent.toml")).expect_err("missing");
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}

// ── 5. Conversions ──────────────────────────────────────────────────────

#[test]
fn empty_defaults_section_converts_to_builtin_defaults() {
    let defaults = ReservedDefaults::from(&DefaultsConfig::default());
    assert_eq!(defaults, ReservedDefaults::default());
}
