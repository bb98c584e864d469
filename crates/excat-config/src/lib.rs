//! # excat-config
//!
//! **Tier 4 (Configuration)**
//!
//! This crate defines the CLI arguments and the `excat.toml` file schema.
//!
//! ## What belongs here
//! * Clap `Parser`, `Args`, `Subcommand` structs
//! * Configuration file struct definitions (Serde)
//! * Default values and enums
//!
//! ## What does NOT belong here
//! * Business logic
//! * I/O operations (except config file parsing)
//! * Config discovery and precedence (the CLI crate owns those)

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

pub use excat_settings::{PruneMode, Visibility};

/// `excat` keeps an exception message catalog in step with your code.
///
/// Methods are keyed as `crate::module::Type.method`; the catalog is a
/// properties file mapping those keys to user-facing messages.
#[derive(Parser, Debug)]
#[command(name = "excat", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Configuration file (defaults to `./excat.toml`, then the user config dir).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose output (repeat for more detail).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List the method keys defined under a directory.
    Scan(CliScanCommand),

    /// Report catalog drift: methods without messages and stale entries.
    Check(CheckArgs),

    /// Add placeholder messages for every method the catalog lacks.
    Generate(GenerateArgs),

    /// Resolve the message for a stack trace.
    Resolve(ResolveArgs),

    /// Write an `excat.toml` template to the target directory.
    Init(InitArgs),
}

/// Scanner flags shared by `scan`, `check` and `generate`.
#[derive(Args, Debug, Clone, Default)]
pub struct CliScanArgs {
    /// Crate or source directory to scan (defaults to `[scan] root`, then ".").
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Which methods to report.
    #[arg(long, value_enum)]
    pub visibility: Option<Visibility>,

    /// Crate name used as the root of every class path.
    #[arg(long, value_name = "NAME")]
    pub crate_name: Option<String>,

    /// Exclude pattern(s) using gitignore syntax. Repeatable.
    #[arg(long = "exclude", value_name = "PATTERN")]
    pub excluded: Vec<String>,

    /// Scan hidden files and directories.
    #[arg(long)]
    pub hidden: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CliScanCommand {
    #[command(flatten)]
    pub scan: CliScanArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub scan: CliScanArgs,

    /// Catalog file (defaults to `[catalog] path`, then `exceptions.properties`).
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Exit with status 1 when anything is missing or unused.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub scan: CliScanArgs,

    /// Catalog file (defaults to `[catalog] path`, then `exceptions.properties`).
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Delete catalog entries no scanned method accounts for.
    #[arg(long)]
    pub prune: bool,

    /// Message written for newly discovered methods.
    #[arg(long, value_name = "TEXT")]
    pub placeholder: Option<String>,

    /// Output format for the summary.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Catalog file (defaults to `[catalog] path`, then `exceptions.properties`).
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// File holding the stack trace; `-` or absent reads stdin.
    #[arg(long, value_name = "FILE")]
    pub stack: Option<PathBuf>,

    /// Force debug rendering on.
    #[arg(long, conflicts_with = "no_debug")]
    pub debug: bool,

    /// Force debug rendering off.
    #[arg(long)]
    pub no_debug: bool,

    /// Type name of a wrapped error.
    #[arg(long, value_name = "TYPE")]
    pub wrap_type: Option<String>,

    /// Message of the wrapped error.
    #[arg(long, value_name = "TEXT", requires = "wrap_type")]
    pub wrap_message: Option<String>,
}

impl ResolveArgs {
    /// `Some(true)` / `Some(false)` when a flag overrides the catalog's `DEBUG`.
    pub fn debug_override(&self) -> Option<bool> {
        match (self.debug, self.no_debug) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Target directory.
    #[arg(value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Overwrite an existing `excat.toml`.
    #[arg(long)]
    pub force: bool,

    /// Print the template to stdout instead of writing a file.
    #[arg(long)]
    pub print: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

// =============================================================================
// TOML Configuration File Structures
// =============================================================================

/// File name looked up in the working directory and the user config dir.
pub const CONFIG_FILE_NAME: &str = "excat.toml";

/// Root of `excat.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub catalog: CatalogConfig,
    pub scan: ScanConfig,
    pub sync: SyncConfig,
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog file, relative to the config file.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory to scan, relative to the config file.
    pub root: Option<String>,

    pub visibility: Option<Visibility>,

    pub crate_name: Option<String>,

    /// Glob patterns to exclude.
    pub exclude: Option<Vec<String>>,

    /// Include hidden files and directories.
    pub hidden: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Message written for newly discovered methods.
    pub placeholder: Option<String>,

    /// `report-only` or `remove`.
    pub prune: Option<PruneMode>,
}

/// Values `generate` writes for absent reserved keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub debug: Option<bool>,
    pub default_message: Option<String>,
    pub line: Option<String>,
}

impl TomlConfig {
    /// Load configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Load configuration from a file path.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

// ============================================================
// Conversions into Tier-0 settings
// ============================================================

impl From<&DefaultsConfig> for excat_settings::ReservedDefaults {
    fn from(cfg: &DefaultsConfig) -> Self {
        let base = Self::default();
        Self {
            debug: cfg.debug.unwrap_or(base.debug),
            default_message: cfg.default_message.clone().unwrap_or(base.default_message),
            line: cfg.line.clone().unwrap_or(base.line),
        }
    }
}
