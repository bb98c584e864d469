//! Config discovery and CLI/TOML precedence.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use excat_catalog::DEFAULT_CATALOG_FILE;
use excat_config::{self as cli, CONFIG_FILE_NAME, TomlConfig};
use excat_settings::{PruneMode, ReservedDefaults, ScanOptions, SyncOptions};
use tracing::debug;

/// The loaded `excat.toml` (or defaults) plus where it came from.
#[derive(Debug, Clone, Default)]
pub(crate) struct ResolvedConfig {
    pub(crate) toml: TomlConfig,
    /// Directory that relative paths in the file are anchored to.
    pub(crate) base_dir: Option<PathBuf>,
    pub(crate) source: Option<PathBuf>,
}

/// `--config`, then `./excat.toml`, then `<config dir>/excat/excat.toml`.
///
/// An explicit `--config` that cannot be read is an error; the implicit
/// locations are only used when present.
pub(crate) fn discover(explicit: Option<&Path>) -> Result<ResolvedConfig> {
    if let Some(path) = explicit {
        return load(path);
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return load(&local);
    }

    if let Some(user) = user_config_path()
        && user.is_file()
    {
        return load(&user);
    }

    debug!("no excat.toml found, using built-in defaults");
    Ok(ResolvedConfig::default())
}

fn user_config_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("excat").join(CONFIG_FILE_NAME))
}

fn load(path: &Path) -> Result<ResolvedConfig> {
    let toml = TomlConfig::from_file(path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;

    let base_dir = path.parent().map(|parent| {
        if parent.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            parent.to_path_buf()
        }
    });

    Ok(ResolvedConfig {
        toml,
        base_dir,
        source: Some(path.to_path_buf()),
    })
}

impl ResolvedConfig {
    /// Where the settings came from, for log output.
    pub(crate) fn origin(&self) -> String {
        match &self.source {
            Some(path) => path.display().to_string(),
            None => "built-in defaults".to_string(),
        }
    }

    fn anchor(&self, raw: &str) -> PathBuf {
        let path = PathBuf::from(raw);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path,
        }
    }

    pub(crate) fn scan_root(&self, args: &cli::CliScanArgs) -> PathBuf {
        args.dir
            .clone()
            .or_else(|| self.toml.scan.root.as_deref().map(|r| self.anchor(r)))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub(crate) fn scan_options(&self, args: &cli::CliScanArgs) -> ScanOptions {
        let file = &self.toml.scan;
        ScanOptions {
            visibility: args.visibility.or(file.visibility).unwrap_or_default(),
            crate_name: args.crate_name.clone().or_else(|| file.crate_name.clone()),
            excluded: if args.excluded.is_empty() {
                file.exclude.clone().unwrap_or_default()
            } else {
                args.excluded.clone()
            },
            hidden: args.hidden || file.hidden.unwrap_or(false),
        }
    }

    pub(crate) fn catalog_path(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.toml.catalog.path.as_deref().map(|p| self.anchor(p)))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_FILE))
    }

    pub(crate) fn sync_options(&self, args: &cli::GenerateArgs) -> SyncOptions {
        let file = &self.toml.sync;
        let base = SyncOptions::default();
        SyncOptions {
            placeholder: args
                .placeholder
                .clone()
                .or_else(|| file.placeholder.clone())
                .unwrap_or(base.placeholder),
            defaults: ReservedDefaults::from(&self.toml.defaults),
            prune: if args.prune {
                PruneMode::Remove
            } else {
                file.prune.unwrap_or_default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use excat_config::{Cli, Commands, Visibility};

    use super::*;

    fn generate_args(argv: &[&str]) -> cli::GenerateArgs {
        let mut full = vec!["excat", "generate"];
        full.extend_from_slice(argv);
        match <Cli as clap::Parser>::parse_from(full).command {
            Commands::Generate(args) => args,
            other => panic!("expected generate, got {other:?}"),
        }
    }

    fn with_toml(text: &str, base: &str) -> ResolvedConfig {
        ResolvedConfig {
            toml: TomlConfig::parse(text).unwrap(),
            base_dir: Some(PathBuf::from(base)),
            source: Some(PathBuf::from(base).join(CONFIG_FILE_NAME)),
        }
    }

    #[test]
    fn defaults_without_any_config() {
        let resolved = ResolvedConfig::default();
        let args = generate_args(&[]);

        assert_eq!(resolved.scan_root(&args.scan), PathBuf::from("."));
        assert_eq!(resolved.catalog_path(None), PathBuf::from("exceptions.properties"));
        assert_eq!(resolved.scan_options(&args.scan), ScanOptions::default());
        assert_eq!(resolved.sync_options(&args), SyncOptions::default());
    }

    #[test]
    fn file_paths_are_relative_to_the_config_file() {
        let resolved = with_toml(
            "[catalog]\npath = \"res/errors.properties\"\n[scan]\nroot = \"src\"\n",
            "project",
        );
        let args = generate_args(&[]);

        assert_eq!(resolved.scan_root(&args.scan), PathBuf::from("project/src"));
        assert_eq!(
            resolved.catalog_path(None),
            PathBuf::from("project/res/errors.properties")
        );
    }

    #[test]
    fn cli_flags_beat_the_file() {
        let resolved = with_toml(
            "[scan]\nvisibility = \"all\"\nexclude = [\"gen/**\"]\n[sync]\nplaceholder = \"file\"\n",
            ".",
        );
        let args = generate_args(&[
            "--visibility",
            "crate",
            "--exclude",
            "cli/**",
            "--placeholder",
            "flag",
            "--catalog",
            "other.properties",
        ]);

        let scan = resolved.scan_options(&args.scan);
        assert_eq!(scan.visibility, Visibility::Crate);
        assert_eq!(scan.excluded, vec!["cli/**"]);
        assert_eq!(resolved.sync_options(&args).placeholder, "flag");
        assert_eq!(
            resolved.catalog_path(args.catalog.as_deref()),
            PathBuf::from("other.properties")
        );
    }

    #[test]
    fn file_values_fill_what_the_cli_leaves_out() {
        let resolved = with_toml(
            "[scan]\nvisibility = \"all\"\ncrate_name = \"shop\"\nhidden = true\n\
             [sync]\nprune = \"remove\"\n[defaults]\nline = \"Line\"\n",
            ".",
        );
        let args = generate_args(&[]);

        let scan = resolved.scan_options(&args.scan);
        assert_eq!(scan.visibility, Visibility::All);
        assert_eq!(scan.crate_name.as_deref(), Some("shop"));
        assert!(scan.hidden);
        let sync = resolved.sync_options(&args);
        assert_eq!(sync.prune, PruneMode::Remove);
        assert_eq!(sync.defaults.line, "Line");
    }

    #[test]
    fn prune_flag_forces_remove() {
        let resolved = with_toml("[sync]\nprune = \"report-only\"\n", ".");
        let args = generate_args(&["--prune"]);
        assert_eq!(resolved.sync_options(&args).prune, PruneMode::Remove);
    }

    #[test]
    fn explicit_config_is_loaded_and_anchored() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("ci.toml");
        fs::write(&path, "[catalog]\npath = \"errors.properties\"\n").unwrap();

        let resolved = discover(Some(&path)).unwrap();

        assert_eq!(resolved.source.as_deref(), Some(path.as_path()));
        assert_eq!(
            resolved.catalog_path(None),
            tmp.path().join("errors.properties")
        );
    }

    #[test]
    fn origin_names_the_config_file_or_the_defaults() {
        assert_eq!(ResolvedConfig::default().origin(), "built-in defaults");
        let resolved = with_toml("[scan]\n", "project");
        assert_eq!(
            resolved.origin(),
            PathBuf::from("project").join(CONFIG_FILE_NAME).display().to_string()
        );
    }

    #[test]
    fn explicit_config_that_is_missing_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = discover(Some(&tmp.path().join("absent.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to load config"));
    }

    #[test]
    fn invalid_config_mentions_toml() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("excat.toml");
        fs::write(&path, "[scan]\nhidden = \"yes\"\n").unwrap();

        let err = discover(Some(&path)).unwrap_err();

        assert!(format!("{err:#}").to_ascii_lowercase().contains("toml"));
    }
}
