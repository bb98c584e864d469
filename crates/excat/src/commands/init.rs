use std::fs;

use anyhow::{Context, Result, bail};
use excat_config::{self as cli, CONFIG_FILE_NAME};

const TEMPLATE: &str = r#"# excat configuration.
# Command-line flags take precedence over everything in this file.
# Relative paths are resolved against the directory holding this file.

[catalog]
path = "exceptions.properties"

[scan]
root = "."
# public | crate | all
visibility = "public"
# crate_name = "my_crate"
exclude = []
hidden = false

[sync]
placeholder = "<auto-generated message>"
# report-only | remove
prune = "report-only"

# Written by `excat generate` when the catalog lacks these keys.
[defaults]
debug = false
default_message = "An unexpected error has occurred."
line = "line"
"#;

pub(crate) fn handle(args: cli::InitArgs) -> Result<()> {
    if args.print {
        print!("{TEMPLATE}");
        return Ok(());
    }

    let path = args.dir.join(CONFIG_FILE_NAME);
    if path.exists() && !args.force {
        bail!("{} already exists", path.display());
    }

    fs::create_dir_all(&args.dir)
        .with_context(|| format!("Failed to create {}", args.dir.display()))?;
    fs::write(&path, TEMPLATE).with_context(|| format!("Failed to write {}", path.display()))?;
    eprintln!("Created {}", path.display());
    Ok(())
}
