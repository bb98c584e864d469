use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use excat_catalog::Catalog;
use excat_config as cli;
use excat_resolve::{Cause, parse_stack, resolve, resolve_wrapped};
use tracing::warn;

use crate::config::ResolvedConfig;

pub(crate) fn handle(args: cli::ResolveArgs, resolved: &ResolvedConfig) -> Result<()> {
    let path = resolved.catalog_path(args.catalog.as_deref());
    let catalog = Catalog::load_or_empty(&path);

    let text = read_stack(args.stack.as_deref())?;
    let stack = parse_stack(&text);
    if stack.is_empty() {
        warn!("no stack frames found in the input");
    }

    let mut exception = match &args.wrap_type {
        Some(type_name) => {
            let cause = Cause::new(type_name.as_str()).with_message(args.wrap_message.clone().unwrap_or_default());
            resolve_wrapped(&stack, &catalog, cause)
        }
        None => resolve(&stack, &catalog),
    };
    if let Some(debug) = args.debug_override() {
        exception.set_debug(debug);
    }

    println!("{exception}");
    Ok(())
}

/// `None` and `-` read stdin.
fn read_stack(source: Option<&Path>) -> Result<String> {
    match source {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read stack trace {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stack trace from stdin")?;
            Ok(text)
        }
    }
}
