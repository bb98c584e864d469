use std::path::Path;

use anyhow::Result;
use excat_catalog::Catalog;
use excat_config as cli;
use excat_sync::SyncOutcome;

use crate::config::ResolvedConfig;

pub(crate) fn handle(args: cli::GenerateArgs, resolved: &ResolvedConfig) -> Result<()> {
    let root = resolved.scan_root(&args.scan);
    let scan_opts = resolved.scan_options(&args.scan);
    let sync_opts = resolved.sync_options(&args);
    let path = resolved.catalog_path(args.catalog.as_deref());

    let mut catalog = Catalog::open(&path)?;
    let outcome =
        excat_sync::generate_missing_entries(&root, &mut catalog, &scan_opts, &sync_opts)?;

    match args.format {
        cli::OutputFormat::Text => print!("{}", render_text(&path, &outcome)),
        cli::OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }
    Ok(())
}

fn render_text(path: &Path, outcome: &SyncOutcome) -> String {
    let mut out = String::new();
    if outcome.is_noop() {
        out.push_str(&format!("{} is already up to date.\n", path.display()));
    } else {
        out.push_str(&format!(
            "Updated {}: {} placeholder(s), {} reserved key(s) added, {} removed.\n",
            path.display(),
            outcome.added.len(),
            outcome.reserved_added.len(),
            outcome.removed.len()
        ));
    }
    for key in &outcome.added {
        out.push_str(&format!("  + {key}\n"));
    }
    for key in &outcome.removed {
        out.push_str(&format!("  - {key}\n"));
    }
    if !outcome.unused.is_empty() {
        out.push_str(&format!(
            "{} unused entr{} kept (use --prune to remove):\n",
            outcome.unused.len(),
            if outcome.unused.len() == 1 { "y" } else { "ies" }
        ));
        for key in &outcome.unused {
            out.push_str(&format!("  ? {key}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use excat_types::MethodKey;

    use super::*;

    #[test]
    fn noop_run_reports_up_to_date() {
        let text = render_text(Path::new("e.properties"), &SyncOutcome::default());
        assert_eq!(text, "e.properties is already up to date.\n");
    }

    #[test]
    fn summary_lists_changes() {
        let outcome = SyncOutcome {
            added: vec![MethodKey::new("shop", "open")],
            removed: vec!["shop::Old.gone".to_string()],
            unused: vec!["shop::Stale.kept".to_string()],
            persisted: true,
            ..SyncOutcome::default()
        };

        let text = render_text(Path::new("e.properties"), &outcome);

        assert!(text.starts_with(
            "Updated e.properties: 1 placeholder(s), 0 reserved key(s) added, 1 removed.\n"
        ));
        assert!(text.contains("  + shop.open\n"));
        assert!(text.contains("  - shop::Old.gone\n"));
        assert!(text.contains("1 unused entry kept"));
        assert!(text.contains("  ? shop::Stale.kept\n"));
    }
}
