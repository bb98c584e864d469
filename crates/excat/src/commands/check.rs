use std::path::Path;

use anyhow::{Context, Result, bail};
use excat_catalog::Catalog;
use excat_config as cli;
use excat_types::SyncReport;
use serde::Serialize;

use crate::config::ResolvedConfig;

#[derive(Serialize)]
struct CheckReceipt<'a> {
    catalog: String,
    #[serde(flatten)]
    report: &'a SyncReport,
    missing_reserved: &'a [&'static str],
}

pub(crate) fn handle(args: cli::CheckArgs, resolved: &ResolvedConfig) -> Result<()> {
    let root = resolved.scan_root(&args.scan);
    let opts = resolved.scan_options(&args.scan);
    let path = resolved.catalog_path(args.catalog.as_deref());

    let catalog = Catalog::open(&path)?;
    let scan = excat_scan::scan(&root, &opts)
        .with_context(|| format!("Failed to scan {}", root.display()))?;
    let report = excat_sync::report(&catalog, &scan);
    let missing_reserved = excat_sync::missing_reserved(&catalog);

    match args.format {
        cli::OutputFormat::Text => print!("{}", render_text(&path, &report, &missing_reserved)),
        cli::OutputFormat::Json => {
            let receipt = CheckReceipt {
                catalog: path.display().to_string(),
                report: &report,
                missing_reserved: &missing_reserved,
            };
            println!("{}", serde_json::to_string_pretty(&receipt)?);
        }
    }

    if args.strict && !report.is_clean() {
        bail!(
            "Catalog is out of sync: {} missing, {} unused",
            report.missing.len(),
            report.unused.len()
        );
    }
    Ok(())
}

fn render_text(path: &Path, report: &SyncReport, missing_reserved: &[&str]) -> String {
    let mut out = String::new();
    if report.is_clean() {
        out.push_str(&format!("{} is in sync with the code.\n", path.display()));
    }
    if !report.missing.is_empty() {
        out.push_str(&format!("Missing ({}):\n", report.missing.len()));
        for key in &report.missing {
            out.push_str(&format!("  {key}\n"));
        }
    }
    if !report.unused.is_empty() {
        out.push_str(&format!("Unused ({}):\n", report.unused.len()));
        for (key, message) in &report.unused {
            out.push_str(&format!("  {key} = {message}\n"));
        }
    }
    if !missing_reserved.is_empty() {
        out.push_str(&format!(
            "Reserved keys not set: {}\n",
            missing_reserved.join(", ")
        ));
    }
    out
}
