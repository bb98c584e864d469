use anyhow::{Context, Result};
use excat_config as cli;
use excat_types::ScanResult;

use crate::config::ResolvedConfig;

pub(crate) fn handle(args: cli::CliScanCommand, resolved: &ResolvedConfig) -> Result<()> {
    let root = resolved.scan_root(&args.scan);
    let opts = resolved.scan_options(&args.scan);
    let result = excat_scan::scan(&root, &opts)
        .with_context(|| format!("Failed to scan {}", root.display()))?;

    match args.format {
        cli::OutputFormat::Text => {
            print!("{}", render_text(&result));
            eprintln!(
                "{} method(s) in {} class(es)",
                result.len(),
                result.class_count()
            );
        }
        cli::OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(())
}

/// One class per line, its methods indented below it in discovery order.
fn render_text(result: &ScanResult) -> String {
    let mut out = String::new();
    for (class, keys) in &result.classes {
        out.push_str(class);
        out.push('\n');
        for key in keys {
            out.push_str("  .");
            out.push_str(key.method_name());
            out.push('\n');
        }
    }
    for file in &result.skipped {
        out.push_str(&format!("# skipped {file}\n"));
    }
    out
}
