use anyhow::Error;

pub(crate) fn format(err: &Error) -> String {
    let mut out = format!("Error: {err:#}");
    let hints = suggestions(err);
    if !hints.is_empty() {
        out.push_str("\n\nHints:\n");
        for hint in hints {
            out.push_str("- ");
            out.push_str(&hint);
            out.push('\n');
        }
    }
    out
}

fn suggestions(err: &Error) -> Vec<String> {
    let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
    let haystack = chain.join(" | ").to_ascii_lowercase();
    let mut out: Vec<String> = Vec::new();

    if haystack.contains("catalog file not found") {
        push_hint(
            &mut out,
            "Create the catalog with `excat generate`, or point at it with `--catalog <file>`.",
        );
    }

    if haystack.contains("not a directory")
        || haystack.contains("no such file or directory")
        || haystack.contains("cannot find the path")
    {
        push_hint(&mut out, "Verify the input path exists and is readable.");
        push_hint(
            &mut out,
            "Use an absolute path to avoid working-directory confusion.",
        );
    }

    if haystack.contains("out of sync") {
        push_hint(
            &mut out,
            "Run `excat generate` to add placeholders for missing methods.",
        );
        push_hint(
            &mut out,
            "Add `--prune` (or `[sync] prune = \"remove\"`) to delete unused entries.",
        );
    }

    if haystack.contains("failed to persist") || haystack.contains("permission denied") {
        push_hint(
            &mut out,
            "Check that the catalog file and its directory are writable.",
        );
    }

    if haystack.contains("already exists") {
        push_hint(
            &mut out,
            "Pass `--force` to overwrite it, or `--print` to see the template.",
        );
    }

    if haystack.contains("toml") && (haystack.contains("parse") || haystack.contains("invalid")) {
        push_hint(
            &mut out,
            "Check `excat.toml` syntax and key names, or regenerate with `excat init --force`.",
        );
    }

    out
}

fn push_hint(out: &mut Vec<String>, hint: &str) {
    if !out.iter().any(|h| h == hint) {
        out.push(hint.to_string());
    }
}
