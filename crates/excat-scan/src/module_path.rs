//! Source path -> module path derivation.

/// Compute the module path of a source file relative to `src/`.
///
/// Rules:
/// - `lib.rs` / `main.rs` at the top are the crate root.
/// - `foo/mod.rs` and `foo.rs` are both module `foo`.
/// - `bin/<name>.rs` and `bin/<name>/main.rs` are the root of crate `<name>`.
#[must_use]
pub fn module_path(crate_name: &str, rel: &str) -> String {
    let mut p = rel.replace('\\', "/");
    if let Some(stripped) = p.strip_prefix("./") {
        p = stripped.to_string();
    }
    let p = p.trim_start_matches('/');
    let p = p.strip_suffix(".rs").unwrap_or(p);

    let mut segs: Vec<&str> = p.split('/').filter(|s| !s.is_empty() && *s != ".").collect();

    let mut root = crate_name.to_string();
    if segs.len() >= 2 && segs[0] == "bin" {
        root = segs[1].replace('-', "_");
        segs.drain(..2);
    }

    if matches!(segs.as_slice(), ["lib"] | ["main"]) {
        segs.clear();
    }
    if segs.last() == Some(&"mod") {
        segs.pop();
    }

    let mut path = root;
    for seg in segs {
        path.push_str("::");
        path.push_str(seg);
    }
    path
}
