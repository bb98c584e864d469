//! Stack trace text -> frames.
//!
//! Two layouts are understood:
//!
//! ```text
//!    2: shop::orders::Cart::checkout
//!              at ./src/orders.rs:12:9
//! ```
//!
//! as printed by `std::backtrace::Backtrace`, and JVM-style lines:
//!
//! ```text
//!     at com.shop.Cart.checkout(Cart.java:42)
//! ```

use excat_types::Frame;

/// Parse backtrace text into frames, innermost first.
///
/// Symbols without a path (`main`, `__libc_start_main`) cannot name a catalog
/// key and are dropped. For JVM traces only the outermost exception is read;
/// parsing stops at the first `Caused by:`.
pub fn parse_stack(text: &str) -> Vec<Frame> {
    let mut frames: Vec<Frame> = Vec::new();
    // Whether the location line that follows belongs to the last pushed frame.
    let mut open = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("Caused by:") {
            break;
        }

        if let Some(rest) = trimmed.strip_prefix("at ") {
            if let Some(frame) = parse_jvm(rest) {
                frames.push(frame);
                open = false;
            } else if open {
                if let Some(last) = frames.last_mut() {
                    last.line = parse_location_line(rest);
                }
                open = false;
            }
            continue;
        }

        open = false;
        if let Some(symbol) = strip_frame_index(trimmed)
            && let Some(frame) = frame_from_symbol(symbol, None)
        {
            frames.push(frame);
            open = true;
        }
    }

    frames
}

/// Turn a demangled Rust symbol into a frame.
///
/// * `shop::orders::Cart::checkout` -> `shop::orders::Cart` / `checkout`
/// * `<shop::Cart as core::fmt::Display>::fmt` -> `shop::Cart` / `fmt`
/// * `shop::Repo<T>::save` -> `shop::Repo` / `save`
/// * `shop::run::{{closure}}` -> `shop` / `run`
/// * a trailing `::h0123456789abcdef` hash is ignored
pub fn frame_from_symbol(symbol: &str, line: Option<u32>) -> Option<Frame> {
    let mut segments = split_path(symbol.trim());

    if segments.last().is_some_and(|s| is_hash(s)) {
        segments.pop();
    }
    // closures and turbofish arguments belong to the enclosing fn
    while segments
        .last()
        .is_some_and(|s| s.starts_with("{{") || s.starts_with('<'))
    {
        segments.pop();
    }

    let method = segments.pop()?;
    if segments.is_empty() || method.is_empty() {
        return None;
    }

    let class = segments
        .iter()
        .map(|s| normalize_segment(s))
        .collect::<Vec<_>>()
        .join("::");
    Some(Frame::new(class, strip_generics(&method), line))
}

/// `"  12: sym"` -> `"sym"`.
fn strip_frame_index(line: &str) -> Option<&str> {
    let (index, rest) = line.split_once(':')?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let rest = rest.trim();
    (!rest.is_empty()).then_some(rest)
}

/// `pkg.Cls.method(File.java:42)`.
fn parse_jvm(rest: &str) -> Option<Frame> {
    let rest = rest.strip_suffix(')')?;
    let (qualified, location) = rest.split_once('(')?;
    let (class, method) = qualified.rsplit_once('.')?;
    if class.is_empty() || method.is_empty() || qualified.contains("::") {
        return None;
    }
    let line = location
        .rsplit_once(':')
        .and_then(|(_, n)| n.trim().parse().ok());
    Some(Frame::new(class, method, line))
}

/// `./src/orders.rs:12:9` -> `12`; `lib.rs:7` -> `7`.
fn parse_location_line(location: &str) -> Option<u32> {
    let mut parts = location.rsplit(':');
    let last = parts.next()?;
    if let Some(Ok(line)) = parts.next().map(str::parse::<u32>)
        && last.parse::<u32>().is_ok()
    {
        return Some(line);
    }
    last.parse().ok()
}

/// Split on `::` at angle-bracket depth zero.
fn split_path(symbol: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut chars = symbol.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '<' => {
                depth += 1;
                current.push(c);
            }
            '>' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ':' if depth == 0 && chars.peek() == Some(&':') => {
                chars.next();
                segments.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    segments.push(current);
    segments
}

/// `<shop::Cart as Trait>` -> `shop::Cart`, `Repo<T>` -> `Repo`.
fn normalize_segment(segment: &str) -> String {
    if let Some(inner) = segment.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        let self_ty = inner.split(" as ").next().unwrap_or(inner).trim();
        let self_ty = self_ty.trim_start_matches('&').trim_start_matches("mut ");
        return split_path(self_ty)
            .iter()
            .map(|s| strip_generics(s))
            .collect::<Vec<_>>()
            .join("::");
    }
    strip_generics(segment)
}

fn strip_generics(segment: &str) -> String {
    match segment.find('<') {
        Some(0) | None => segment.to_string(),
        Some(i) => segment[..i].to_string(),
    }
}

/// rustc's legacy symbol hash: `h` followed by 16 hex digits.
fn is_hash(segment: &str) -> bool {
    segment.len() == 17
        && segment.starts_with('h')
        && segment[1..].bytes().all(|b| b.is_ascii_hexdigit())
}
