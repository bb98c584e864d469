//! # excat-props
//!
//! **Tier 1 (Format)**
//!
//! Reader and writer for the flat key/value text format message catalogs are
//! stored in. The syntax is the classic properties layout:
//!
//! * `key=value` or `key value` (the first unescaped `=` or whitespace ends the key)
//! * `#` and `!` start comment lines
//! * a trailing odd backslash continues the entry on the next line
//! * `\t \n \r \f \\ \uXXXX` escapes; any other escaped char stands for itself
//!
//! Unlike Java properties, `:` is an ordinary key character so Rust paths such
//! as `shop::orders::Cart.checkout` need no escaping.
//!
//! Comments, blank lines and untouched entries are rendered back byte for
//! byte; entries created or changed through [`PropsDocument::set`] are
//! re-serialized and new ones are appended at the end.

use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    /// Blank line or comment.
    Verbatim(String),
    Entry {
        key: String,
        value: String,
        /// Original physical text; `None` once the value was changed.
        raw: Option<String>,
    },
}

/// A parsed catalog file that remembers its layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropsDocument {
    lines: Vec<Line>,
    /// Key -> index of its last (effective) occurrence in `lines`.
    index: HashMap<String, usize>,
}

impl PropsDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse catalog text. Never fails: malformed escapes are kept literally.
    pub fn parse(text: &str) -> Self {
        let mut doc = Self::new();
        let mut physical = text.lines();

        while let Some(first) = physical.next() {
            let trimmed = first.trim_start_matches(is_blank);
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                doc.lines.push(Line::Verbatim(first.to_string()));
                continue;
            }

            let mut raw = first.to_string();
            let mut logical = trimmed.to_string();
            while continues(&logical) {
                logical.pop();
                let Some(next) = physical.next() else {
                    break;
                };
                raw.push('\n');
                raw.push_str(next);
                logical.push_str(next.trim_start_matches(is_blank));
            }

            let (key, value) = split_entry(&logical);
            doc.push_entry(key, value, Some(raw));
        }

        doc
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        let idx = *self.index.get(key)?;
        match &self.lines[idx] {
            Line::Entry { value, .. } => Some(value.as_str()),
            Line::Verbatim(_) => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Insert or update `key`. Returns `true` if the document changed.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        if let Some(&idx) = self.index.get(key) {
            if let Line::Entry {
                value: current, raw, ..
            } = &mut self.lines[idx]
            {
                if current == value {
                    return false;
                }
                *current = value.to_string();
                *raw = None;
                return true;
            }
        }
        self.push_entry(key.to_string(), value.to_string(), None);
        true
    }

    /// Remove every occurrence of `key`, returning its effective value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let value = self.get(key)?.to_string();
        self.lines
            .retain(|line| !matches!(line, Line::Entry { key: k, .. } if k == key));
        self.reindex();
        Some(value)
    }

    /// Effective keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries().map(|(k, _)| k)
    }

    /// Effective `(key, value)` pairs in document order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lines
            .iter()
            .enumerate()
            .filter_map(|(i, line)| match line {
                Line::Entry { key, value, .. } if self.index.get(key) == Some(&i) => {
                    Some((key.as_str(), value.as_str()))
                }
                _ => None,
            })
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Serialize back to text, one line per entry, `\n` terminated.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            match line {
                Line::Verbatim(text) => out.push_str(text),
                Line::Entry { raw: Some(raw), .. } => out.push_str(raw),
                Line::Entry {
                    key,
                    value,
                    raw: None,
                } => {
                    out.push_str(&escape_key(key));
                    out.push('=');
                    out.push_str(&escape_value(value));
                }
            }
            out.push('\n');
        }
        out
    }

    fn push_entry(&mut self, key: String, value: String, raw: Option<String>) {
        self.index.insert(key.clone(), self.lines.len());
        self.lines.push(Line::Entry { key, value, raw });
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (i, line) in self.lines.iter().enumerate() {
            if let Line::Entry { key, .. } = line {
                self.index.insert(key.clone(), i);
            }
        }
    }
}

impl fmt::Display for PropsDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for PropsDocument {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut doc = Self::new();
        for (k, v) in iter {
            doc.set(k.as_ref(), v.as_ref());
        }
        doc
    }
}

/// Escape a key so it parses back unchanged.
#[must_use]
pub fn escape_key(key: &str) -> String {
    escape(key, true)
}

/// Escape a value so it parses back unchanged.
#[must_use]
pub fn escape_value(value: &str) -> String {
    escape(value, false)
}

fn escape(s: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    for (i, c) in s.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{000c}' => out.push_str("\\f"),
            '=' if is_key => out.push_str("\\="),
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '#' | '!' if is_key && i == 0 => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{000c}')
}

/// An odd number of trailing backslashes continues the entry.
fn continues(logical: &str) -> bool {
    logical.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_entry(logical: &str) -> (String, String) {
    let mut escaped = false;
    let mut key_end = logical.len();
    let mut ended_on_eq = false;

    for (i, c) in logical.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' => {
                key_end = i;
                ended_on_eq = true;
                break;
            }
            c if is_blank(c) => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let mut rest = &logical[key_end..];
    if ended_on_eq {
        rest = &rest[1..];
    } else {
        rest = rest.trim_start_matches(is_blank);
        if let Some(after) = rest.strip_prefix('=') {
            rest = after;
        }
    }
    rest = rest.trim_start_matches(is_blank);

    (unescape(&logical[..key_end]), unescape(rest))
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000c}'),
            Some('u') => {
                let rest: String = chars.clone().collect();
                match decode_unicode(&rest) {
                    Some((ch, consumed)) => {
                        for _ in 0..consumed {
                            chars.next();
                        }
                        out.push(ch);
                    }
                    None => out.push('u'),
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    out
}

/// Decode the hex digits following `\u`, joining surrogate pairs
/// (`\uD83D\uDE00`). Returns the char and how many chars after the `u` it used.
fn decode_unicode(rest: &str) -> Option<(char, usize)> {
    let high = hex4(rest)?;
    if (0xD800..0xDC00).contains(&high)
        && let Some(tail) = rest.get(4..).and_then(|t| t.strip_prefix("\\u"))
        && let Some(low) = hex4(tail)
        && (0xDC00..0xE000).contains(&low)
    {
        let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        return char::from_u32(code).map(|ch| (ch, 10));
    }
    char::from_u32(high).map(|ch| (ch, 4))
}

fn hex4(s: &str) -> Option<u32> {
    let digits = s.get(..4)?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}
