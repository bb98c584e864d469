//! Resolution against the live call stack.

use std::backtrace::Backtrace;
use std::error::Error;

use excat_catalog::{Catalog, SharedCatalog};
use excat_types::Frame;

use crate::resolved::{Cause, ResolvedException, resolve, resolve_wrapped};
use crate::stack::parse_stack;

/// Frames of the current thread's stack, innermost caller first.
///
/// The backtrace machinery and this crate's own frames are stripped from the
/// top. Always captures, regardless of `RUST_BACKTRACE`.
pub fn current_stack() -> Vec<Frame> {
    let text = Backtrace::force_capture().to_string();
    let mut frames = parse_stack(&text);
    let internal = frames.iter().take_while(|f| is_internal(f)).count();
    frames.drain(..internal);
    frames
}

fn is_internal(frame: &Frame) -> bool {
    const PREFIXES: [&str; 4] = ["std::backtrace", "backtrace::", "excat_resolve", "core::"];
    frame.class_name == "std"
        || PREFIXES
            .iter()
            .any(|prefix| frame.class_name.starts_with(prefix))
}

/// Resolve the caller's stack against `catalog`.
pub fn capture(catalog: &Catalog) -> ResolvedException {
    resolve(&current_stack(), catalog)
}

/// Resolve the caller's stack against `catalog`, wrapping `error`.
pub fn capture_wrapped<E>(catalog: &Catalog, error: E) -> ResolvedException
where
    E: Error + Send + Sync + 'static,
{
    resolve_wrapped(&current_stack(), catalog, Cause::of(error))
}

/// Raise at the call site, using the process-wide catalog.
///
/// The catalog is [`SharedCatalog::global`], so edits to the file on disk
/// apply to the next call without a restart.
pub fn raise() -> ResolvedException {
    capture(&SharedCatalog::global().snapshot())
}

/// Wrap a caught error at the call site, using the process-wide catalog.
pub fn wrap<E>(error: E) -> ResolvedException
where
    E: Error + Send + Sync + 'static,
{
    capture_wrapped(&SharedCatalog::global().snapshot(), error)
}
