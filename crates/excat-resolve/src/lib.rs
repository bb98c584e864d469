//! # excat-resolve
//!
//! **Tier 2 (Resolution)**
//!
//! Picks the catalog message for an error from the call stack it was raised
//! on. Frames are walked innermost first; the first frame whose
//! `Class.method` key has a catalog entry wins, otherwise the catalog's
//! `defaultMessage` is used.
//!
//! ## What belongs here
//! * The resolution walk and [`ResolvedException`] rendering
//! * Stack capture and backtrace text parsing
//!
//! ## What does NOT belong here
//! * Catalog loading or caching (use excat-catalog)
//! * Catalog maintenance (use excat-sync)
//!
//! ## Example
//! ```ignore
//! fn checkout(cart: &Cart) -> Result<(), excat_resolve::ResolvedException> {
//!     cart.charge().map_err(excat_resolve::wrap)?;
//!     Ok(())
//! }
//! ```

mod capture;
mod resolved;
mod stack;

pub use capture::{capture, capture_wrapped, current_stack, raise, wrap};
pub use resolved::{Cause, ResolvedException, resolve, resolve_wrapped};
pub use stack::{frame_from_symbol, parse_stack};
