//! # excat-catalog
//!
//! **Tier 1 (Storage)**
//!
//! The message catalog: a key -> message mapping persisted as a properties
//! file, plus typed access to the reserved `DEBUG`, `defaultMessage` and
//! `line` keys.
//!
//! ## What belongs here
//! * Loading, editing and persisting a catalog file
//! * The process-wide [`SharedCatalog`] cache used at resolution time
//!
//! ## What does NOT belong here
//! * Diffing a catalog against scanned code (use excat-sync)
//! * Stack walking (use excat-resolve)
//!
//! ## Example
//! ```ignore
//! use excat_catalog::Catalog;
//!
//! let mut catalog = Catalog::open("exceptions.properties")?;
//! catalog.set("shop::Cart.checkout", "Checkout failed");
//! catalog.persist()?;
//! ```

mod catalog;
mod error;
mod shared;

pub use catalog::Catalog;
pub use error::CatalogError;
pub use shared::SharedCatalog;

/// File name used when no catalog path is configured.
pub const DEFAULT_CATALOG_FILE: &str = "exceptions.properties";

/// Environment variable naming the catalog used by [`SharedCatalog::global`].
pub const CATALOG_ENV: &str = "EXCAT_CATALOG";
