//! Typed local key-value storage for the Apex storefront.
//!
//! Stands in for browser `localStorage`: string keys, JSON values, and
//! synchronous writes. Two backends ship with the crate: an in-memory map
//! for tests and ephemeral sessions, and a directory of JSON files for the
//! CLI.
//!
//! # Example
//!
//! ```rust,ignore
//! use apex_cache::Cache;
//!
//! let cache = Cache::open(".apex")?;
//!
//! // Store a value
//! cache.set("apex-cart", &items)?;
//!
//! // Retrieve a value
//! let items: Option<Vec<LineItem>> = cache.get("apex-cart")?;
//!
//! // Delete a value
//! cache.delete("tradeUser")?;
//! ```

mod error;
mod kv;

pub use error::CacheError;
pub use kv::{Backend, Cache, FileBackend, MemoryBackend};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Backend, Cache, CacheError};
}
