//! Durable key-value storage backing the DJIA cache.
//!
//! The store is a plain string-to-string map. Domain concerns (key prefixes,
//! capacity, eviction order) live in [`crate::djia::DjiaCache`]; a store only
//! has to remember what it was given and survive a restart when asked to
//! [`save`](CacheStore::save).
//!
//! Two backends are provided:
//!
//! - [`MemoryStore`]: ephemeral, used in tests and for one-shot lookups
//! - [`FileStore`]: JSON file written atomically through a temporary file

mod file;
mod memory;
mod traits;

pub use file::{default_store_path, FileStore};
pub use memory::MemoryStore;
pub use traits::{CacheStore, StoreError};
