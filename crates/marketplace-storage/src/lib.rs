//! Key-Value persistence layer for the GoMarketplace cart.
//!
//! Provides a small async storage abstraction modelled on the device storage
//! a mobile app gets (string keys, string values), plus a typed wrapper with
//! automatic JSON serialization.
//!
//! # Example
//!
//! ```rust,ignore
//! use marketplace_storage::{cache_key, Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//! let key = cache_key!("@Gomarketplace", "cart");
//!
//! cache.set(&key, &vec!["a", "b"]).await?;
//! let items: Option<Vec<String>> = cache.get(&key).await?;
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::StorageError;
pub use file::FileStore;
pub use kv::{Cache, KeyValueStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, FileStore, KeyValueStore, MemoryStore, StorageError};
}
