//! Cache Module
//!
//! Provides a byte-bounded in-memory cache with TTL expiration and LRU eviction.

mod entry;
mod lru;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::{CacheEntry, ENTRY_OVERHEAD};
pub use lru::LruList;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::{CacheStore, Reclaimed};
