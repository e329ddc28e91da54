//! Render Cache - An embeddable in-process cache for rendered output
//!
//! Memoizes expensive, deterministic render steps keyed by string, with TTL
//! expiration and byte-bounded LRU eviction.

pub mod cache;
pub mod config;
pub mod error;
pub mod render;

pub use cache::{CacheStats, SharedCache};
pub use config::Config;
pub use error::{CacheError, Result};
pub use render::{Fragment, RenderCache};
