//! Render Module
//!
//! Memoizes expensive render steps on top of a [`SharedCache`].
//!
//! ```
//! use render_cache::RenderCache;
//! use std::io::Write;
//! use std::time::Duration;
//!
//! let cache = RenderCache::builder()
//!     .max_memory(512 * 1024)
//!     .ttl(Duration::from_secs(300))
//!     .build();
//!
//! let mut page = Vec::new();
//! cache
//!     .fragment("menu")
//!     .render(&mut page, |buf| {
//!         write!(buf, "<nav>...</nav>")?;
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! // A shorter lifetime for one fragment
//! cache
//!     .fragment("stock-quote")
//!     .ttl(Duration::from_secs(30))
//!     .render(&mut page, |buf| {
//!         buf.extend_from_slice(b"ACME 42.00");
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! assert_eq!(cache.stats().items, 2);
//! ```

mod builder;
mod fragment;

use std::time::Duration;

pub use builder::RenderCacheBuilder;
pub use fragment::Fragment;

use crate::cache::{CacheStats, SharedCache};
use crate::config::Config;

/// Lifetime used when a TTL of zero asks for entries that never expire.
pub const NEVER_EXPIRE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Maps a zero TTL to [`NEVER_EXPIRE`].
pub(crate) fn effective_ttl(ttl: Duration) -> Duration {
    if ttl.is_zero() {
        NEVER_EXPIRE
    } else {
        ttl
    }
}

// == Render Cache ==
/// A configured cache for rendered output.
///
/// Cloning is cheap and every clone shares the same underlying store.
/// Independent instances share nothing and may use different settings.
#[derive(Debug, Clone)]
pub struct RenderCache {
    store: SharedCache,
    ttl: Duration,
}

impl RenderCache {
    /// Creates a cache with the default size (64 KiB) and TTL (one minute).
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> RenderCacheBuilder {
        RenderCacheBuilder::default()
    }

    /// Creates a cache sized and timed from the configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::builder()
            .max_memory(config.max_memory)
            .ttl(config.default_ttl)
            .build()
    }

    // == Fragment ==
    /// Returns a handle for one cached fragment, using the cache's default TTL.
    pub fn fragment(&self, key: impl Into<String>) -> Fragment<'_> {
        Fragment::new(self, key.into(), self.ttl)
    }

    /// TTL applied to fragments that do not override it.
    pub fn default_ttl(&self) -> Duration {
        self.ttl
    }

    // == Control ==
    /// Returns basic cache statistics. These are cleared by [`reset`](Self::reset).
    pub fn stats(&self) -> CacheStats {
        self.store.stats()
    }

    /// Removes/invalidates the cached output for `key`, if it exists.
    pub fn remove(&self, key: &str) {
        self.store.remove(key);
    }

    /// Erases the cache and resets statistics.
    pub fn reset(&self) {
        self.store.reset();
    }

    /// Turns caching off (or back on). Turning it off also wipes the cache.
    pub fn disable(&self, disable: bool) {
        self.store.set_enabled(!disable);
    }

    /// The underlying store.
    pub fn store(&self) -> &SharedCache {
        &self.store
    }
}

impl Default for RenderCache {
    fn default() -> Self {
        Self::new()
    }
}
