//! Render Cache Builder
//!
//! Cache-wide settings, fixed once the cache is built.

use std::time::Duration;

use tracing::debug;

use super::{effective_ttl, RenderCache};
use crate::cache::SharedCache;
use crate::config::{DEFAULT_MAX_MEMORY, DEFAULT_TTL};

/// Builder for [`RenderCache`].
#[derive(Debug, Clone)]
pub struct RenderCacheBuilder {
    ttl: Duration,
    max_memory: usize,
}

impl Default for RenderCacheBuilder {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            max_memory: DEFAULT_MAX_MEMORY,
        }
    }
}

impl RenderCacheBuilder {
    /// Sets the default TTL for fragments. Zero means no expiration.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = effective_ttl(ttl);
        self
    }

    /// Sets the byte budget for the whole cache. Zero means no limit.
    pub fn max_memory(mut self, max_memory: usize) -> Self {
        self.max_memory = max_memory;
        self
    }

    pub fn build(self) -> RenderCache {
        debug!(
            max_memory = self.max_memory,
            ttl_ms = self.ttl.as_millis() as u64,
            "Building render cache"
        );

        RenderCache {
            store: SharedCache::new(self.max_memory),
            ttl: self.ttl,
        }
    }
}
