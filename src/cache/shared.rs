//! Shared Cache Module
//!
//! Thread-safe handle over a [`CacheStore`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::cache::entry::deadline;
use crate::cache::{CacheStats, CacheStore};

// == Shared Cache ==
/// Cloneable, thread-safe handle to a single cache store.
///
/// Every operation, lookups included, takes one exclusive lock for its whole
/// duration since a hit reorders the recency list. Logging happens after the
/// lock is released.
#[derive(Debug, Clone)]
pub struct SharedCache {
    inner: Arc<Mutex<CacheStore>>,
}

impl SharedCache {
    /// Creates a new shared cache holding at most `capacity` bytes (`0` = unbounded).
    pub fn new(capacity: usize) -> Self {
        Self::from_store(CacheStore::new(capacity))
    }

    /// Wraps an existing store.
    pub fn from_store(store: CacheStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.inner.lock().get(key)
    }

    pub fn put(&self, key: impl Into<String>, value: impl Into<Bytes>, ttl: Duration) {
        self.put_until(key, value, deadline(Instant::now(), ttl));
    }

    pub fn put_until(&self, key: impl Into<String>, value: impl Into<Bytes>, expires_at: Instant) {
        let reclaimed = self.inner.lock().put_until(key, value, expires_at);
        if !reclaimed.is_empty() {
            debug!(
                expired = reclaimed.expired,
                evicted = reclaimed.evicted,
                "Reclaimed cache entries"
            );
        }
    }

    /// Removes/invalidates the entry for `key`, if any. Works while disabled.
    pub fn remove(&self, key: &str) -> bool {
        self.inner.lock().remove(key)
    }

    /// Erases all entries and resets statistics.
    pub fn reset(&self) {
        self.inner.lock().reset();
        info!("Cache reset");
    }

    /// Turns caching on or off. Disabling also wipes the cache.
    pub fn set_enabled(&self, enabled: bool) {
        self.inner.lock().set_enabled(enabled);
        info!(enabled, "Cache toggled");
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.lock().is_enabled()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Returns resident keys from most to least recently used.
    pub fn keys(&self) -> Vec<String> {
        self.inner.lock().keys()
    }
}
