//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with a monotonic expiration deadline.

use std::time::{Duration, Instant};

use bytes::Bytes;

// == Constants ==
/// Fixed bookkeeping cost charged to every entry, modeling the expiration timestamp.
pub const ENTRY_OVERHEAD: usize = 24;

/// Distance of the "nothing expires before this" sentinel from the current time.
pub(crate) const WATERMARK_HORIZON: Duration = Duration::from_secs(24 * 60 * 60);

// == Cache Entry ==
/// Represents a single cached render output with its expiration deadline.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The lookup key
    pub key: String,
    /// The cached payload
    pub value: Bytes,
    /// Instant at which the entry becomes stale
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry that expires `ttl` from now.
    ///
    /// # Arguments
    /// * `key` - The lookup key
    /// * `value` - The payload to store
    /// * `ttl` - Time until the entry becomes stale
    pub fn new(key: String, value: Bytes, ttl: Duration) -> Self {
        Self::with_expiration(key, value, deadline(Instant::now(), ttl))
    }

    /// Creates a new cache entry with an absolute expiration instant.
    pub fn with_expiration(key: String, value: Bytes, expires_at: Instant) -> Self {
        Self {
            key,
            value,
            expires_at,
        }
    }

    // == Size ==
    /// Returns the number of bytes charged against the store's capacity.
    pub fn size(&self) -> usize {
        self.key.len() + self.value.len() + ENTRY_OVERHEAD
    }

    // == Is Expired ==
    /// Checks expiry against a caller-supplied instant.
    ///
    /// An entry is expired once `now` reaches its deadline, so an entry whose
    /// deadline equals `now` is already stale.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

// == Utility Functions ==
/// Computes `now + ttl`, clamped to the latest instant the platform clock
/// can represent.
///
/// The step is halved until the addition fits, so an oversized TTL still
/// lands far in the future instead of wrapping or failing.
pub fn deadline(now: Instant, ttl: Duration) -> Instant {
    let mut step = ttl;
    loop {
        if let Some(at) = now.checked_add(step) {
            return at;
        }
        step /= 2;
    }
}

/// Returns the watermark sentinel relative to `now`.
pub(crate) fn far_future(now: Instant) -> Instant {
    now + WATERMARK_HORIZON
}
