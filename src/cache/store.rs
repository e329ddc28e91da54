//! Cache Store Module
//!
//! Main cache engine combining the recency list with byte accounting and lazy TTL expiration.

use std::time::{Duration, Instant};

use bytes::Bytes;

use crate::cache::entry::{deadline, far_future};
use crate::cache::{CacheEntry, CacheStats, LruList};

// == Reclaimed ==
/// Entries dropped by a single write while making room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reclaimed {
    /// Stale entries removed by the expiration sweep
    pub expired: usize,
    /// Live entries evicted from the back of the recency list
    pub evicted: usize,
}

impl Reclaimed {
    pub fn is_empty(&self) -> bool {
        self.expired == 0 && self.evicted == 0
    }
}

// == Cache Store ==
/// Byte-bounded LRU storage with per-entry expiration.
///
/// Expiration and eviction are both lazy: a stale entry is dropped when it
/// is read, or when a write pushes the store over capacity and triggers a
/// sweep. Nothing runs in the background.
///
/// The store itself is not synchronized; see [`SharedCache`](crate::cache::SharedCache)
/// for the thread-safe handle.
#[derive(Debug)]
pub struct CacheStore {
    /// Resident entries in recency order
    entries: LruList,
    /// Activity counters
    stats: CacheStats,
    /// Maximum summed entry size in bytes
    capacity: usize,
    /// No resident entry expires before this instant
    earliest_expiration: Instant,
    /// When false, reads miss and writes are dropped
    enabled: bool,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore holding at most `capacity` bytes.
    ///
    /// # Arguments
    /// * `capacity` - Byte budget for all entries; `0` means unbounded
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: LruList::new(),
            stats: CacheStats::new(),
            capacity: if capacity == 0 { usize::MAX } else { capacity },
            earliest_expiration: far_future(Instant::now()),
            enabled: true,
        }
    }

    // == Get ==
    /// Retrieves a live value by key and marks it most recently used.
    ///
    /// A stale entry found here is removed on the spot and reported as a
    /// miss. Reads made while the store is disabled are not counted.
    pub fn get(&mut self, key: &str) -> Option<Bytes> {
        if !self.enabled {
            return None;
        }

        self.stats.record_read();

        let expired = self.entries.get(key)?.is_expired_at(Instant::now());
        if expired {
            self.entries.remove(key);
            self.stats.record_expirations(1);
            return None;
        }

        self.stats.record_hit();
        self.entries.touch(key).map(|entry| entry.value.clone())
    }

    // == Put ==
    /// Stores a value that expires `ttl` from now.
    ///
    /// See [`put_until`](Self::put_until) for the eviction rules.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<Bytes>, ttl: Duration) -> Reclaimed {
        self.put_until(key, value, deadline(Instant::now(), ttl))
    }

    /// Stores a value with an absolute expiration instant.
    ///
    /// Any existing entry for the key is replaced. If the store then exceeds
    /// its capacity, stale entries are swept first and the least recently
    /// used entries are evicted until it fits again. A single entry larger
    /// than the whole capacity is kept rather than evicted.
    pub fn put_until(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Bytes>,
        expires_at: Instant,
    ) -> Reclaimed {
        if !self.enabled {
            return Reclaimed::default();
        }

        self.entries
            .push_front(CacheEntry::with_expiration(key.into(), value.into(), expires_at));

        if expires_at < self.earliest_expiration {
            self.earliest_expiration = expires_at;
        }

        if self.entries.total_size() > self.capacity {
            self.shrink_to_capacity()
        } else {
            Reclaimed::default()
        }
    }

    fn shrink_to_capacity(&mut self) -> Reclaimed {
        let mut reclaimed = Reclaimed {
            expired: self.evict_expired(Instant::now()),
            evicted: 0,
        };

        while self.entries.total_size() > self.capacity && self.entries.len() > 1 {
            if self.entries.pop_back().is_none() {
                break;
            }
            reclaimed.evicted += 1;
        }

        self.stats.record_evictions(reclaimed.evicted);
        reclaimed
    }

    // == Evict Expired ==
    /// Removes every entry whose deadline has passed and recomputes the
    /// expiration watermark from the survivors.
    ///
    /// Skipped entirely while `now` is still before the watermark.
    fn evict_expired(&mut self, now: Instant) -> usize {
        if now < self.earliest_expiration {
            return 0;
        }

        let mut earliest = far_future(now);
        let removed = self.entries.remove_where(|entry| {
            if entry.is_expired_at(now) {
                return true;
            }
            if entry.expires_at < earliest {
                earliest = entry.expires_at;
            }
            false
        });

        self.earliest_expiration = earliest;
        self.stats.record_expirations(removed);
        removed
    }

    // == Remove ==
    /// Removes an entry by key, whether or not the store is enabled.
    ///
    /// Returns true if an entry was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Reset ==
    /// Drops every entry and zeroes the counters.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.stats = CacheStats::new();
        self.earliest_expiration = far_future(Instant::now());
    }

    // == Enable / Disable ==
    /// Turns caching on or off. Disabling wipes the store first.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.reset();
        }
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats
            .with_occupancy(self.capacity, self.entries.total_size(), self.entries.len())
    }

    // == Introspection ==
    /// Returns resident keys from most to least recently used.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn used_memory(&self) -> usize {
        self.entries.total_size()
    }

    /// Returns the current number of resident entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CacheStore {
    /// An unbounded store.
    fn default() -> Self {
        Self::new(0)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ENTRY_OVERHEAD;
    use std::thread::sleep;

    const LONG_TTL: Duration = Duration::from_secs(300);

    /// Fits exactly three entries shaped like ("A", "AAA").
    const THREE_SMALL: usize = 3 * (1 + 3 + ENTRY_OVERHEAD);

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(100);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert!(store.is_enabled());
        assert_eq!(store.capacity(), 100);
    }

    #[test]
    fn test_store_zero_capacity_is_unbounded() {
        assert_eq!(CacheStore::new(0).capacity(), usize::MAX);
        assert_eq!(CacheStore::default().capacity(), usize::MAX);
    }

    #[test]
    fn test_store_put_and_get() {
        let mut store = CacheStore::new(1024);

        store.put("key1", "value1", LONG_TTL);

        assert_eq!(store.get("key1"), Some(Bytes::from_static(b"value1")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = CacheStore::new(1024);
        assert!(store.get("nope").is_none());
        assert_eq!(store.stats().reads, 1);
        assert_eq!(store.stats().hits, 0);
    }

    #[test]
    fn test_store_memory_accounting() {
        let mut store = CacheStore::new(1024);

        store.put("key", "twelve bytes", LONG_TTL);
        assert_eq!(store.used_memory(), 3 + 12 + ENTRY_OVERHEAD);

        assert!(store.remove("key"));
        assert_eq!(store.used_memory(), 0);
    }

    #[test]
    fn test_store_remove_nonexistent() {
        let mut store = CacheStore::new(1024);
        assert!(!store.remove("nonexistent"));
    }

    #[test]
    fn test_store_overwrite_replaces_size() {
        let mut store = CacheStore::new(1024);

        store.put("key1", "a fairly long first value", LONG_TTL);
        store.put("key1", "v2", LONG_TTL);

        assert_eq!(store.get("key1"), Some(Bytes::from_static(b"v2")));
        assert_eq!(store.len(), 1);
        assert_eq!(store.used_memory(), 4 + 2 + ENTRY_OVERHEAD);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = CacheStore::new(1024);

        store.put("key1", "value1", Duration::from_millis(10));
        assert!(store.get("key1").is_some());

        sleep(Duration::from_millis(15));

        assert!(store.get("key1").is_none());
        assert!(store.is_empty(), "stale entry is dropped when read");
        assert_eq!(store.stats().expirations, 1);

        store.put("key1", "value2", LONG_TTL);
        assert_eq!(store.get("key1"), Some(Bytes::from_static(b"value2")));
    }

    #[test]
    fn test_store_put_until_absolute_deadline() {
        let mut store = CacheStore::new(1024);

        store.put_until("past", "v", Instant::now());
        assert!(store.get("past").is_none());

        store.put_until("future", "v", Instant::now() + LONG_TTL);
        assert!(store.get("future").is_some());
    }

    #[test]
    fn test_store_expired_entries_stay_resident_until_touched() {
        let mut store = CacheStore::new(1024);

        store.put("stale", "v", Duration::from_millis(5));
        store.put("live", "v", LONG_TTL);
        sleep(Duration::from_millis(10));

        // Hits on other keys and puts under capacity never sweep
        assert!(store.get("live").is_some());
        store.put("other", "v", LONG_TTL);

        assert_eq!(store.stats().items, 3);
        assert_eq!(store.stats().used_memory, 3 * (1 + ENTRY_OVERHEAD) + 5 + 4 + 5);
    }

    #[test]
    fn test_store_stale_get_drops_only_that_key() {
        let mut store = CacheStore::new(1024);

        store.put("first", "v", Duration::from_millis(5));
        store.put("second", "v", Duration::from_millis(5));
        sleep(Duration::from_millis(10));

        assert!(store.get("first").is_none());

        // The other stale entry waits for capacity pressure or its own read
        assert_eq!(store.stats().items, 1);
        assert_eq!(store.keys(), vec!["second"]);
        assert_eq!(store.stats().expirations, 1);
    }

    #[test]
    fn test_store_max_ttl_outlives_watermark_horizon() {
        let mut store = CacheStore::new(1024);

        store.put("forever", "v", Duration::MAX);

        let day_later = Instant::now() + Duration::from_secs(25 * 60 * 60);
        assert_eq!(store.evict_expired(day_later), 0);
        assert_eq!(store.keys(), vec!["forever"]);
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = CacheStore::new(THREE_SMALL);

        store.put("A", "AAA", LONG_TTL);
        store.put("B", "BBB", LONG_TTL);
        store.put("C", "CCC", LONG_TTL);
        let reclaimed = store.put("D", "DDD", LONG_TTL);

        assert_eq!(reclaimed, Reclaimed { expired: 0, evicted: 1 });
        assert_eq!(store.keys(), vec!["D", "C", "B"]);
        assert!(store.get("A").is_none());
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut store = CacheStore::new(THREE_SMALL);

        store.put("A", "AAA", LONG_TTL);
        store.put("B", "BBB", LONG_TTL);
        store.put("C", "CCC", LONG_TTL);

        // Access A to make it most recently used
        store.get("A");

        store.put("D", "DDD", LONG_TTL);

        assert_eq!(store.keys(), vec!["D", "A", "C"]);
        assert!(store.get("B").is_none());
        assert!(store.get("A").is_some());
    }

    #[test]
    fn test_store_sweep_runs_before_eviction() {
        let mut store = CacheStore::new(THREE_SMALL);

        store.put("A", "AAA", LONG_TTL);
        store.put("B", "BBB", Duration::from_millis(5));
        store.put("C", "CCC", LONG_TTL);
        sleep(Duration::from_millis(10));

        let reclaimed = store.put("D", "DDD", LONG_TTL);

        // The stale B goes instead of the least recently used A
        assert_eq!(reclaimed, Reclaimed { expired: 1, evicted: 0 });
        assert_eq!(store.keys(), vec!["D", "C", "A"]);
    }

    #[test]
    fn test_store_sweep_clears_everything_stale() {
        let mut store = CacheStore::new(100);

        for key in ["A", "B", "C", "D"] {
            store.put(key, "AAA", Duration::from_millis(20));
        }
        assert_eq!(store.len(), 3);

        sleep(Duration::from_millis(30));
        store.put("E", "EEE", Duration::from_millis(20));

        assert_eq!(store.keys(), vec!["E"]);
    }

    #[test]
    fn test_store_watermark_skips_sweep() {
        let mut store = CacheStore::new(1024);
        store.put("a", "v", LONG_TTL);

        assert_eq!(store.evict_expired(Instant::now()), 0);

        // Past every deadline: the sweep runs and recomputes the watermark
        let later = Instant::now() + LONG_TTL + Duration::from_secs(1);
        assert_eq!(store.evict_expired(later), 1);
        assert!(store.earliest_expiration > later);
    }

    #[test]
    fn test_store_watermark_tracks_survivors() {
        let mut store = CacheStore::new(1024);
        let now = Instant::now();

        store.put_until("soon", "v", now + Duration::from_millis(1));
        store.put_until("later", "v", now + Duration::from_secs(5));
        store.put_until("latest", "v", now + Duration::from_secs(10));

        assert_eq!(store.evict_expired(now + Duration::from_millis(2)), 1);
        assert_eq!(store.earliest_expiration, now + Duration::from_secs(5));
    }

    #[test]
    fn test_store_single_oversized_entry_kept() {
        let mut store = CacheStore::new(64);

        store.put("small", "v", LONG_TTL);
        let huge = "x".repeat(500);
        store.put("huge", huge.clone(), LONG_TTL);

        assert_eq!(store.keys(), vec!["huge"]);
        assert!(store.used_memory() > store.capacity());
        assert_eq!(store.get("huge"), Some(Bytes::from(huge)));
    }

    #[test]
    fn test_store_disable_wipes_and_blocks() {
        let mut store = CacheStore::new(1024);
        store.put("key", "v", LONG_TTL);

        store.set_enabled(false);
        assert!(store.is_empty());

        store.put("key", "v", LONG_TTL);
        assert!(store.get("key").is_none());
        assert!(store.is_empty());
        assert_eq!(store.stats().reads, 0, "disabled reads are not counted");

        store.set_enabled(true);
        assert!(store.get("key").is_none());
        store.put("key", "v", LONG_TTL);
        assert!(store.get("key").is_some());
    }

    #[test]
    fn test_store_remove_works_while_disabled() {
        let mut store = CacheStore::new(1024);
        store.set_enabled(false);
        assert!(!store.remove("anything"));
    }

    #[test]
    fn test_store_reset_clears_stats_and_content() {
        let mut store = CacheStore::new(1024);

        store.put("key1", "value1", LONG_TTL);
        store.get("key1");
        store.get("missing");

        store.reset();

        let stats = store.stats();
        assert_eq!(stats.used_memory, 0);
        assert_eq!(stats.items, 0);
        assert_eq!(stats.reads, 0);
        assert_eq!(stats.hits, 0);
        assert!(store.get("key1").is_none());
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new(1024);

        store.put("key1", "value1", LONG_TTL);
        store.get("key1"); // hit
        store.get("nonexistent"); // miss

        let stats = store.stats();
        assert_eq!(stats.capacity, 1024);
        assert_eq!(stats.reads, 2);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.items, 1);
        assert_eq!(stats.used_memory, 4 + 6 + ENTRY_OVERHEAD);
    }
}
