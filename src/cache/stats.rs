//! Cache Statistics Module
//!
//! Point-in-time view of occupancy plus read/hit counters.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache occupancy and activity.
///
/// Occupancy figures describe physical residency: entries that have expired
/// but not yet been reclaimed are still counted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Configured capacity in bytes (`usize::MAX` when unbounded)
    pub capacity: usize,
    /// Bytes charged by resident entries
    pub used_memory: usize,
    /// Number of resident entries
    pub items: usize,
    /// Lookups made while the cache was enabled
    pub reads: u64,
    /// Lookups that returned a live entry
    pub hits: u64,
    /// Entries dropped to bring the cache back within capacity
    pub evictions: u64,
    /// Entries dropped because their TTL had elapsed
    pub expirations: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / reads, or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        if self.reads == 0 {
            0.0
        } else {
            self.hits as f64 / self.reads as f64
        }
    }

    /// Reads that did not return a live entry.
    pub fn misses(&self) -> u64 {
        self.reads - self.hits
    }

    pub fn record_read(&mut self) {
        self.reads += 1;
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    // == Occupancy ==
    /// Returns a copy of the counters with occupancy figures filled in.
    pub fn with_occupancy(&self, capacity: usize, used_memory: usize, items: usize) -> Self {
        Self {
            capacity,
            used_memory,
            items,
            ..self.clone()
        }
    }
}
