//! Configuration Module
//!
//! Handles loading cache and load-generator settings from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default byte budget for a cache: 64 KiB.
pub const DEFAULT_MAX_MEMORY: usize = 64 * 1024;

/// Default entry lifetime: one minute.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Runtime configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Cache byte budget (0 = unbounded)
    pub max_memory: usize,
    /// Default TTL for rendered fragments (zero = never expire)
    pub default_ttl: Duration,
    /// Number of concurrent load-generator workers
    pub workers: usize,
    /// Renders performed by each worker
    pub iterations: usize,
    /// Number of distinct keys the workers draw from
    pub key_space: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_MEMORY` - Cache size in bytes (default: 65536, 0 = unbounded)
    /// - `DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 60000, 0 = never expire)
    /// - `WORKERS` - Concurrent workers (default: 8)
    /// - `ITERATIONS` - Renders per worker (default: 10000)
    /// - `KEY_SPACE` - Distinct keys (default: 10000)
    ///
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_memory: env_or("MAX_MEMORY", defaults.max_memory),
            default_ttl: Duration::from_millis(env_or(
                "DEFAULT_TTL_MS",
                defaults.default_ttl.as_millis() as u64,
            )),
            workers: env_or("WORKERS", defaults.workers),
            iterations: env_or("ITERATIONS", defaults.iterations),
            key_space: env_or("KEY_SPACE", defaults.key_space),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_memory: DEFAULT_MAX_MEMORY,
            default_ttl: DEFAULT_TTL,
            workers: 8,
            iterations: 10_000,
            key_space: 10_000,
        }
    }
}
