//! Render Cache - load generator
//!
//! Hammers a single render cache from concurrent workers and reports the
//! resulting statistics.

use std::io::Write;

use anyhow::{ensure, Context};
use rand::Rng;
use serde_json::json;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use render_cache::{Config, RenderCache};

/// Entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the render cache with configured parameters
/// 4. Run the workers to completion
/// 5. Print final statistics as JSON
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "render_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_memory={}, default_ttl={}ms, workers={}, iterations={}, key_space={}",
        config.max_memory,
        config.default_ttl.as_millis(),
        config.workers,
        config.iterations,
        config.key_space
    );
    ensure!(config.key_space > 0, "KEY_SPACE must be positive");

    let cache = RenderCache::from_config(&config);

    let mut handles = Vec::with_capacity(config.workers);
    for worker in 0..config.workers {
        let cache = cache.clone();
        let iterations = config.iterations;
        let key_space = config.key_space;

        handles.push(tokio::task::spawn_blocking(move || {
            run_worker(worker, &cache, iterations, key_space)
        }));
    }

    for handle in handles {
        handle.await.context("worker panicked")??;
    }

    let stats = cache.stats();
    info!(
        "Workload complete: reads={}, hits={}, items={}",
        stats.reads, stats.hits, stats.items
    );

    let report = json!({
        "stats": stats,
        "hit_rate": stats.hit_rate(),
    });
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &report)?;
    writeln!(stdout)?;

    Ok(())
}

/// Renders `iterations` random fragments and checks every output.
fn run_worker(
    worker: usize,
    cache: &RenderCache,
    iterations: usize,
    key_space: usize,
) -> anyhow::Result<()> {
    let mut rng = rand::thread_rng();

    for _ in 0..iterations {
        let n = rng.gen_range(0..key_space);
        let expected = format!("Val {}", n);

        let output = cache.fragment(format!("Key {}", n)).render_bytes(|buf| {
            buf.extend_from_slice(expected.as_bytes());
            Ok(())
        })?;

        ensure!(
            output == expected.as_bytes(),
            "worker {} read corrupted output for key {}",
            worker,
            n
        );
    }

    Ok(())
}
