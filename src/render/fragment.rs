//! Cached Fragment
//!
//! One keyed unit of rendered output.

use std::io::Write;
use std::time::Duration;

use bytes::Bytes;
use tracing::debug;

use super::{effective_ttl, RenderCache};
use crate::error::Result;

// == Fragment ==
/// A key plus TTL bound to a [`RenderCache`].
///
/// The key should uniquely identify the rendered content, so derive it from
/// whatever parameters the render step depends on.
#[derive(Debug, Clone)]
pub struct Fragment<'a> {
    cache: &'a RenderCache,
    key: String,
    ttl: Duration,
}

impl<'a> Fragment<'a> {
    pub(super) fn new(cache: &'a RenderCache, key: String, ttl: Duration) -> Self {
        Self { cache, key, ttl }
    }

    /// Overrides the TTL for this fragment only. Zero means no expiration.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = effective_ttl(ttl);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    // == Render Bytes ==
    /// Returns the cached output, or runs `render` into a fresh buffer and
    /// caches the result.
    ///
    /// A failing render step caches nothing and its error is returned.
    pub fn render_bytes<F>(&self, render: F) -> Result<Bytes>
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let store = self.cache.store();

        if let Some(cached) = store.get(&self.key) {
            return Ok(cached);
        }

        debug!(key = %self.key, "Cache miss, rendering");

        let mut buf = Vec::new();
        render(&mut buf)?;

        let output = Bytes::from(buf);
        store.put(self.key.as_str(), output.clone(), self.ttl);
        Ok(output)
    }

    // == Render ==
    /// Writes the fragment to `out`, rendering and caching it on a miss.
    pub fn render<W, F>(&self, out: &mut W, render: F) -> Result<()>
    where
        W: Write + ?Sized,
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let output = self.render_bytes(render)?;
        out.write_all(&output)?;
        Ok(())
    }
}
