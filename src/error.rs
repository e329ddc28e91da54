//! Error types for the render cache
//!
//! The store itself is infallible; errors only arise around it, while
//! producing content on a miss or writing it to the caller's sink.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cached rendering.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The render step failed; nothing was cached
    #[error("Render failed: {0}")]
    Render(String),

    /// Writing to the output sink failed
    #[error("Output write failed: {0}")]
    Io(#[from] std::io::Error),
}

impl CacheError {
    /// Convenience constructor for render failures.
    pub fn render(msg: impl Into<String>) -> Self {
        CacheError::Render(msg.into())
    }
}

// == Result Type Alias ==
/// Convenience Result type for cached rendering.
pub type Result<T> = std::result::Result<T, CacheError>;
