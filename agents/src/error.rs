//! Error types for the search agents.

use thiserror::Error;

/// Raised when the remaining turn time drops below the configured threshold.
///
/// Searches return it through every recursive frame with `?`; only the
/// agents' `get_move` entry points match on it and pick a fallback move.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("search timed out")]
pub struct SearchTimeout;

/// Errors produced when loading a search configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("timer threshold {value} ms must be finite and non-negative")]
    InvalidThreshold { value: f64 },
}
