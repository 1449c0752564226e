//! Errors raised while building a catalog or configuring pagination.

use thiserror::Error;

/// Startup failures. Per-interaction misses (unknown ids, exhausted pages) are
/// not errors and never surface here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("invalid catalog source: {0}")]
    InvalidSource(String),

    #[error("invalid page size {0}: must be a positive integer")]
    InvalidRange(i64),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
