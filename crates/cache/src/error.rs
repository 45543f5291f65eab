//! Cache-level error type.

use thiserror::Error;

/// Errors returned by a [`ViewCache`](crate::ViewCache) backend.
///
/// The in-memory backend never fails; remote backends map their transport
/// errors onto these variants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The backend could not be reached.
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected the operation.
    #[error("cache operation failed: {0}")]
    Operation(String),
}
