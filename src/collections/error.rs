//! Collection error types.

use thiserror::Error;

/// Errors reported by the pooled collections.
///
/// All of them are locally recoverable: the container is left unchanged
/// when an operation fails.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CollectionError {
    /// A zero capacity, zero-sized payload, out of range index or stale handle
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Every slot of the pool is in use
    #[error("Pool exhausted (capacity: {capacity})")]
    OutOfMemory { capacity: usize },

    /// No element matched the requested key
    #[error("Element not found")]
    NotFound,

    /// Pop or dequeue on an empty container
    #[error("Container is empty")]
    Empty,
}
