//! Machine error types.

use crate::collections::CollectionError;
use thiserror::Error;

/// Errors reported by machine lifecycle calls.
///
/// Unhandled events and failed guards are normal outcomes and never show up
/// here.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Machine has already been terminated")]
    Terminated,

    #[error("Machine is running a callback and cannot be re-entered")]
    Busy,

    #[error("Machine storage error: {0}")]
    Collection(#[from] CollectionError),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
