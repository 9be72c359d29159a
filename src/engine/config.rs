//! Machine configuration.

use crate::engine::error::MachineError;
use serde::{Deserialize, Serialize};

/// Default bound on state nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Default bound on consecutive null transitions per dispatch.
pub const DEFAULT_NULL_CHAIN_LIMIT: usize = 16;

/// Limits and options fixed when a chart is built.
///
/// Missing fields take their defaults when deserialized.
///
/// # Example
///
/// ```rust
/// use hfsm::engine::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{ "trace_capacity": 32 }"#).unwrap();
/// assert_eq!(config.max_depth, 5);
/// assert_eq!(config.trace_capacity, 32);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Deepest allowed parent chain, the state itself included. Also the
    /// capacity of each ancestor scratch stack.
    pub max_depth: usize,

    /// Null transitions allowed to fire back to back before the chain is cut.
    pub null_chain_limit: usize,

    /// Number of state changes kept in the transition trace; 0 disables it.
    pub trace_capacity: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            null_chain_limit: DEFAULT_NULL_CHAIN_LIMIT,
            trace_capacity: 0,
        }
    }
}

impl MachineConfig {
    pub fn from_json(json: &str) -> Result<Self, MachineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_trace(mut self, capacity: usize) -> Self {
        self.trace_capacity = capacity;
        self
    }
}
