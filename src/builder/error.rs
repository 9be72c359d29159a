//! Build errors for the chart and transition builders.

use crate::collections::CollectionError;
use crate::core::{EventId, StateId};
use thiserror::Error;

/// Errors that can occur when building charts and transition rows.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(state) or give the row an action")]
    MissingToState,

    #[error("Transition event not specified. Call .on(event)")]
    MissingEvent,

    #[error("Chart validation failed with {} violation(s)", .violations.len())]
    InvalidChart { violations: Vec<ChartViolation> },

    #[error("Chart storage could not be allocated: {0}")]
    Storage(#[from] CollectionError),
}

/// A structural problem found while validating a chart.
///
/// Validation accumulates every violation instead of stopping at the first.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChartViolation {
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("State '{state}' names an unknown or later-registered parent {parent}")]
    UnknownParent { state: String, parent: StateId },

    #[error("State '{state}' cannot be nested under the reserved state '{parent}'")]
    ReservedParent { state: String, parent: String },

    #[error("State '{state}' is nested {depth} levels deep (max: {max})")]
    DepthExceeded {
        state: String,
        depth: usize,
        max: usize,
    },

    #[error("State name '{name}' is registered more than once")]
    DuplicateStateName { name: String },

    #[error("Transition #{row} references unknown {state}")]
    UnknownState { row: usize, state: StateId },

    #[error("Transition #{row} references unknown {event}")]
    UnknownEvent { row: usize, event: EventId },

    #[error("Transition #{row} uses the end state as source or target")]
    ReservedEndpoint { row: usize },
}
