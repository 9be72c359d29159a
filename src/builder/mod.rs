//! Builder API for chart construction.
//!
//! This module provides fluent builders and macros for registering states,
//! events and transition rows, and validates the result before it can drive
//! a machine.

pub mod error;
pub mod machine;
pub mod macros;
pub mod state;
pub mod transition;
mod validation;

pub use error::{BuildError, ChartViolation};
pub use machine::StateMachineBuilder;
pub use state::StateSpec;
pub use transition::TransitionBuilder;

use crate::core::{EventId, Guard, StateId, TransitionRow};

/// Create an unconditional row without an action.
///
/// # Example
///
/// ```
/// use hfsm::builder::{simple_transition, StateMachineBuilder};
///
/// let mut builder = StateMachineBuilder::<()>::new();
/// let idle = builder.state("idle");
/// let busy = builder.state("busy");
/// let work = builder.event("work");
///
/// builder.add_transition(simple_transition(idle, work, busy));
/// ```
pub fn simple_transition<D>(from: StateId, event: EventId, to: StateId) -> TransitionRow<D> {
    TransitionRow {
        from,
        event,
        guard: None,
        action: None,
        to: Some(to),
    }
}

/// Create a row that only fires when `guard` passes.
pub fn guarded_transition<D>(
    from: StateId,
    event: EventId,
    guard: Guard<D>,
    to: StateId,
) -> TransitionRow<D> {
    TransitionRow {
        from,
        event,
        guard: Some(guard),
        action: None,
        to: Some(to),
    }
}
