//! Guard conditions for controlling state transitions.
//!
//! Guards are boolean predicates evaluated against a read-only view of the
//! machine. A row whose guard fails does not fire, but still consumes the
//! event at that level of the hierarchy.

use crate::engine::Machine;
use std::fmt;
use std::sync::Arc;

/// Named predicate that determines if a transition row can fire.
///
/// # Example
///
/// ```rust
/// use hfsm::builder::StateMachineBuilder;
/// use hfsm::core::{Guard, StateId};
/// use hfsm::engine::Machine;
///
/// let mut builder = StateMachineBuilder::<()>::new();
/// let idle = builder.state("idle");
/// let mut machine = Machine::init(builder.initial(idle).build().unwrap()).unwrap();
///
/// let in_idle = Guard::new("in_idle", move |m: &Machine<()>| m.current_state() == idle);
/// assert!(in_idle.check(&machine));
///
/// machine.terminate().unwrap();
/// assert!(!in_idle.check(&machine));
/// assert_eq!(machine.current_state(), StateId::END);
/// ```
pub struct Guard<D> {
    name: String,
    predicate: Arc<dyn Fn(&Machine<D>) -> bool + Send + Sync>,
}

impl<D> Guard<D> {
    /// Create a guard from a predicate.
    ///
    /// The predicate should be deterministic for a given machine position;
    /// it may read state data but cannot mutate the machine.
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Machine<D>) -> bool + Send + Sync + 'static,
    {
        Guard {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the guard.
    pub fn check(&self, machine: &Machine<D>) -> bool {
        (self.predicate)(machine)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<D> Clone for Guard<D> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<D> fmt::Debug for Guard<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Guard").field(&self.name).finish()
    }
}
