//! Builder for constructing transition rows.

use crate::builder::error::BuildError;
use crate::core::{Action, EventId, Guard, StateId, TransitionRow};
use crate::engine::Machine;

/// Builder for constructing transition rows with a fluent API.
pub struct TransitionBuilder<D> {
    from: Option<StateId>,
    event: Option<EventId>,
    to: Option<StateId>,
    guard: Option<Guard<D>>,
    action: Option<Action<D>>,
}

impl<D> TransitionBuilder<D> {
    pub fn new() -> Self {
        Self {
            from: None,
            event: None,
            to: None,
            guard: None,
            action: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: StateId) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the triggering event (required).
    pub fn on(mut self, event: EventId) -> Self {
        self.event = Some(event);
        self
    }

    /// Key the row on the null event, making it a default transition.
    pub fn on_null(self) -> Self {
        self.on(EventId::NULL)
    }

    /// Set the target state.
    ///
    /// Required unless the row has an action, in which case leaving it out
    /// makes the row internal.
    pub fn to(mut self, state: StateId) -> Self {
        self.to = Some(state);
        self
    }

    pub fn guard(mut self, guard: Guard<D>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure.
    pub fn when<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Machine<D>) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(name, predicate));
        self
    }

    pub fn action(mut self, action: Action<D>) -> Self {
        self.action = Some(action);
        self
    }

    /// Add an action using a closure.
    pub fn run<F>(mut self, name: impl Into<String>, effect: F) -> Self
    where
        F: Fn(&mut Machine<D>) + Send + Sync + 'static,
    {
        self.action = Some(Action::new(name, effect));
        self
    }

    pub fn build(self) -> Result<TransitionRow<D>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let event = self.event.ok_or(BuildError::MissingEvent)?;
        if self.to.is_none() && self.action.is_none() {
            return Err(BuildError::MissingToState);
        }


        Ok(TransitionRow {
            from,
            event,
            guard: self.guard,
            action: self.action,
            to: self.to,
        })
    }
}

impl<D> Default for TransitionBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}
