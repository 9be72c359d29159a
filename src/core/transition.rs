//! Transition table rows.

use crate::core::action::Action;
use crate::core::event::EventId;
use crate::core::guard::Guard;
use crate::core::state::StateId;
use std::fmt;

/// One row of the transition table.
///
/// The table is scanned in declaration order and the first row matching
/// `(from, event)` wins, whether or not its guard passes.
///
/// A row without a target is internal: its action runs and the machine
/// stays where it is, with no exit or entry callbacks.
pub struct TransitionRow<D> {
    pub from: StateId,
    pub event: EventId,
    pub guard: Option<Guard<D>>,
    pub action: Option<Action<D>>,
    pub to: Option<StateId>,
}

impl<D> TransitionRow<D> {
    /// Whether this row is keyed on `(state, event)`.
    pub fn matches(&self, state: StateId, event: EventId) -> bool {
        self.from == state && self.event == event
    }

    pub fn is_internal(&self) -> bool {
        self.to.is_none()
    }
}

impl<D> Clone for TransitionRow<D> {
    fn clone(&self) -> Self {
        Self {
            from: self.from,
            event: self.event,
            guard: self.guard.clone(),
            action: self.action.clone(),
            to: self.to,
        }
    }
}

impl<D> fmt::Debug for TransitionRow<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionRow")
            .field("from", &self.from)
            .field("event", &self.event)
            .field("guard", &self.guard.as_ref().map(|g| g.name()))
            .field("action", &self.action.as_ref().map(|a| a.name()))
            .field("to", &self.to)
            .finish()
    }
}
