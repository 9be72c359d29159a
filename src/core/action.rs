//! Transition actions.

use crate::engine::Machine;
use std::fmt;
use std::sync::Arc;

/// Named side effect attached to a transition row.
///
/// Runs after the guard passed and before any exit callback, so
/// [`Machine::current_state`] still reports the source state.
pub struct Action<D> {
    name: String,
    effect: Arc<dyn Fn(&mut Machine<D>) + Send + Sync>,
}

impl<D> Action<D> {
    pub fn new<F>(name: impl Into<String>, effect: F) -> Self
    where
        F: Fn(&mut Machine<D>) + Send + Sync + 'static,
    {
        Action {
            name: name.into(),
            effect: Arc::new(effect),
        }
    }

    pub fn run(&self, machine: &mut Machine<D>) {
        (self.effect)(machine)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<D> Clone for Action<D> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            effect: Arc::clone(&self.effect),
        }
    }
}

impl<D> fmt::Debug for Action<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Action").field(&self.name).finish()
    }
}
