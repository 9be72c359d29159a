//! The immutable state chart shared by machines.

use crate::collections::Tree;
use crate::core::event::EventId;
use crate::core::state::{StateDef, StateId};
use crate::core::transition::TransitionRow;
use crate::engine::MachineConfig;
use std::fmt;

/// Validated state hierarchy, event names and transition table.
///
/// Produced by [`StateMachineBuilder::build`](crate::builder::StateMachineBuilder::build)
/// and never mutated afterwards. Machines share it through an `Arc` and keep
/// their mutable per-state parts in their own runtime arena.
pub struct Chart<D> {
    pub(crate) states: Vec<StateDef<D>>,
    pub(crate) initial_data: Vec<Option<D>>,
    pub(crate) events: Vec<String>,
    pub(crate) transitions: Vec<TransitionRow<D>>,
    pub(crate) tree: Tree<StateId>,
    pub(crate) config: MachineConfig,
}

impl<D> Chart<D> {
    pub fn state(&self, id: StateId) -> Option<&StateDef<D>> {
        self.states.get(id.0)
    }

    pub fn states(&self) -> &[StateDef<D>] {
        &self.states
    }

    pub fn parent(&self, id: StateId) -> Option<StateId> {
        self.state(id).and_then(StateDef::parent)
    }

    pub fn state_name(&self, id: StateId) -> Option<&str> {
        self.state(id).map(StateDef::name)
    }

    pub fn event_name(&self, id: EventId) -> Option<&str> {
        self.events.get(id.0).map(String::as_str)
    }

    /// Look a state up by name. Names are unique within a chart.
    pub fn find_state(&self, name: &str) -> Option<StateId> {
        self.states
            .iter()
            .position(|s| s.name == name)
            .map(StateId)
    }

    pub fn find_event(&self, name: &str) -> Option<EventId> {
        self.events.iter().position(|e| e == name).map(EventId)
    }

    /// Number of states on the chain from `id` to the top level, `id`
    /// included.
    pub fn depth(&self, id: StateId) -> usize {
        std::iter::successors(Some(id), |s| self.parent(*s)).count()
    }

    /// Whether `ancestor` is `id` itself or on its parent chain.
    pub fn is_ancestor(&self, ancestor: StateId, id: StateId) -> bool {
        std::iter::successors(Some(id), |s| self.parent(*s)).any(|s| s == ancestor)
    }

    pub fn transitions(&self) -> &[TransitionRow<D>] {
        &self.transitions
    }

    /// The static hierarchy as a tree of state ids, in registration order.
    pub fn tree(&self) -> &Tree<StateId> {
        &self.tree
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }
}

impl<D> fmt::Debug for Chart<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chart")
            .field("states", &self.states)
            .field("events", &self.events)
            .field("transitions", &self.transitions)
            .field("config", &self.config)
            .finish()
    }
}
