//! Builder for constructing state charts.

use crate::builder::error::BuildError;
use crate::builder::state::StateSpec;
use crate::builder::transition::TransitionBuilder;
use crate::builder::validation::validate_chart;
use crate::collections::Tree;
use crate::core::{Chart, EventId, StateDef, StateId, TransitionRow};
use crate::engine::MachineConfig;

/// Builder for registering states, events and transitions.
///
/// Every builder starts with the reserved `start` and `end` states and the
/// `null` event. Registration hands back ids; [`build`](Self::build)
/// validates the whole chart and freezes it.
///
/// # Example
///
/// ```rust
/// use hfsm::builder::{StateMachineBuilder, StateSpec, TransitionBuilder};
/// use hfsm::engine::Machine;
///
/// let mut builder = StateMachineBuilder::<()>::new();
/// let a = builder.state("A");
/// let b = builder.state("B");
/// let evt1 = builder.event("evt1");
///
/// builder
///     .initial(a)
///     .transition(TransitionBuilder::new().from(a).on(evt1).to(b))
///     .unwrap();
///
/// let mut machine = Machine::init(builder.build().unwrap()).unwrap();
/// assert_eq!(machine.current_state_name(), "A");
///
/// machine.transition(evt1);
/// assert_eq!(machine.current_state_name(), "B");
/// ```
pub struct StateMachineBuilder<D> {
    states: Vec<StateDef<D>>,
    data: Vec<Option<D>>,
    events: Vec<String>,
    transitions: Vec<TransitionRow<D>>,
    config: MachineConfig,
}

impl<D> StateMachineBuilder<D> {
    pub fn new() -> Self {
        Self {
            states: vec![StateDef::bare("start"), StateDef::bare("end")],
            data: vec![None, None],
            events: vec!["null".to_string()],
            transitions: Vec::new(),
            config: MachineConfig::default(),
        }
    }

    /// Register a state and return its id.
    pub fn add_state(&mut self, spec: StateSpec<D>) -> StateId {
        let (def, data) = spec.into_parts();
        self.states.push(def);
        self.data.push(data);
        StateId(self.states.len() - 1)
    }

    /// Register a top-level state with no data or callbacks.
    pub fn state(&mut self, name: &str) -> StateId {
        self.add_state(StateSpec::new(name))
    }

    /// Register a state with no data or callbacks under `parent`.
    pub fn child(&mut self, name: &str, parent: StateId) -> StateId {
        self.add_state(StateSpec::new(name).parent(parent))
    }

    /// Register an event, or return the id already bound to `name`.
    pub fn event(&mut self, name: &str) -> EventId {
        if let Some(index) = self.events.iter().position(|e| e == name) {
            return EventId(index);
        }
        self.events.push(name.to_string());
        EventId(self.events.len() - 1)
    }

    /// Add the default row `(start, null) -> state`, making `state` where
    /// a freshly initialised machine settles.
    pub fn initial(&mut self, state: StateId) -> &mut Self {
        self.add_transition(TransitionRow {
            from: StateId::START,
            event: EventId::NULL,
            guard: None,
            action: None,
            to: Some(state),
        })
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(&mut self, builder: TransitionBuilder<D>) -> Result<&mut Self, BuildError> {
        let row = builder.build()?;
        Ok(self.add_transition(row))
    }

    /// Add a pre-built transition row.
    pub fn add_transition(&mut self, row: TransitionRow<D>) -> &mut Self {
        self.transitions.push(row);
        self
    }

    /// Add multiple transition rows at once, keeping their order.
    pub fn transitions<I>(&mut self, rows: I) -> &mut Self
    where
        I: IntoIterator<Item = TransitionRow<D>>,
    {
        self.transitions.extend(rows);
        self
    }

    pub fn config(&mut self, config: MachineConfig) -> &mut Self {
        self.config = config;
        self
    }

    pub fn max_depth(&mut self, max_depth: usize) -> &mut Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn trace_capacity(&mut self, capacity: usize) -> &mut Self {
        self.config.trace_capacity = capacity;
        self
    }
}

impl<D: Clone> StateMachineBuilder<D> {
    /// Validate and freeze the chart.
    ///
    /// All structural violations are reported together in
    /// [`BuildError::InvalidChart`].
    pub fn build(&self) -> Result<Chart<D>, BuildError> {
        validate_chart(&self.states, &self.events, &self.transitions, &self.config)?;

        let mut tree = Tree::with_capacity(self.states.len())?;
        for (index, state) in self.states.iter().enumerate() {
            tree.insert(state.parent.as_ref(), StateId(index))?;
        }

        Ok(Chart {
            states: self.states.clone(),
            initial_data: self.data.clone(),
            events: self.events.clone(),
            transitions: self.transitions.clone(),
            tree,
            config: self.config.clone(),
        })
    }
}

impl<D> Default for StateMachineBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}
