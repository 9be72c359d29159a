//! Machine runtime: lifecycle and accessors.

use crate::collections::Stack;
use crate::core::{Chart, EventId, StateId};
use crate::engine::error::MachineError;
use crate::engine::trace::TransitionTrace;
use std::fmt;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// Mutable per-state part, indexed like the chart's state arena.
#[derive(Debug)]
pub(crate) struct StateRuntime<D> {
    pub(crate) history: Option<StateId>,
    pub(crate) data: Option<D>,
}

/// A running instance of a [`Chart`].
///
/// The chart is shared and immutable; the machine owns the current state
/// pointer, per-state history and data, the two ancestor scratch stacks used
/// by every state change, and the optional transition trace.
///
/// All operations run to completion on the caller's stack. Callbacks receive
/// the machine by mutable reference and may read or write state data, but
/// calls to [`transition`](Self::transition), [`update`](Self::update) or
/// [`terminate`](Self::terminate) made from inside a callback are refused.
///
/// # Example
///
/// ```rust
/// use hfsm::builder::{StateMachineBuilder, TransitionBuilder};
/// use hfsm::core::StateId;
/// use hfsm::engine::Machine;
///
/// let mut builder = StateMachineBuilder::<()>::new();
/// let a = builder.state("A");
/// let b = builder.state("B");
/// let evt1 = builder.event("evt1");
/// builder
///     .initial(a)
///     .transition(TransitionBuilder::new().from(a).on(evt1).to(b))
///     .unwrap();
///
/// let mut machine = Machine::init(builder.build().unwrap()).unwrap();
/// assert_eq!(machine.current_state(), a);
///
/// machine.transition(evt1);
/// assert_eq!(machine.current_state_name(), "B");
///
/// machine.terminate().unwrap();
/// assert_eq!(machine.current_state(), StateId::END);
/// ```
pub struct Machine<D = ()> {
    pub(crate) id: Uuid,
    pub(crate) chart: Arc<Chart<D>>,
    pub(crate) runtime: Vec<StateRuntime<D>>,
    pub(crate) current: StateId,
    pub(crate) src_ancestors: Stack<StateId>,
    pub(crate) dest_ancestors: Stack<StateId>,
    pub(crate) trace: TransitionTrace,
    busy: bool,
    terminated: bool,
}

impl<D: Clone> Machine<D> {
    /// Start a machine on `chart`.
    ///
    /// The machine begins in [`StateId::START`] and immediately runs the null
    /// chain, so a `(start, null) -> X` row makes `X` the starting state.
    /// Fails with `InvalidArgument` when the chart has no transitions.
    pub fn init(chart: Chart<D>) -> Result<Self, MachineError> {
        Self::with_chart(Arc::new(chart))
    }

    /// Start a machine on a chart shared with other machines.
    pub fn with_chart(chart: Arc<Chart<D>>) -> Result<Self, MachineError> {
        if chart.transitions().is_empty() {
            return Err(MachineError::InvalidArgument(
                "transition table is empty".to_string(),
            ));
        }

        let config = chart.config();
        let runtime = chart
            .initial_data
            .iter()
            .map(|data| StateRuntime {
                history: None,
                data: data.clone(),
            })
            .collect();

        let mut machine = Self {
            id: Uuid::new_v4(),
            src_ancestors: Stack::with_capacity(config.max_depth)?,
            dest_ancestors: Stack::with_capacity(config.max_depth)?,
            trace: TransitionTrace::with_capacity(config.trace_capacity)?,
            runtime,
            current: StateId::START,
            busy: false,
            terminated: false,
            chart,
        };

        machine.busy = true;
        machine.settle();
        machine.busy = false;

        Ok(machine)
    }
}

impl<D> Machine<D> {
    /// Drive the machine into [`StateId::END`], running every exit callback
    /// from the current state up to the top level.
    ///
    /// History is recorded on the way out. Afterwards events and updates are
    /// ignored, and a second call fails with `Terminated`.
    pub fn terminate(&mut self) -> Result<(), MachineError> {
        if self.terminated {
            return Err(MachineError::Terminated);
        }
        if self.busy {
            return Err(MachineError::Busy);
        }

        self.busy = true;
        self.change_state(StateId::END, EventId::NULL);
        self.terminated = true;
        self.busy = false;
        Ok(())
    }

    /// Run the do-activity of the current state.
    ///
    /// Ancestors' do-activities are not run.
    pub fn update(&mut self) {
        if !self.begin("update") {
            return;
        }
        self.run_exec(self.current);
        self.end();
    }

    /// Guard entry to an operation that touches the scratch stacks.
    pub(crate) fn begin(&mut self, operation: &'static str) -> bool {
        if self.terminated {
            warn!(machine = %self.id, operation, "machine terminated, call ignored");
            return false;
        }
        if self.busy {
            warn!(machine = %self.id, operation, "re-entrant call from a callback ignored");
            return false;
        }
        self.busy = true;
        true
    }

    pub(crate) fn end(&mut self) {
        self.busy = false;
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn chart(&self) -> &Arc<Chart<D>> {
        &self.chart
    }

    pub fn current_state(&self) -> StateId {
        self.current
    }

    pub fn current_state_name(&self) -> &str {
        self.name_of(self.current)
    }

    /// Copy the current state's name into `buf` followed by a `0` byte.
    ///
    /// The name is cut at a character boundary when `buf` is too small.
    /// Returns the number of name bytes written, terminator excluded.
    pub fn copy_current_state_name(&self, buf: &mut [u8]) -> usize {
        let Some(room) = buf.len().checked_sub(1) else {
            return 0;
        };

        let name = self.current_state_name();
        let mut written = name.len().min(room);
        while !name.is_char_boundary(written) {
            written -= 1;
        }

        buf[..written].copy_from_slice(&name.as_bytes()[..written]);
        buf[written] = 0;
        written
    }

    pub fn state_name(&self, id: StateId) -> Option<&str> {
        self.chart.state_name(id)
    }

    pub fn event_name(&self, id: EventId) -> Option<&str> {
        self.chart.event_name(id)
    }

    /// Data attached to `id`.
    ///
    /// `None` for states without data, and for the state whose own callback
    /// is currently running (its data is lent to that callback).
    pub fn state_data(&self, id: StateId) -> Option<&D> {
        self.runtime.get(id.0)?.data.as_ref()
    }

    pub fn state_data_mut(&mut self, id: StateId) -> Option<&mut D> {
        self.runtime.get_mut(id.0)?.data.as_mut()
    }

    /// Child of `id` that was active when `id` was last left.
    pub fn history(&self, id: StateId) -> Option<StateId> {
        self.runtime.get(id.0)?.history
    }

    /// Whether `id` is the current state or one of its ancestors.
    pub fn is_in(&self, id: StateId) -> bool {
        self.chart.is_ancestor(id, self.current)
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn trace(&self) -> &TransitionTrace {
        &self.trace
    }

    pub(crate) fn name_of(&self, id: StateId) -> &str {
        self.chart.state_name(id).unwrap_or("<unknown>")
    }
}

impl<D> fmt::Debug for Machine<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("id", &self.id)
            .field("current", &self.current_state_name())
            .field("terminated", &self.terminated)
            .field("trace", &self.trace.len())
            .finish()
    }
}
