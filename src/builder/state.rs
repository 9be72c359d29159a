//! Builder-side description of a state.

use crate::core::{EntryFn, ExecFn, ExitFn, StateDef, StateId};
use crate::engine::Machine;
use std::sync::Arc;

/// Everything needed to register one state: name, parent, initial data and
/// lifecycle callbacks.
///
/// # Example
///
/// ```rust
/// use hfsm::builder::{StateMachineBuilder, StateSpec};
///
/// let mut builder = StateMachineBuilder::<i32>::new();
/// let running = builder.state("running");
/// let cooling = builder.add_state(
///     StateSpec::new("cooling")
///         .parent(running)
///         .data(23)
///         .on_entry(|_machine, setting, _completed| {
///             if let Some(temperature) = setting {
///                 println!("cooling to {temperature}");
///             }
///         }),
/// );
/// # let _ = cooling;
/// ```
pub struct StateSpec<D> {
    name: String,
    parent: Option<StateId>,
    data: Option<D>,
    entry: Option<EntryFn<D>>,
    exec: Option<ExecFn<D>>,
    exit: Option<ExitFn<D>>,
}

impl<D> StateSpec<D> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            data: None,
            entry: None,
            exec: None,
            exit: None,
        }
    }

    /// Nest this state under `parent`, which must already be registered.
    pub fn parent(mut self, parent: StateId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Initial data handed to this state's callbacks. Every machine built
    /// from the chart starts with its own copy.
    pub fn data(mut self, data: D) -> Self {
        self.data = Some(data);
        self
    }

    pub fn on_entry<F>(mut self, entry: F) -> Self
    where
        F: Fn(&mut Machine<D>, Option<&mut D>, bool) + Send + Sync + 'static,
    {
        self.entry = Some(Arc::new(entry));
        self
    }

    /// Do-activity, run by [`Machine::update`] while this is the current state.
    pub fn on_exec<F>(mut self, exec: F) -> Self
    where
        F: Fn(&mut Machine<D>, Option<&mut D>) + Send + Sync + 'static,
    {
        self.exec = Some(Arc::new(exec));
        self
    }

    pub fn on_exit<F>(mut self, exit: F) -> Self
    where
        F: Fn(&mut Machine<D>, Option<&mut D>, bool) + Send + Sync + 'static,
    {
        self.exit = Some(Arc::new(exit));
        self
    }

    pub(crate) fn into_parts(self) -> (StateDef<D>, Option<D>) {
        let def = StateDef {
            name: self.name,
            parent: self.parent,
            entry: self.entry,
            exec: self.exec,
            exit: self.exit,
        };
        (def, self.data)
    }
}
