//! Static state definitions.
//!
//! A state is identified by a [`StateId`] into the chart's state arena and
//! described by an immutable [`StateDef`]. Per-machine mutable parts
//! (history and data) live in the machine, indexed by the same id.

use crate::engine::Machine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Callback run when a state is entered.
///
/// Receives the machine, the state's data and whether this is the last
/// entry of the state change.
pub type EntryFn<D> = Arc<dyn Fn(&mut Machine<D>, Option<&mut D>, bool) + Send + Sync>;

/// Do-activity callback run by [`Machine::update`].
pub type ExecFn<D> = Arc<dyn Fn(&mut Machine<D>, Option<&mut D>) + Send + Sync>;

/// Callback run when a state is exited.
///
/// The flag is `true` only for the outermost exit of the state change.
pub type ExitFn<D> = Arc<dyn Fn(&mut Machine<D>, Option<&mut D>, bool) + Send + Sync>;

/// Index of a state inside a [`Chart`](crate::core::Chart).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId(pub(crate) usize);

impl StateId {
    /// Root-level initial state every machine starts in.
    pub const START: StateId = StateId(0);

    /// Terminal state entered by [`Machine::terminate`]. Never a valid
    /// transition source or target.
    pub const END: StateId = StateId(1);

    pub fn index(self) -> usize {
        self.0
    }

    /// Whether this is one of the states every chart defines.
    pub fn is_reserved(self) -> bool {
        self == Self::START || self == Self::END
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "state#{}", self.0)
    }
}

/// Immutable description of one state.
pub struct StateDef<D> {
    pub(crate) name: String,
    pub(crate) parent: Option<StateId>,
    pub(crate) entry: Option<EntryFn<D>>,
    pub(crate) exec: Option<ExecFn<D>>,
    pub(crate) exit: Option<ExitFn<D>>,
}

impl<D> StateDef<D> {
    /// A state without parent or callbacks.
    pub(crate) fn bare(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            entry: None,
            exec: None,
            exit: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<StateId> {
        self.parent
    }

    pub fn has_entry(&self) -> bool {
        self.entry.is_some()
    }

    pub fn has_exec(&self) -> bool {
        self.exec.is_some()
    }

    pub fn has_exit(&self) -> bool {
        self.exit.is_some()
    }
}

impl<D> Clone for StateDef<D> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            parent: self.parent,
            entry: self.entry.clone(),
            exec: self.exec.clone(),
            exit: self.exit.clone(),
        }
    }
}

impl<D> fmt::Debug for StateDef<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDef")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("entry", &self.has_entry())
            .field("exec", &self.has_exec())
            .field("exit", &self.has_exit())
            .finish()
    }
}
