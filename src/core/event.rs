//! Event identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of an event registered on a chart. Events compare by id only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub(crate) usize);

impl EventId {
    /// Pseudo-event dispatched after every real one. Rows keyed on it
    /// describe default transitions into a substate.
    pub const NULL: EventId = EventId(0);

    pub fn index(self) -> usize {
        self.0
    }

    pub fn is_null(self) -> bool {
        self == Self::NULL
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event#{}", self.0)
    }
}
