//! Static state machine definitions.
//!
//! This module contains everything that is fixed once a chart is built:
//! - State identity and definitions via [`StateId`] and [`StateDef`]
//! - Event identity via [`EventId`]
//! - Guard predicates and transition actions
//! - Transition rows and the [`Chart`] that owns them
//!
//! Nothing here mutates at run time; the current position, history and
//! state data live in [`Machine`](crate::engine::Machine).

mod action;
mod chart;
mod event;
mod guard;
mod state;
mod transition;

pub use action::Action;
pub use chart::Chart;
pub use event::EventId;
pub use guard::Guard;
pub use state::{EntryFn, ExecFn, ExitFn, StateDef, StateId};
pub use transition::TransitionRow;
