//! The state machine runtime.
//!
//! A [`Machine`] runs a [`Chart`](crate::core::Chart) built by
//! [`StateMachineBuilder`](crate::builder::StateMachineBuilder):
//!
//! - [`Machine::transition`] dispatches an event up the hierarchy, then
//!   follows null (default) transitions.
//! - [`Machine::update`] runs the current state's do-activity.
//! - [`Machine::terminate`] exits every active state and parks the machine
//!   in [`StateId::END`](crate::core::StateId::END).
//!
//! State changes exit from the current state up to the least common
//! ancestor, enter down to the target, and resume a composite target's
//! last active child when it has one.

mod change;
mod config;
mod dispatch;
mod dump;
mod error;
mod machine;
mod trace;

pub use config::{MachineConfig, DEFAULT_MAX_DEPTH, DEFAULT_NULL_CHAIN_LIMIT};
pub use dump::{DumpEntry, Renderer, StateTreeSnapshot, StdoutRenderer};
pub use error::MachineError;
pub use machine::Machine;
pub use trace::{TransitionRecord, TransitionTrace};
