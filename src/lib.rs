//! HFSM: a hierarchical finite state machine engine
//!
//! States nest inside composite states, events bubble from the current state
//! up through its ancestors, and every state change runs exit and entry
//! callbacks in hierarchy order. Composite states remember their last active
//! child and resume it when re-entered.
//!
//! # Core Concepts
//!
//! - **Chart**: Immutable states, events and transition rows, assembled with
//!   [`StateMachineBuilder`] and validated as a whole
//! - **Machine**: A running instance holding the current state, history and
//!   per-state data
//! - **Collections**: Fixed-capacity pooled containers the engine runs on,
//!   so dispatch does not allocate
//!
//! # Example
//!
//! ```rust
//! use hfsm::builder::{StateMachineBuilder, TransitionBuilder};
//! use hfsm::engine::Machine;
//!
//! let mut builder = StateMachineBuilder::<()>::new();
//! let off = builder.state("off");
//! let on = builder.state("on");
//! let dim = builder.child("dim", on);
//! let bright = builder.child("bright", on);
//! let (toggle, more) = (builder.event("toggle"), builder.event("more"));
//!
//! builder
//!     .initial(off)
//!     .transition(TransitionBuilder::new().from(off).on(toggle).to(on))?
//!     .transition(TransitionBuilder::new().from(on).on_null().to(dim))?
//!     .transition(TransitionBuilder::new().from(dim).on(more).to(bright))?
//!     .transition(TransitionBuilder::new().from(on).on(toggle).to(off))?;
//!
//! let mut machine = Machine::init(builder.build()?)?;
//! machine.transition(toggle);
//! assert_eq!(machine.current_state(), dim);
//!
//! machine.transition(more);
//! machine.transition(toggle);
//! assert_eq!(machine.current_state(), off);
//!
//! // Re-entering `on` resumes its last active child.
//! machine.transition(toggle);
//! assert_eq!(machine.current_state(), bright);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod collections;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder, StateSpec, TransitionBuilder};
pub use core::{Chart, EventId, Guard, StateId};
pub use engine::{Machine, MachineConfig, MachineError};
