//! Fixed-capacity pooled collections.
//!
//! Every container allocates its full pool on construction and recycles
//! slots through a free-list afterwards. The state machine engine relies on
//! this for its transition path:
//! - [`Stack`] holds the ancestor chains diffed by each state change
//! - [`Queue`] backs the bounded transition trace
//! - [`Set`] detects duplicate names while a chart is validated
//! - [`Tree`] mirrors the static state hierarchy for dumps

mod error;
mod list;
mod queue;
mod set;
mod stack;
mod tree;

pub use error::CollectionError;
pub use list::{Handle, Iter, PooledList};
pub use queue::Queue;
pub use set::Set;
pub use stack::Stack;
pub use tree::{Tree, TreeIter};
