//! Bounded record of state changes.
//!
//! The trace keeps the most recent state changes of a machine in a pooled
//! queue sized by [`MachineConfig::trace_capacity`](crate::engine::MachineConfig).
//! When the queue is full the oldest record is evicted, so recording never
//! allocates after the machine is created.

use crate::collections::{CollectionError, Queue};
use crate::core::{EventId, StateId};
use chrono::{DateTime, Utc};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single state change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state that was current before the change
    pub from: StateId,
    /// The state that became current
    pub to: StateId,
    /// The event being dispatched, `EventId::NULL` for default transitions
    /// and termination
    pub event: EventId,
    /// When the change happened
    pub timestamp: DateTime<Utc>,
}

/// Most recent state changes, oldest first.
///
/// # Example
///
/// ```rust
/// use hfsm::builder::StateMachineBuilder;
/// use hfsm::core::StateId;
/// use hfsm::engine::Machine;
///
/// let mut builder = StateMachineBuilder::<()>::new();
/// let idle = builder.state("idle");
/// builder.initial(idle).trace_capacity(4);
///
/// let machine = Machine::init(builder.build().unwrap()).unwrap();
/// assert_eq!(machine.trace().get_path(), vec![StateId::START, idle]);
/// ```
#[derive(Debug)]
pub struct TransitionTrace {
    records: Option<Queue<TransitionRecord>>,
}

impl TransitionTrace {
    /// Create a trace holding up to `capacity` records; 0 disables tracing.
    pub fn with_capacity(capacity: usize) -> Result<Self, CollectionError> {
        let records = match capacity {
            0 => None,
            n => Some(Queue::with_capacity(n)?),
        };
        Ok(Self { records })
    }

    pub(crate) fn record(&mut self, from: StateId, to: StateId, event: EventId) {
        let Some(records) = self.records.as_mut() else {
            return;
        };
        if records.is_full() {
            let _evicted = records.dequeue();
        }
        let record = TransitionRecord {
            from,
            to,
            event,
            timestamp: Utc::now(),
        };
        if let Err(error) = records.enqueue(record) {
            tracing::warn!(%error, "transition trace dropped a record");
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.records.is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransitionRecord> + '_ {
        self.records.iter().flat_map(|records| records.iter())
    }

    /// Copy the records out, oldest first.
    pub fn records(&self) -> Vec<TransitionRecord> {
        self.iter().cloned().collect()
    }

    /// States traversed: the `from` of the oldest record, then the `to` of
    /// each record.
    pub fn get_path(&self) -> Vec<StateId> {
        let mut path = Vec::new();
        if let Some(first) = self.iter().next() {
            path.push(first.from);
        }
        path.extend(self.iter().map(|record| record.to));
        path
    }

    /// Time between the oldest and newest record, `None` when empty.
    pub fn duration(&self) -> Option<Duration> {
        let first = self.iter().next()?;
        let last = self.iter().last()?;
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn len(&self) -> usize {
        self.records.as_ref().map_or(0, Queue::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.records.as_ref().map_or(0, Queue::capacity)
    }

    pub fn clear(&mut self) {
        if let Some(records) = self.records.as_mut() {
            records.clear();
        }
    }
}

impl Serialize for TransitionTrace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
