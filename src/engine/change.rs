//! The state change algorithm.
//!
//! Moving from `current` to a target exits every state from `current` up to,
//! but not including, the least common ancestor, then enters every state
//! from just below that ancestor down to the target. Both ancestor chains are
//! pushed on the machine's scratch stacks and popped in lockstep from the top
//! level until they diverge.
//!
//! Top-level states have no parent, so the common ancestor of two unrelated
//! top-level subtrees is the virtual root, represented as `None`.

use crate::collections::Stack;
use crate::core::{Chart, EventId, StateId};
use crate::engine::machine::Machine;
use std::sync::Arc;
use tracing::debug;

impl<D> Machine<D> {
    /// Change to `target`, then keep following recorded history children
    /// until a state without history is entered.
    pub(crate) fn change_state(&mut self, target: StateId, event: EventId) {
        let mut next = Some(target);
        // Each history child sits one level below the state just entered,
        // so this ends within max_depth rounds.
        while let Some(target) = next {
            next = self.change_state_once(target, event);
        }
    }

    /// One state change. Returns the history child to resume, if any.
    fn change_state_once(&mut self, target: StateId, event: EventId) -> Option<StateId> {
        let chart = Arc::clone(&self.chart);
        let from = self.current;

        if target == from {
            self.run_exit(from, true);
            self.record(from, target, event);
            self.run_entry(target, true);
            return None;
        }

        self.src_ancestors.clear();
        self.dest_ancestors.clear();
        push_chain(&chart, &mut self.src_ancestors, from);
        push_chain(&chart, &mut self.dest_ancestors, target);

        let (src, dest) = self.common_ancestor();
        let ancestor = match src {
            Some(src) => chart.parent(src),
            None => Some(from),
        };

        let mut exiting = Some(from);
        while exiting != ancestor {
            let Some(state) = exiting else {
                panic!("exit walk from {from} reached the top level before {ancestor:?}");
            };
            let parent = chart.parent(state);
            self.run_exit(state, parent == ancestor);
            if let Some(parent) = parent {
                self.runtime[parent.0].history = Some(state);
            }
            exiting = parent;
        }

        self.record(from, target, event);

        while let Ok(state) = self.dest_ancestors.pop() {
            let completed = self.dest_ancestors.is_empty();
            self.run_entry(state, completed);
        }

        // Moving up to an ancestor enters nothing, and resuming its history
        // would step straight back down.
        dest.and_then(|_| self.runtime[target.0].history)
    }

    /// Pop both chains from the top level while they agree.
    ///
    /// Returns the first differing entries. The destination entry is pushed
    /// back so the entry phase starts with it.
    fn common_ancestor(&mut self) -> (Option<StateId>, Option<StateId>) {
        loop {
            let src = self.src_ancestors.pop().ok();
            let dest = self.dest_ancestors.pop().ok();
            if src.is_some() && src == dest {
                continue;
            }
            if let Some(dest) = dest {
                if let Err(error) = self.dest_ancestors.push(dest) {
                    panic!("ancestor stack lost {dest}: {error}");
                }
            }
            return (src, dest);
        }
    }

    fn record(&mut self, from: StateId, to: StateId, event: EventId) {
        debug!(
            machine = %self.id,
            from = self.name_of(from),
            to = self.name_of(to),
            event = self.chart.event_name(event).unwrap_or("<unknown>"),
            "state changed"
        );
        self.current = to;
        self.trace.record(from, to, event);
    }

    pub(crate) fn run_entry(&mut self, state: StateId, completed: bool) {
        let Some(entry) = self.chart.states[state.0].entry.clone() else {
            return;
        };
        let mut data = self.runtime[state.0].data.take();
        entry(self, data.as_mut(), completed);
        self.runtime[state.0].data = data;
    }

    pub(crate) fn run_exit(&mut self, state: StateId, completed: bool) {
        let Some(exit) = self.chart.states[state.0].exit.clone() else {
            return;
        };
        let mut data = self.runtime[state.0].data.take();
        exit(self, data.as_mut(), completed);
        self.runtime[state.0].data = data;
    }

    pub(crate) fn run_exec(&mut self, state: StateId) {
        let Some(exec) = self.chart.states[state.0].exec.clone() else {
            return;
        };
        let mut data = self.runtime[state.0].data.take();
        exec(self, data.as_mut());
        self.runtime[state.0].data = data;
    }
}

/// Push `state` and its ancestors, leaving the top-level state on top.
fn push_chain<D>(chart: &Chart<D>, stack: &mut Stack<StateId>, state: StateId) {
    for link in std::iter::successors(Some(state), |s| chart.parent(*s)) {
        if let Err(error) = stack.push(link) {
            panic!("parent chain of {state} is deeper than the ancestor stack: {error}");
        }
    }
}
