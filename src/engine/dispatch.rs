//! Event dispatch.
//!
//! An event is offered to the current state first and then to each ancestor
//! in turn. The first row matching `(state, event)` in declaration order
//! decides: if its guard passes, the action runs and the state changes; if
//! the guard fails, the event is consumed without a change. An internal row
//! (one without a target) runs its action and consumes the event in place.
//! After every dispatch the null chain runs on the state the machine ended
//! up in.

use crate::core::{EventId, StateId};
use crate::engine::machine::Machine;
use std::sync::Arc;
use tracing::{trace, warn};

/// What a single row lookup at one level did with the event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    Fired,
    Handled,
    Blocked,
    Unmatched,
}

impl<D> Machine<D> {
    /// Dispatch `event`, then run the null chain.
    ///
    /// Events nobody handles are dropped. Dispatching [`EventId::NULL`] runs
    /// only the null chain.
    pub fn transition(&mut self, event: EventId) {
        if !self.begin("transition") {
            return;
        }
        if !event.is_null() {
            self.dispatch(event);
        }
        self.settle();
        self.end();
    }

    fn dispatch(&mut self, event: EventId) {
        let mut level = Some(self.current);
        while let Some(state) = level {
            match self.fire(state, event) {
                Outcome::Unmatched => level = self.chart.parent(state),
                Outcome::Fired | Outcome::Handled | Outcome::Blocked => return,
            }
        }
        trace!(
            machine = %self.id,
            state = self.name_of(self.current),
            event = self.chart.event_name(event).unwrap_or("<unknown>"),
            "event not handled"
        );
    }

    /// Follow `(current, null)` rows until none fires.
    ///
    /// Only rows declared on the current state itself are considered. An
    /// internal null row runs its action once and ends the chain.
    pub(crate) fn settle(&mut self) {
        let limit = self.chart.config().null_chain_limit;
        for _ in 0..limit {
            if self.fire(self.current, EventId::NULL) != Outcome::Fired {
                return;
            }
        }
        warn!(
            machine = %self.id,
            state = self.name_of(self.current),
            limit,
            "null transition chain cut at limit"
        );
    }

    fn fire(&mut self, state: StateId, event: EventId) -> Outcome {
        let chart = Arc::clone(&self.chart);
        let Some(row) = chart.transitions().iter().find(|row| row.matches(state, event)) else {
            return Outcome::Unmatched;
        };

        if let Some(guard) = &row.guard {
            if !guard.check(self) {
                trace!(
                    machine = %self.id,
                    state = self.name_of(state),
                    guard = guard.name(),
                    "guard blocked transition"
                );
                return Outcome::Blocked;
            }
        }

        if let Some(action) = &row.action {
            action.run(self);
        }
        match row.to {
            Some(target) => {
                self.change_state(target, event);
                Outcome::Fired
            }
            None => Outcome::Handled,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::{StateMachineBuilder, StateSpec, TransitionBuilder};
    use crate::core::EventId;
    use crate::engine::{Machine, MachineConfig};
    use std::sync::{Arc, Mutex};

    #[test]
    fn unhandled_event_propagates_to_parent() {
        let mut builder = StateMachineBuilder::<()>::new();
        let outer = builder.state("outer");
        let inner = builder.child("inner", outer);
        let elsewhere = builder.state("elsewhere");
        let leave = builder.event("leave");
        builder
            .initial(inner)
            .transition(TransitionBuilder::new().from(outer).on(leave).to(elsewhere))
            .unwrap();

        let mut machine = Machine::init(builder.build().unwrap()).unwrap();
        machine.transition(leave);
        assert_eq!(machine.current_state(), elsewhere);
    }

    #[test]
    fn event_without_handler_is_dropped() {
        let mut builder = StateMachineBuilder::<()>::new();
        let outer = builder.state("outer");
        let inner = builder.child("inner", outer);
        let unknown = builder.event("unknown");
        builder.initial(inner);

        let mut machine = Machine::init(builder.build().unwrap()).unwrap();
        machine.transition(unknown);
        assert_eq!(machine.current_state(), inner);
    }

    #[test]
    fn failed_guard_consumes_event() {
        let mut builder = StateMachineBuilder::<()>::new();
        let outer = builder.state("outer");
        let inner = builder.child("inner", outer);
        let blocked = builder.state("blocked");
        let fallback = builder.state("fallback");
        let go = builder.event("go");
        builder
            .initial(inner)
            .transition(
                TransitionBuilder::new()
                    .from(inner)
                    .on(go)
                    .when("never", |_| false)
                    .to(blocked),
            )
            .unwrap()
            .transition(TransitionBuilder::new().from(outer).on(go).to(fallback))
            .unwrap();

        let mut machine = Machine::init(builder.build().unwrap()).unwrap();
        machine.transition(go);
        assert_eq!(machine.current_state(), inner);
    }

    #[test]
    fn first_matching_row_wins() {
        let mut builder = StateMachineBuilder::<()>::new();
        let a = builder.state("a");
        let b = builder.state("b");
        let c = builder.state("c");
        let go = builder.event("go");
        builder
            .initial(a)
            .transition(TransitionBuilder::new().from(a).on(go).to(b))
            .unwrap()
            .transition(TransitionBuilder::new().from(a).on(go).to(c))
            .unwrap();

        let mut machine = Machine::init(builder.build().unwrap()).unwrap();
        machine.transition(go);
        assert_eq!(machine.current_state(), b);
    }

    #[test]
    fn guard_reads_state_data() {
        let mut builder = StateMachineBuilder::new();
        let armed = builder.add_state(StateSpec::new("armed").data(3));
        let fired = builder.state("fired");
        let trigger = builder.event("trigger");
        builder
            .initial(armed)
            .transition(
                TransitionBuilder::new()
                    .from(armed)
                    .on(trigger)
                    .when("charged", move |m: &Machine<i32>| {
                        m.state_data(armed).is_some_and(|charge| *charge > 5)
                    })
                    .to(fired),
            )
            .unwrap();

        let mut machine = Machine::init(builder.build().unwrap()).unwrap();
        machine.transition(trigger);
        assert_eq!(machine.current_state(), armed);

        *machine.state_data_mut(armed).unwrap() = 9;
        machine.transition(trigger);
        assert_eq!(machine.current_state(), fired);
    }

    #[test]
    fn action_runs_before_leaving_source() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut builder = StateMachineBuilder::<()>::new();
        let a = builder.state("A");
        let b = builder.state("B");
        let evt1 = builder.event("evt1");
        let recorder = Arc::clone(&seen);
        builder
            .initial(a)
            .transition(
                TransitionBuilder::new()
                    .from(a)
                    .on(evt1)
                    .run("note", move |m| {
                        recorder.lock().unwrap().push(m.current_state_name().to_string());
                    })
                    .to(b),
            )
            .unwrap();

        let mut machine = Machine::init(builder.build().unwrap()).unwrap();
        machine.transition(evt1);

        assert_eq!(*seen.lock().unwrap(), vec!["A"]);
        assert_eq!(machine.current_state(), b);
    }

    #[test]
    fn null_rows_chain_through_composites() {
        let mut builder = StateMachineBuilder::<()>::new();
        let idle = builder.state("idle");
        let active = builder.state("active");
        let stage = builder.child("stage", active);
        let step = builder.child("step", stage);
        let go = builder.event("go");
        builder
            .initial(idle)
            .transition(TransitionBuilder::new().from(idle).on(go).to(active))
            .unwrap()
            .transition(TransitionBuilder::new().from(active).on_null().to(stage))
            .unwrap()
            .transition(TransitionBuilder::new().from(stage).on_null().to(step))
            .unwrap();

        let mut machine = Machine::init(builder.build().unwrap()).unwrap();
        machine.transition(go);
        assert_eq!(machine.current_state(), step);
        assert!(machine.is_in(active));
    }

    #[test]
    fn null_rows_do_not_propagate_to_parents() {
        let mut builder = StateMachineBuilder::<()>::new();
        let parent = builder.state("parent");
        let first = builder.child("first", parent);
        let second = builder.child("second", parent);
        let next = builder.event("next");
        builder
            .initial(parent)
            .transition(TransitionBuilder::new().from(parent).on_null().to(first))
            .unwrap()
            .transition(TransitionBuilder::new().from(first).on(next).to(second))
            .unwrap();

        let mut machine = Machine::init(builder.build().unwrap()).unwrap();
        assert_eq!(machine.current_state(), first);

        machine.transition(next);
        assert_eq!(machine.current_state(), second);
    }

    #[test]
    fn null_chain_is_bounded() {
        let mut builder = StateMachineBuilder::<()>::new();
        let ping = builder.state("ping");
        let pong = builder.state("pong");
        builder
            .config(MachineConfig {
                null_chain_limit: 3,
                ..MachineConfig::default()
            })
            .initial(ping)
            .transition(TransitionBuilder::new().from(ping).on_null().to(pong))
            .unwrap()
            .transition(TransitionBuilder::new().from(pong).on_null().to(ping))
            .unwrap();

        // start -> ping -> pong -> ping, then the chain is cut.
        let machine = Machine::init(builder.build().unwrap()).unwrap();
        assert_eq!(machine.current_state(), ping);
        assert_eq!(machine.history(pong), None);
    }

    #[test]
    fn reentrant_transition_is_ignored() {
        let mut builder = StateMachineBuilder::<()>::new();
        let a = builder.state("a");
        let c = builder.state("c");
        let go = builder.event("go");
        let jump = builder.event("jump");
        let b = builder.add_state(StateSpec::<()>::new("b").on_entry(move |machine, _, _| {
            machine.transition(jump);
            assert!(machine.terminate().is_err());
        }));
        builder
            .initial(a)
            .transition(TransitionBuilder::new().from(a).on(go).to(b))
            .unwrap()
            .transition(TransitionBuilder::new().from(b).on(jump).to(c))
            .unwrap();

        let mut machine = Machine::init(builder.build().unwrap()).unwrap();
        machine.transition(go);
        assert_eq!(machine.current_state(), b);

        machine.transition(jump);
        assert_eq!(machine.current_state(), c);
    }

    #[test]
    fn explicit_null_event_runs_only_null_chain() {
        let mut builder = StateMachineBuilder::<()>::new();
        let a = builder.state("a");
        builder.initial(a);

        let mut machine = Machine::init(builder.build().unwrap()).unwrap();
        machine.transition(EventId::NULL);
        assert_eq!(machine.current_state(), a);
    }

    #[test]
    fn internal_row_runs_action_in_place() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (entry_log, exit_log, action_log) =
            (Arc::clone(&log), Arc::clone(&log), Arc::clone(&log));
        let mut builder = StateMachineBuilder::new();
        let outer = builder.state("outer");
        let mode = builder.add_state(
            StateSpec::new("mode")
                .parent(outer)
                .data(20)
                .on_entry(move |_, _, _| entry_log.lock().unwrap().push("entry"))
                .on_exit(move |_, _, _| exit_log.lock().unwrap().push("exit")),
        );
        let elsewhere = builder.state("elsewhere");
        let warmer = builder.event("warmer");
        builder
            .initial(mode)
            .transition(TransitionBuilder::new().from(mode).on(warmer).run(
                "adjust",
                move |m: &mut Machine<i32>| {
                    action_log.lock().unwrap().push("adjust");
                    if let Some(setting) = m.state_data_mut(mode) {
                        *setting += 1;
                    }
                },
            ))
            .unwrap()
            .transition(TransitionBuilder::new().from(outer).on(warmer).to(elsewhere))
            .unwrap()
            .trace_capacity(8);

        let mut machine = Machine::init(builder.build().unwrap()).unwrap();
        log.lock().unwrap().clear();
        let recorded = machine.trace().len();

        machine.transition(warmer);
        machine.transition(warmer);

        assert_eq!(*log.lock().unwrap(), vec!["adjust", "adjust"]);
        assert_eq!(machine.current_state(), mode);
        assert_eq!(machine.state_data(mode), Some(&22));
        assert_eq!(machine.trace().len(), recorded);
    }

    #[test]
    fn internal_null_row_ends_chain() {
        let count = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&count);
        let mut builder = StateMachineBuilder::<()>::new();
        let idle = builder.state("idle");
        builder
            .initial(idle)
            .transition(
                TransitionBuilder::new()
                    .from(idle)
                    .on_null()
                    .run("tick", move |_| *counter.lock().unwrap() += 1),
            )
            .unwrap();

        let mut machine = Machine::init(builder.build().unwrap()).unwrap();
        assert_eq!(*count.lock().unwrap(), 1);

        machine.transition(EventId::NULL);
        assert_eq!(*count.lock().unwrap(), 2);
        assert_eq!(machine.current_state(), idle);
    }
}
