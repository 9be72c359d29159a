//! End-to-end behaviour of machines built through the public API.

use hfsm::builder::{
    guarded_transition, simple_transition, StateMachineBuilder, StateSpec, TransitionBuilder,
};
use hfsm::core::{EventId, Guard, StateId};
use hfsm::engine::{Machine, MachineConfig};
use hfsm::{events, states};
use std::sync::{Arc, Mutex};

type Log = Arc<Mutex<Vec<String>>>;

fn traced(log: &Log, name: &str) -> StateSpec<()> {
    let (entry_log, exit_log) = (Arc::clone(log), Arc::clone(log));
    let (entry_name, exit_name) = (name.to_string(), name.to_string());
    StateSpec::new(name)
        .on_entry(move |_, _, completed| {
            let mark = if completed { "!" } else { "" };
            entry_log.lock().unwrap().push(format!("+{entry_name}{mark}"));
        })
        .on_exit(move |_, _, completed| {
            let mark = if completed { "!" } else { "" };
            exit_log.lock().unwrap().push(format!("-{exit_name}{mark}"));
        })
}

fn drain(log: &Log) -> Vec<String> {
    std::mem::take(&mut *log.lock().unwrap())
}

#[test]
fn start_row_then_single_event() {
    let mut builder = StateMachineBuilder::<()>::new();
    states!(builder; a, b);
    events!(builder; evt1);
    builder
        .add_transition(simple_transition(StateId::START, EventId::NULL, a))
        .add_transition(simple_transition(a, evt1, b));

    let mut machine = Machine::init(builder.build().unwrap()).unwrap();
    assert_eq!(machine.current_state_name(), "a");

    machine.transition(evt1);
    assert_eq!(machine.current_state_name(), "b");
}

#[test]
fn self_transition_skips_ancestors() {
    let log = Log::default();
    let mut builder = StateMachineBuilder::new();
    let outer = builder.add_state(traced(&log, "outer"));
    let inner = builder.add_state(traced(&log, "inner").parent(outer));
    events!(builder; poke);
    builder
        .initial(inner)
        .add_transition(simple_transition(inner, poke, inner));

    let mut machine = Machine::init(builder.build().unwrap()).unwrap();
    drain(&log);

    machine.transition(poke);
    assert_eq!(drain(&log), vec!["-inner!", "+inner!"]);
}

#[test]
fn deep_leaves_exit_and_enter_around_shared_ancestor() {
    let log = Log::default();
    let mut builder = StateMachineBuilder::new();
    let root = builder.add_state(traced(&log, "root"));
    let x = builder.add_state(traced(&log, "x").parent(root));
    let x1 = builder.add_state(traced(&log, "x1").parent(x));
    let x2 = builder.add_state(traced(&log, "x2").parent(x1));
    let y = builder.add_state(traced(&log, "y").parent(root));
    let y1 = builder.add_state(traced(&log, "y1").parent(y));
    events!(builder; cross);
    builder
        .initial(x2)
        .add_transition(simple_transition(x2, cross, y1));

    let mut machine = Machine::init(builder.build().unwrap()).unwrap();
    assert_eq!(drain(&log), vec!["+root", "+x", "+x1", "+x2!"]);

    machine.transition(cross);
    assert_eq!(drain(&log), vec!["-x2", "-x1", "-x!", "+y", "+y1!"]);
    assert!(machine.is_in(root));
    assert!(!machine.is_in(x));
}

#[test]
fn composite_resumes_deep_history() {
    let mut builder = StateMachineBuilder::<()>::new();
    states!(builder; player, playing: player, track: playing, paused);
    events!(builder; pause, resume);
    builder
        .initial(track)
        .add_transition(simple_transition(player, pause, paused))
        .add_transition(simple_transition(paused, resume, player));

    let mut machine = Machine::init(builder.build().unwrap()).unwrap();
    machine.transition(pause);
    assert_eq!(machine.current_state(), paused);
    assert_eq!(machine.history(player), Some(playing));
    assert_eq!(machine.history(playing), Some(track));

    machine.transition(resume);
    assert_eq!(machine.current_state(), track);
}

#[test]
fn guard_blocks_without_propagating() {
    let mut builder = StateMachineBuilder::new();
    let door = builder.add_state(StateSpec::new("door").data(false));
    let closed = builder.add_state(StateSpec::new("closed").parent(door));
    let open = builder.state("open");
    let alarm = builder.state("alarm");
    events!(builder; push);

    let unlocked = Guard::new("unlocked", move |m: &Machine<bool>| {
        m.state_data(door).copied().unwrap_or(false)
    });
    builder
        .initial(closed)
        .add_transition(guarded_transition(closed, push, unlocked, open))
        .add_transition(simple_transition(door, push, alarm));

    let mut machine = Machine::init(builder.build().unwrap()).unwrap();
    machine.transition(push);
    assert_eq!(machine.current_state(), closed);

    *machine.state_data_mut(door).unwrap() = true;
    machine.transition(push);
    assert_eq!(machine.current_state(), open);
}

#[test]
fn null_rows_fall_through_several_composites() {
    let mut builder = StateMachineBuilder::<()>::new();
    states!(builder; off, on, mode: on, level: mode);
    events!(builder; power);
    builder
        .initial(off)
        .add_transition(simple_transition(off, power, on))
        .add_transition(simple_transition(on, EventId::NULL, mode))
        .add_transition(simple_transition(mode, EventId::NULL, level))
        .add_transition(simple_transition(on, power, off))
        .trace_capacity(16);

    let mut machine = Machine::init(builder.build().unwrap()).unwrap();
    machine.transition(power);

    assert_eq!(machine.current_state(), level);
    assert_eq!(machine.trace().get_path(), vec![StateId::START, off, on, mode, level]);

    machine.transition(power);
    assert_eq!(machine.current_state(), off);
}

#[test]
fn internal_row_stays_put_and_consumes_event() {
    let log = Log::default();
    let action_log = Arc::clone(&log);
    let mut builder = StateMachineBuilder::new();
    let running = builder.add_state(traced(&log, "running"));
    let cooling = builder.add_state(traced(&log, "cooling").parent(running));
    let stopped = builder.add_state(traced(&log, "stopped"));
    events!(builder; warmer);
    builder
        .initial(cooling)
        .add_transition(simple_transition(running, warmer, stopped))
        .transition(
            TransitionBuilder::new()
                .from(cooling)
                .on(warmer)
                .run("adjust", move |_| action_log.lock().unwrap().push("adjust".to_string())),
        )
        .unwrap();

    let mut machine = Machine::init(builder.build().unwrap()).unwrap();
    drain(&log);

    machine.transition(warmer);
    assert_eq!(drain(&log), vec!["adjust"]);
    assert_eq!(machine.current_state(), cooling);
    assert_eq!(machine.history(running), None);
}

#[test]
fn terminate_runs_exits_and_parks_machine() {
    let log = Log::default();
    let mut builder = StateMachineBuilder::new();
    let outer = builder.add_state(traced(&log, "outer"));
    let inner = builder.add_state(traced(&log, "inner").parent(outer));
    events!(builder; tick);
    builder
        .initial(inner)
        .add_transition(simple_transition(inner, tick, inner));

    let mut machine = Machine::init(builder.build().unwrap()).unwrap();
    drain(&log);

    machine.terminate().unwrap();
    assert_eq!(drain(&log), vec!["-inner", "-outer!"]);
    assert!(machine.is_terminated());

    machine.transition(tick);
    machine.update();
    assert!(drain(&log).is_empty());
    assert!(machine.terminate().is_err());
}

#[test]
fn config_loaded_from_json_limits_depth() {
    let config = MachineConfig::from_json(r#"{ "max_depth": 2 }"#).unwrap();
    let mut builder = StateMachineBuilder::<()>::new();
    builder.config(config);
    states!(builder; one, two: one, three: two);
    builder.initial(three);

    let error = builder.build().unwrap_err();
    assert!(error.to_string().contains("violation"), "{error}");
}

#[test]
fn snapshot_lists_hierarchy() {
    let mut builder = StateMachineBuilder::<()>::new();
    states!(builder; idle, busy, io: busy);
    builder.initial(idle);
    let machine = Machine::init(builder.build().unwrap()).unwrap();

    let snapshot = machine.snapshot().unwrap();
    let listed: Vec<_> = snapshot
        .states
        .iter()
        .map(|entry| (entry.name.as_str(), entry.depth))
        .collect();
    assert_eq!(
        listed,
        vec![("start", 1), ("end", 1), ("idle", 1), ("busy", 1), ("io", 2)]
    );
    let _ = io;
}
