//! Air Conditioner State Machine
//!
//! This example demonstrates a small hierarchical machine.
//!
//! Key concepts:
//! - A composite `running` state with `cooling` and `heating` children
//! - A null row choosing the default child
//! - Per-state data (the temperature setting) changed by internal rows,
//!   which run an action without leaving the state
//! - History: restarting resumes the mode that was active when stopped
//!
//! Run with: cargo run --example air_conditioner

use hfsm::builder::{StateMachineBuilder, StateSpec, TransitionBuilder};
use hfsm::core::StateId;
use hfsm::engine::Machine;
use hfsm::events;

#[derive(Clone, Debug)]
struct Setting {
    temperature: i32,
}

fn adjust(machine: &mut Machine<Setting>, mode: StateId, delta: i32) {
    let name = machine.state_name(mode).unwrap_or("?").to_string();
    if let Some(setting) = machine.state_data_mut(mode) {
        setting.temperature += delta;
        println!("  {name}: temperature set to {}", setting.temperature);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Air Conditioner State Machine ===\n");

    let mut builder = StateMachineBuilder::new();
    let stopped = builder.add_state(
        StateSpec::new("stopped").on_entry(|_, _, _| println!("  engine stopped")),
    );
    let running = builder.add_state(
        StateSpec::new("running").on_entry(|_, _, _| println!("  engine started")),
    );
    let cooling = builder.add_state(
        StateSpec::new("cooling")
            .parent(running)
            .data(Setting { temperature: 23 })
            .on_entry(|_, setting: Option<&mut Setting>, _| {
                if let Some(setting) = setting {
                    println!("  cooling at {} degrees", setting.temperature);
                }
            }),
    );
    let heating = builder.add_state(
        StateSpec::new("heating")
            .parent(running)
            .data(Setting { temperature: 18 })
            .on_entry(|_, setting: Option<&mut Setting>, _| {
                if let Some(setting) = setting {
                    println!("  heating at {} degrees", setting.temperature);
                }
            }),
    );
    events!(builder; run, stop, cool, heat, warmer, colder);

    builder
        .initial(stopped)
        .trace_capacity(32)
        .transition(TransitionBuilder::new().from(stopped).on(run).to(running))?
        .transition(TransitionBuilder::new().from(running).on_null().to(cooling))?
        .transition(TransitionBuilder::new().from(running).on(stop).to(stopped))?
        .transition(TransitionBuilder::new().from(stopped).on(cool).to(cooling))?
        .transition(TransitionBuilder::new().from(stopped).on(heat).to(heating))?
        .transition(TransitionBuilder::new().from(cooling).on(heat).to(heating))?
        .transition(TransitionBuilder::new().from(heating).on(cool).to(cooling))?;

    for (mode, event, delta) in [
        (cooling, warmer, 1),
        (cooling, colder, -1),
        (heating, warmer, 1),
        (heating, colder, -1),
    ] {
        builder.transition(
            TransitionBuilder::new()
                .from(mode)
                .on(event)
                .run("adjust", move |m| adjust(m, mode, delta)),
        )?;
    }

    let mut machine = Machine::init(builder.build()?)?;
    println!("State hierarchy:");
    machine.dump(&mut |name: &str, depth: usize| {
        println!("  {:indent$}{name}", "", indent = (depth - 1) * 2)
    })?;
    println!("\nInitial state: {}\n", machine.current_state_name());

    for (label, event) in [
        ("Start running", run),
        ("Raise the temperature", warmer),
        ("Switch to heating", heat),
        ("Lower the temperature", colder),
        ("Stop", stop),
        ("Start again", run),
    ] {
        println!("{label}:");
        machine.transition(event);
        println!("  -> now in {}\n", machine.current_state_name());
    }

    machine.terminate()?;

    let path: Vec<_> = machine
        .trace()
        .get_path()
        .into_iter()
        .filter_map(|id| machine.state_name(id))
        .collect();
    println!("Path taken: {}", path.join(" -> "));

    println!("\n=== Example Complete ===");
    Ok(())
}
