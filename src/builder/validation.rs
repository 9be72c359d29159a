//! Structural validation of a chart before it is built.
//!
//! Every check produces a `Validation`, and all of them are combined so the
//! caller sees the full list of problems in one pass.

use crate::builder::error::{BuildError, ChartViolation};
use crate::collections::Set;
use crate::core::{StateDef, StateId, TransitionRow};
use crate::engine::MachineConfig;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<ChartViolation>>;

fn pass() -> Check {
    Validation::success(())
}

fn violation(violation: ChartViolation) -> Check {
    Validation::fail(violation)
}

/// Validate states, events and rows against `config`.
pub(crate) fn validate_chart<D>(
    states: &[StateDef<D>],
    events: &[String],
    rows: &[TransitionRow<D>],
    config: &MachineConfig,
) -> Result<(), BuildError> {
    let mut checks = check_config(config);
    checks.extend(check_hierarchy(states, config));
    checks.extend(check_names(states)?);
    for (index, row) in rows.iter().enumerate() {
        checks.extend(check_row(index, row, states.len(), events.len()));
    }

    match Validation::all_vec(checks).map(|_| ()) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => Err(BuildError::InvalidChart {
            violations: errors.iter().cloned().collect(),
        }),
    }
}

fn check_config(config: &MachineConfig) -> Vec<Check> {
    let mut checks = vec![pass()];
    if config.max_depth == 0 {
        checks.push(violation(ChartViolation::InvalidConfig {
            reason: "max_depth must be at least 1".to_string(),
        }));
    }
    if config.null_chain_limit == 0 {
        checks.push(violation(ChartViolation::InvalidConfig {
            reason: "null_chain_limit must be at least 1".to_string(),
        }));
    }
    checks
}

/// Parents must be registered before their children, which keeps the
/// parent graph acyclic, and no chain may exceed `max_depth`.
fn check_hierarchy<D>(states: &[StateDef<D>], config: &MachineConfig) -> Vec<Check> {
    let mut checks = Vec::new();
    let mut depths = vec![1usize; states.len()];

    for (index, state) in states.iter().enumerate() {
        let Some(parent) = state.parent else {
            continue;
        };

        if parent.0 >= index {
            checks.push(violation(ChartViolation::UnknownParent {
                state: state.name.clone(),
                parent,
            }));
            continue;
        }
        if parent.is_reserved() {
            checks.push(violation(ChartViolation::ReservedParent {
                state: state.name.clone(),
                parent: states[parent.0].name.clone(),
            }));
            continue;
        }

        depths[index] = depths[parent.0] + 1;
        if depths[index] > config.max_depth {
            checks.push(violation(ChartViolation::DepthExceeded {
                state: state.name.clone(),
                depth: depths[index],
                max: config.max_depth,
            }));
        }
    }

    checks
}

fn check_names<D>(states: &[StateDef<D>]) -> Result<Vec<Check>, BuildError> {
    let mut seen = Set::with_capacity(states.len())?;
    let mut checks = Vec::new();

    for state in states {
        if !seen.add(state.name.as_str())? {
            checks.push(violation(ChartViolation::DuplicateStateName {
                name: state.name.clone(),
            }));
        }
    }

    Ok(checks)
}

fn check_row<D>(
    index: usize,
    row: &TransitionRow<D>,
    state_count: usize,
    event_count: usize,
) -> Vec<Check> {
    let mut checks = Vec::new();

    for state in std::iter::once(row.from).chain(row.to) {
        if state.0 >= state_count {
            checks.push(violation(ChartViolation::UnknownState { row: index, state }));
        }
    }
    if row.event.0 >= event_count {
        checks.push(violation(ChartViolation::UnknownEvent {
            row: index,
            event: row.event,
        }));
    }
    if row.from == StateId::END || row.to == Some(StateId::END) {
        checks.push(violation(ChartViolation::ReservedEndpoint { row: index }));
    }

    checks
}
