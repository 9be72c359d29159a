//! Rendering the static state hierarchy.

use crate::engine::error::MachineError;
use crate::engine::machine::Machine;
use serde::{Deserialize, Serialize};

/// Receives one line per state during [`Machine::dump`].
///
/// `depth` is 1 for top-level states. Any `FnMut(&str, usize)` closure is a
/// renderer.
pub trait Renderer {
    fn render(&mut self, name: &str, depth: usize);
}

impl<F> Renderer for F
where
    F: FnMut(&str, usize),
{
    fn render(&mut self, name: &str, depth: usize) {
        self(name, depth)
    }
}

/// Prints each state on its own line, indented two spaces per level.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutRenderer;

impl Renderer for StdoutRenderer {
    fn render(&mut self, name: &str, depth: usize) {
        println!("{}", indented(name, depth));
    }
}

fn indented(name: &str, depth: usize) -> String {
    format!("{:indent$}{name}", "", indent = depth.saturating_sub(1) * 2)
}

/// One state in a [`StateTreeSnapshot`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpEntry {
    pub name: String,
    pub depth: usize,
}

/// Serializable pre-order listing of the state hierarchy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTreeSnapshot {
    pub states: Vec<DumpEntry>,
}

impl StateTreeSnapshot {
    pub fn to_json(&self) -> Result<String, MachineError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, MachineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render the snapshot as indented text, one state per line.
    pub fn to_text(&self) -> String {
        self.states
            .iter()
            .map(|entry| indented(&entry.name, entry.depth) + "\n")
            .collect()
    }
}

impl<D> Machine<D> {
    /// Walk the state tree depth-first, children before siblings, handing
    /// every state's name and depth to `renderer`.
    ///
    /// The reserved `start` and `end` states are included.
    pub fn dump<R>(&self, renderer: &mut R) -> Result<(), MachineError>
    where
        R: Renderer + ?Sized,
    {
        let tree = self.chart.tree();
        for (depth, state) in tree.iter()? {
            renderer.render(self.name_of(*state), depth);
        }
        Ok(())
    }

    pub fn dump_stdout(&self) -> Result<(), MachineError> {
        self.dump(&mut StdoutRenderer)
    }

    pub fn snapshot(&self) -> Result<StateTreeSnapshot, MachineError> {
        let mut states = Vec::with_capacity(self.chart.tree().len());
        self.dump(&mut |name: &str, depth: usize| {
            states.push(DumpEntry {
                name: name.to_string(),
                depth,
            })
        })?;
        Ok(StateTreeSnapshot { states })
    }
}
