//! Machine state visible after a run.

use serde::Serialize;

/// Snapshot of the register and operand stack.
///
/// The stack is stored bottom first; [`MachineState::top_down`] walks it in
/// display order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MachineState {
    pub register: i64,
    pub stack: Vec<i64>,
}

impl MachineState {
    /// `(slot, value)` pairs from the top of the stack down. Slot 0 is the
    /// bottom.
    pub fn top_down(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.stack.iter().copied().enumerate().rev()
    }

    pub fn top(&self) -> Option<i64> {
        self.stack.last().copied()
    }
}

impl std::fmt::Display for MachineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "A = {}", self.register)?;
        for (slot, value) in self.top_down() {
            writeln!(f, "st[{slot}] = {value}")?;
        }
        Ok(())
    }
}

/// How a successful run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Termination {
    /// Control ran off the end of the program, or returned from it.
    Completed,
    /// The halt built-in was called.
    Halted,
}

/// A successful run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub termination: Termination,
    pub state: MachineState,
}
