//! Runtime engine for executing nibble bytecode.
//!
//! A run owns all of its state (stack, register, frames, function table,
//! branch cache), so independent runs never interfere.

mod branch;
mod builtins;
mod error;
mod frame;
mod functions;
mod state;
mod trace;
mod vm;

#[cfg(test)]
mod branch_tests;

pub use error::{Fault, RuntimeError};
pub use state::{MachineState, Outcome, Termination};
pub use trace::{NoopTracer, PrintTracer, Tracer};
pub use vm::{FuelLimits, VM, VMBuilder};
