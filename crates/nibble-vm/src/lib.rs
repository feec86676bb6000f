//! Interpreter for nibble bytecode.
//!
//! This crate provides the virtual machine that executes packed bytecode
//! over one shared operand stack, producing the final machine state.

pub mod engine;

// Re-export commonly used items at crate root
pub use engine::{
    Fault, FuelLimits, MachineState, NoopTracer, Outcome, PrintTracer, RuntimeError,
    Termination, Tracer, VM, VMBuilder,
};
