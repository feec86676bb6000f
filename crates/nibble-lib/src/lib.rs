//! Nibble: a stack machine with 4-bit instructions and a one-pass assembler.
//!
//! # Example
//!
//! ```
//! use nibble_lib::Session;
//!
//! let mut session = Session::new();
//! let mut out = Vec::new();
//! let outcome = session.run("dbl: % + : 21 dbl. 'ok' say.", &mut out).expect("run failed");
//!
//! assert_eq!(outcome.state.stack, vec![42]);
//! assert_eq!(out, b"ok\n");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod session;

#[cfg(test)]
mod session_tests;

pub use nibble_bytecode::{Bytecode, BytecodeBuilder, dump};
pub use nibble_compiler::{AssembleError, Assembler, ErrorPrinter};
pub use nibble_core::{Colors, ErrorKind, Interner};
pub use nibble_vm::{
    Fault, FuelLimits, MachineState, NoopTracer, Outcome, PrintTracer, RuntimeError, Termination,
    Tracer,
};
pub use session::Session;

/// Failure of a compile-and-run request.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Assemble(#[from] AssembleError),

    #[error(transparent)]
    Runtime(#[from] Fault),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Assemble(e) => e.kind(),
            Self::Runtime(f) => f.kind(),
        }
    }

    /// Machine state at the point of failure. Only runtime failures have one.
    pub fn state(&self) -> Option<&MachineState> {
        match self {
            Self::Assemble(_) => None,
            Self::Runtime(f) => Some(&f.state),
        }
    }
}

/// Result type for compile-and-run operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Assemble and run `source` in a fresh session with default limits.
/// Built-in output goes to standard output.
pub fn compile_and_run(source: &str) -> Result<Outcome> {
    Session::new().run(source, std::io::stdout().lock())
}
