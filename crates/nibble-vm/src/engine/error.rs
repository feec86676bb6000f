//! Errors that can occur during execution.

use nibble_bytecode::{DecodeError, Opcode};
use nibble_core::ErrorKind;

use super::state::MachineState;

/// Reason a run stopped early. Positions are nibble indices of the
/// instruction that failed.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("stack underflow at nibble {ip}")]
    StackUnderflow { ip: usize },

    #[error("stack overflow at nibble {ip} (limit {limit} values)")]
    StackOverflow { ip: usize, limit: usize },

    #[error("index {index} out of range for a stack of {len} at nibble {ip}")]
    IndexOutOfRange { ip: usize, index: i64, len: usize },

    #[error("unknown built-in {id} at nibble {ip}")]
    UnknownBuiltin { ip: usize, id: i64 },

    #[error("invalid function id {id} at nibble {ip}")]
    InvalidFunctionId { ip: usize, id: i64 },

    #[error("call depth limit {limit} exceeded at nibble {ip}")]
    CallDepthExceeded { ip: usize, limit: u32 },

    #[error("unmatched {op} at nibble {ip}")]
    UnmatchedBracket { ip: usize, op: Opcode },

    #[error("definition at nibble {ip} has no terminator")]
    UnterminatedDefinition { ip: usize },

    #[error("malformed literal: {0}")]
    MalformedLiteral(#[from] DecodeError),

    #[error("output failed: {0}")]
    Io(#[from] std::io::Error),

    /// Execution fuel exhausted (too many instructions).
    #[error("execution limit of {0} instructions exceeded")]
    ExecFuelExhausted(u64),
}

impl RuntimeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::StackOverflow { .. } | Self::CallDepthExceeded { .. } => ErrorKind::Capacity,
            Self::UnmatchedBracket { .. }
            | Self::UnterminatedDefinition { .. }
            | Self::MalformedLiteral(_) => ErrorKind::Structural,
            Self::StackUnderflow { .. }
            | Self::IndexOutOfRange { .. }
            | Self::UnknownBuiltin { .. }
            | Self::InvalidFunctionId { .. }
            | Self::Io(_)
            | Self::ExecFuelExhausted(_) => ErrorKind::Runtime,
        }
    }
}

/// A failed run: the error plus the machine state at the point of failure.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct Fault {
    #[source]
    pub error: RuntimeError,
    pub state: MachineState,
}

impl Fault {
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}
