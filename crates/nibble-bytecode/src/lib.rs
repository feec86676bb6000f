//! Bytecode format for the nibble machine.
//!
//! This crate contains:
//! - The 4-bit instruction set ([`Opcode`])
//! - The packed nibble buffer ([`Bytecode`], [`BytecodeBuilder`])
//! - The variable-length decimal literal codec ([`bcd`])
//! - Reserved built-in function ids ([`Builtin`])
//! - A human-readable disassembly ([`dump`])

pub mod bcd;
mod builtin;
mod code;
mod dump;
mod opcode;

#[cfg(test)]
mod dump_tests;
#[cfg(test)]
mod opcode_tests;

pub use bcd::{DecodeError, Decoded};
pub use builtin::{Builtin, ENTRY_ID, ENTRY_NAME, RESERVED_NAMES};
pub use code::{Bytecode, BytecodeBuilder, CodeRange};
pub use dump::dump;
pub use opcode::Opcode;
