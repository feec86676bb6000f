#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures shared by every layer of the nibble machine.
//!
//! - [`Interner`]: the symbol table mapping names to small integer ids
//! - [`ErrorKind`]: the four failure families every layer reports into
//! - [`Colors`]: ANSI palette for listings and traces

mod colors;
mod interner;


pub use colors::Colors;
pub use interner::{DEFAULT_CAPACITY, Interner, InternerFull, MAX_NAME_LEN, Symbol};

/// Failure family of a terminal error.
///
/// Every error type in the workspace maps onto exactly one kind, so a host
/// can decide presentation (message, exit status) without matching on the
/// individual variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed source text, raised by the assembler.
    Syntax,
    /// A bounded table or stack ran out of room.
    Capacity,
    /// The bytecode does not have the shape an instruction expects.
    Structural,
    /// The program did something invalid while running.
    Runtime,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Syntax => "syntax error",
            Self::Capacity => "capacity error",
            Self::Structural => "structural error",
            Self::Runtime => "runtime fault",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
