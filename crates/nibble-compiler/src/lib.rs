#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! One-pass assembler from the symbolic source form to packed bytecode.
//!
//! ```text
//! dbl: % + :      define `dbl` as "duplicate, add"
//! 3 dbl.          call it
//! 'Hi' say.       print a string
//! ```

mod assembler;
mod error;
pub mod lexer;
mod printer;

#[cfg(test)]
mod assembler_tests;
#[cfg(test)]
mod printer_tests;

pub use assembler::Assembler;
pub use error::AssembleError;
pub use printer::ErrorPrinter;
