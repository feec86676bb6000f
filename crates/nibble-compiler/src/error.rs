//! Assembler errors.

use std::ops::Range;

use nibble_core::ErrorKind;

/// Error raised while assembling source text. Every variant carries the
/// byte span of the offending source.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AssembleError {
    #[error("unexpected character {ch:?}")]
    UnexpectedChar { ch: char, span: Range<usize> },

    #[error("unterminated string")]
    UnterminatedString { span: Range<usize> },

    #[error("name is {len} bytes long (limit is {max})")]
    NameTooLong {
        len: usize,
        max: usize,
        span: Range<usize>,
    },

    #[error("symbol table full ({capacity} names)")]
    SymbolTableFull { capacity: usize, span: Range<usize> },
}

impl AssembleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnexpectedChar { .. }
            | Self::UnterminatedString { .. }
            | Self::NameTooLong { .. } => ErrorKind::Syntax,
            Self::SymbolTableFull { .. } => ErrorKind::Capacity,
        }
    }

    pub fn span(&self) -> Range<usize> {
        match self {
            Self::UnexpectedChar { span, .. }
            | Self::UnterminatedString { span }
            | Self::NameTooLong { span, .. }
            | Self::SymbolTableFull { span, .. } => span.clone(),
        }
    }
}
