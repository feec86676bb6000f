//! Source text to packed bytecode, in one left-to-right pass.
//!
//! Names become literal ids from the symbol table. Control flow is bracket
//! structure resolved at run time, so there are no addresses to patch and
//! independently assembled fragments can be concatenated as they are.

use std::ops::Range;

use nibble_bytecode::{Bytecode, BytecodeBuilder, Opcode, RESERVED_NAMES, bcd};
use nibble_core::{DEFAULT_CAPACITY, Interner, MAX_NAME_LEN};

use super::error::AssembleError;
use super::lexer::{TokenKind, lex, token_text};

/// Assembler with a symbol table that outlives individual assemblies.
///
/// Reserved names (`top`, `say`, `hlt`, `_entry`) are interned first, so
/// their ids are fixed.
#[derive(Debug, Clone)]
pub struct Assembler {
    names: Interner,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::with_capacity_limit(DEFAULT_CAPACITY)
    }
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembler whose symbol table holds at most `capacity` names,
    /// reserved names included.
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            names: Interner::with_names(RESERVED_NAMES, capacity),
        }
    }

    /// Symbol table built so far.
    pub fn names(&self) -> &Interner {
        &self.names
    }

    pub fn assemble(&mut self, source: &str) -> Result<Bytecode, AssembleError> {
        let mut out = BytecodeBuilder::new();
        self.assemble_into(source, &mut out)?;
        Ok(out.finish())
    }

    /// Append the code for `source` to `out`.
    ///
    /// On error, `out` holds the code emitted before the failing token, and
    /// names seen before it stay interned.
    pub fn assemble_into(
        &mut self,
        source: &str,
        out: &mut BytecodeBuilder,
    ) -> Result<(), AssembleError> {
        for token in lex(source) {
            let text = token_text(source, &token);
            let span = token.span;

            match token.kind {
                TokenKind::Whitespace => {}
                TokenKind::Name => {
                    let id = self.intern(text, span)?;
                    out.literal(id);
                }
                TokenKind::CallName => {
                    let name = &text[..text.len() - 1];
                    let id = self.intern(name, span.start..span.end - 1)?;
                    out.literal(id);
                    out.op(Opcode::Call);
                }
                TokenKind::PrefixCall => {
                    let id = self.intern(&text[1..], span.start + 1..span.end)?;
                    out.literal(id);
                    out.op(Opcode::Call);
                }
                TokenKind::Number => out.decimal(text),
                TokenKind::Str => emit_string(&text[1..text.len() - 1], out),
                TokenKind::Percent => {
                    // Index with an empty-digit zero literal.
                    out.op(Opcode::Literal);
                    out.emit(bcd::PLAIN_END);
                    out.op(Opcode::Index);
                }
                TokenKind::Unexpected => {
                    let ch = text.chars().next().unwrap_or('\u{FFFD}');
                    return Err(AssembleError::UnexpectedChar { ch, span });
                }
                TokenKind::UnterminatedStr => {
                    return Err(AssembleError::UnterminatedString { span });
                }
                kind => {
                    if let Some(op) = kind.opcode() {
                        out.op(op);
                    }
                }
            }
        }

        Ok(())
    }

    fn intern(&mut self, name: &str, span: Range<usize>) -> Result<u64, AssembleError> {
        if name.len() > MAX_NAME_LEN {
            return Err(AssembleError::NameTooLong {
                len: name.len(),
                max: MAX_NAME_LEN,
                span,
            });
        }

        let sym = self
            .names
            .intern(name)
            .map_err(|e| AssembleError::SymbolTableFull {
                capacity: e.capacity,
                span,
            })?;
        Ok(u64::from(sym.as_u32()))
    }
}

/// A zero marker, then one literal per byte, so that `say` finds the bytes
/// above the marker in source order.
fn emit_string(content: &str, out: &mut BytecodeBuilder) {
    out.literal(0);

    let mut bytes = content.bytes();
    while let Some(b) = bytes.next() {
        let b = if b == b'\\' { bytes.next().unwrap_or(b) } else { b };
        out.literal(u64::from(b));
    }
}
