//! Function table and the definition-body scanner.

use nibble_bytecode::{Bytecode, CodeRange, Opcode, bcd};

/// Number of function ids. Matches the symbol table capacity, so every
/// interned name can be defined.
pub const FUNCTION_SLOTS: usize = nibble_core::DEFAULT_CAPACITY;

/// Maps ids to body ranges. An id without a body is unbound and dispatches
/// to a built-in when called.
#[derive(Debug)]
pub struct FunctionTable {
    bodies: Vec<Option<CodeRange>>,
}

impl Default for FunctionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionTable {
    pub fn new() -> Self {
        Self {
            bodies: vec![None; FUNCTION_SLOTS],
        }
    }

    /// Bind or rebind `id`. Returns false for ids outside the table.
    #[must_use]
    pub fn define(&mut self, id: i64, body: CodeRange) -> bool {
        let Some(slot) = usize::try_from(id).ok().and_then(|i| self.bodies.get_mut(i)) else {
            return false;
        };
        *slot = Some(body);
        true
    }

    /// Body bound to `id`, if any.
    #[inline]
    pub fn get(&self, id: i64) -> Option<CodeRange> {
        let index = usize::try_from(id).ok()?;
        self.bodies.get(index).copied().flatten()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scan {
    Normal,
    InLiteral,
}

/// Find the `Define` nibble that closes a body starting at `from`, searching
/// up to `end` (exclusive).
///
/// Literal digits and terminators are skipped, so a `9` digit inside a
/// literal never ends the body.
pub fn find_definition_end(code: &Bytecode, from: usize, end: usize) -> Option<usize> {
    let define = Opcode::Define.nibble();
    let literal = Opcode::Literal.nibble();
    let mut scan = Scan::Normal;

    for ip in from..end {
        let n = code.get(ip)?;
        scan = match scan {
            Scan::Normal if n == define => return Some(ip),
            Scan::Normal if n == literal => Scan::InLiteral,
            Scan::InLiteral if bcd::is_terminator(n) => Scan::Normal,
            other => other,
        };
    }

    None
}
