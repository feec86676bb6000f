//! Packed nibble storage.
//!
//! Code is addressed by nibble index: an even index selects the low half of
//! a byte, an odd index the high half. A buffer of `n` nibbles occupies
//! `n.div_ceil(2)` bytes; the spare high half of the last byte is zero.

use super::bcd;
use super::opcode::Opcode;

/// Half-open nibble range `[start, end)` within a [`Bytecode`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct CodeRange {
    pub start: usize,
    pub end: usize,
}

impl CodeRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    #[inline]
    pub fn contains(&self, ip: usize) -> bool {
        (self.start..self.end).contains(&ip)
    }
}

impl std::fmt::Display for CodeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}..{})", self.start, self.end)
    }
}

/// Immutable packed bytecode.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Bytecode {
    bytes: Vec<u8>,
    len: usize,
}

impl Bytecode {
    /// Pack a sequence of nibbles. Only the low four bits of each item are kept.
    pub fn from_nibbles(nibbles: impl IntoIterator<Item = u8>) -> Self {
        let mut builder = BytecodeBuilder::new();
        for n in nibbles {
            builder.emit(n);
        }
        builder.finish()
    }

    /// Number of nibbles.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of the packed form in bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The whole buffer as a range.
    #[inline]
    pub fn full_range(&self) -> CodeRange {
        CodeRange::new(0, self.len)
    }

    /// Nibble at `ip`, or None past the end.
    #[inline]
    pub fn get(&self, ip: usize) -> Option<u8> {
        if ip >= self.len {
            return None;
        }
        let byte = self.bytes[ip / 2];
        Some(if ip & 1 == 1 { byte >> 4 } else { byte & 0xF })
    }

    #[inline]
    pub fn opcode_at(&self, ip: usize) -> Option<Opcode> {
        self.get(ip).map(Opcode::from_nibble)
    }

    pub fn nibbles(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.len).filter_map(|ip| self.get(ip))
    }
}

impl std::fmt::Debug for Bytecode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Bytecode(")?;
        for n in self.nibbles() {
            write!(f, "{n:X}")?;
        }
        f.write_str(")")
    }
}

/// Append-only nibble writer.
#[derive(Debug, Default)]
pub struct BytecodeBuilder {
    bytes: Vec<u8>,
    len: usize,
}

impl BytecodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nibbles written so far (the index of the next nibble).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn emit(&mut self, nibble: u8) {
        let nibble = nibble & 0xF;
        if self.len & 1 == 1 {
            if let Some(last) = self.bytes.last_mut() {
                *last |= nibble << 4;
            }
        } else {
            self.bytes.push(nibble);
        }
        self.len += 1;
    }

    pub fn op(&mut self, op: Opcode) {
        self.emit(op.nibble());
    }

    /// Emit a literal instruction for `value`.
    pub fn literal(&mut self, value: u64) {
        self.op(Opcode::Literal);
        for n in bcd::encode(value) {
            self.emit(n);
        }
    }

    /// Emit a literal instruction for a decimal numeral of any length.
    pub fn decimal(&mut self, digits: &str) {
        self.op(Opcode::Literal);
        for n in bcd::encode_decimal(digits) {
            self.emit(n);
        }
    }

    /// Append another buffer. Brackets resolve structurally at run time, so
    /// no relocation is needed.
    pub fn extend(&mut self, code: &Bytecode) {
        for n in code.nibbles() {
            self.emit(n);
        }
    }

    pub fn finish(self) -> Bytecode {
        Bytecode {
            bytes: self.bytes,
            len: self.len,
        }
    }
}
