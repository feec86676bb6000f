//! Bracket matching with a per-run cache.
//!
//! Brackets carry no target address. An open bracket jumps past its
//! matching close; a close bracket jumps to just after its matching open.
//! Matches are found by scanning with a nesting depth, counting only the
//! bracket family being resolved. Literal nibbles are always below `0xC`,
//! so raw nibbles can be scanned without decoding.

use std::collections::HashMap;

use nibble_bytecode::{Bytecode, CodeRange, Opcode};

/// A resolved jump target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolved {
    pub target: usize,
    pub cached: bool,
}

/// Memoized bracket targets, keyed by the bracket's own nibble index.
#[derive(Debug)]
pub struct BranchCache {
    targets: HashMap<usize, usize>,
    enabled: bool,
}

impl BranchCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            targets: HashMap::new(),
            enabled,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Resolve the bracket `op` at `at` within `range`.
    ///
    /// Open brackets scan forward to `range.end`, close brackets scan back
    /// to `range.start` (inclusive). Returns None if no match exists or `op`
    /// is not a bracket.
    pub fn resolve(
        &mut self,
        code: &Bytecode,
        at: usize,
        op: Opcode,
        range: CodeRange,
    ) -> Option<Resolved> {
        if self.enabled
            && let Some(&target) = self.targets.get(&at)
        {
            return Some(Resolved {
                target,
                cached: true,
            });
        }

        let partner = op.bracket_partner()?;
        let target = match op {
            Opcode::OpenA | Opcode::OpenB => scan_forward(code, at, op, partner, range.end)?,
            _ => scan_backward(code, at, op, partner, range.start)?,
        };

        if self.enabled {
            self.targets.insert(at, target);
        }

        Some(Resolved {
            target,
            cached: false,
        })
    }
}

fn scan_forward(code: &Bytecode, at: usize, open: Opcode, close: Opcode, end: usize) -> Option<usize> {
    let mut depth = 0usize;
    for ip in at + 1..end {
        let op = code.opcode_at(ip)?;
        if op == open {
            depth += 1;
        } else if op == close {
            if depth == 0 {
                return Some(ip + 1);
            }
            depth -= 1;
        }
    }
    None
}

fn scan_backward(code: &Bytecode, at: usize, close: Opcode, open: Opcode, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    for ip in (start..at).rev() {
        let op = code.opcode_at(ip)?;
        if op == close {
            depth += 1;
        } else if op == open {
            if depth == 0 {
                return Some(ip + 1);
            }
            depth -= 1;
        }
    }
    None
}
