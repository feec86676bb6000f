//! Human-readable disassembly.
//!
//! One instruction per line:
//!
//! ```text
//! 0000  #  lit 3
//! 0003  .  call
//! ```
//!
//! Literals consumed directly by a call or define are annotated with the
//! symbol name when a table is supplied.

use nibble_core::{Colors, Interner};

use super::bcd;
use super::code::Bytecode;
use super::opcode::Opcode;

/// Render `code` as a listing.
///
/// A malformed literal ends the listing: the nibbles after it cannot be
/// split into instructions reliably.
pub fn dump(code: &Bytecode, names: Option<&Interner>, colors: Colors) -> String {
    let c = colors;
    let mut out = String::new();
    let mut ip = 0;

    while let Some(op) = code.opcode_at(ip) {
        out.push_str(&format!(
            "{}{ip:04}{}  {}  {}{}{}",
            c.dim,
            c.reset,
            op.symbol(),
            c.blue,
            op.mnemonic(),
            c.reset
        ));
        ip += 1;

        if op == Opcode::Literal {
            match bcd::decode(code, ip) {
                Ok(lit) => {
                    out.push_str(&format!(" {}{}{}", c.green, lit.value, c.reset));
                    ip = lit.next;
                    if let Some(name) = names.and_then(|n| callee_name(code, ip, n, lit.value)) {
                        out.push_str(&format!("  {}; {name}{}", c.dim, c.reset));
                    }
                }
                Err(e) => {
                    out.push_str(&format!("  {}; {e}{}\n", c.dim, c.reset));
                    break;
                }
            }
        }

        out.push('\n');
    }

    out
}

fn callee_name<'n>(code: &Bytecode, next: usize, names: &'n Interner, id: i64) -> Option<&'n str> {
    match code.opcode_at(next)? {
        Opcode::Call | Opcode::Define => names.try_resolve_id(id),
        _ => None,
    }
}
