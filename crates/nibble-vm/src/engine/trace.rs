//! Tracing infrastructure for debugging VM execution.
//!
//! # Design: Zero-Cost Abstraction
//!
//! The VM is generic over [`Tracer`]. With [`NoopTracer`] every hook is an
//! `#[inline(always)]` empty function, so the compiler removes the calls and
//! their arguments. No tracing state lives in the VM itself.
//!
//! [`PrintTracer`] collects one line per instruction plus indented sub-lines
//! for the events an instruction causes:
//!
//! ```text
//! 0000  #  lit 3
//! 0003  #  lit 4
//! 0006  .  call
//!         call dbl [4..9)
//! ```

use nibble_bytecode::{Builtin, CodeRange, Opcode};
use nibble_core::{Colors, Interner};

/// Tracer trait for VM execution instrumentation.
///
/// All methods receive raw data (positions, ids) that the VM already has.
/// Formatting and name resolution happen in the tracer implementation.
pub trait Tracer {
    /// Called before executing an instruction.
    fn trace_instruction(&mut self, ip: usize, op: Opcode);

    /// Called after a literal is decoded, before it is pushed.
    fn trace_literal(&mut self, value: i64);

    /// Called when a bracket transfers control.
    fn trace_branch(&mut self, from: usize, to: usize, cached: bool);

    /// Called after a body is bound to an id.
    fn trace_define(&mut self, id: i64, body: CodeRange);

    /// Called when entering a defined function.
    fn trace_call(&mut self, id: i64, body: CodeRange);

    /// Called when dispatching to a built-in.
    fn trace_builtin(&mut self, builtin: Builtin);

    /// Called when a range is left. `None` means the top level returned.
    fn trace_return(&mut self, to: Option<usize>);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_instruction(&mut self, _ip: usize, _op: Opcode) {}

    #[inline(always)]
    fn trace_literal(&mut self, _value: i64) {}

    #[inline(always)]
    fn trace_branch(&mut self, _from: usize, _to: usize, _cached: bool) {}

    #[inline(always)]
    fn trace_define(&mut self, _id: i64, _body: CodeRange) {}

    #[inline(always)]
    fn trace_call(&mut self, _id: i64, _body: CodeRange) {}

    #[inline(always)]
    fn trace_builtin(&mut self, _builtin: Builtin) {}

    #[inline(always)]
    fn trace_return(&mut self, _to: Option<usize>) {}
}

const SUBLINE_INDENT: &str = "        ";

/// Tracer that collects execution trace for debugging.
pub struct PrintTracer<'n> {
    /// Resolves function ids to names.
    names: Option<&'n Interner>,
    /// Collected trace lines.
    lines: Vec<String>,
    /// Color palette.
    colors: Colors,
}

impl<'n> PrintTracer<'n> {
    pub fn new(colors: Colors) -> Self {
        Self {
            names: None,
            lines: Vec::new(),
            colors,
        }
    }

    /// Show function names instead of raw ids.
    pub fn names(mut self, names: &'n Interner) -> Self {
        self.names = Some(names);
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All lines, newline-terminated.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Print all trace lines.
    pub fn print(&self) {
        print!("{}", self.render());
    }

    fn function_name(&self, id: i64) -> String {
        let c = self.colors;
        match self.names.and_then(|n| n.try_resolve_id(id)) {
            Some(name) => format!("{}{name}{}", c.blue, c.reset),
            None => format!("{}#{id}{}", c.blue, c.reset),
        }
    }

    fn add_subline(&mut self, content: String) {
        self.lines.push(format!("{SUBLINE_INDENT}{content}"));
    }
}

impl Tracer for PrintTracer<'_> {
    fn trace_instruction(&mut self, ip: usize, op: Opcode) {
        let c = self.colors;
        self.lines.push(format!(
            "{}{ip:04}{}  {}  {}{}{}",
            c.dim,
            c.reset,
            op.symbol(),
            c.blue,
            op.mnemonic(),
            c.reset
        ));
    }

    fn trace_literal(&mut self, value: i64) {
        let c = self.colors;
        // The value belongs on the `lit` line that precedes it.
        if let Some(last) = self.lines.last_mut() {
            last.push_str(&format!(" {}{value}{}", c.green, c.reset));
        }
    }

    fn trace_branch(&mut self, _from: usize, to: usize, cached: bool) {
        let c = self.colors;
        let note = if cached {
            format!(" {}(cached){}", c.dim, c.reset)
        } else {
            String::new()
        };
        self.add_subline(format!("jump → {to:04}{note}"));
    }

    fn trace_define(&mut self, id: i64, body: CodeRange) {
        let name = self.function_name(id);
        self.add_subline(format!("define {name} {body}"));
    }

    fn trace_call(&mut self, id: i64, body: CodeRange) {
        let name = self.function_name(id);
        self.add_subline(format!("call {name} {body}"));
    }

    fn trace_builtin(&mut self, builtin: Builtin) {
        let c = self.colors;
        self.add_subline(format!("builtin {}{builtin}{}", c.blue, c.reset));
    }

    fn trace_return(&mut self, to: Option<usize>) {
        match to {
            Some(ip) => self.add_subline(format!("return → {ip:04}")),
            None => self.add_subline("return (top level)".to_string()),
        }
    }
}
