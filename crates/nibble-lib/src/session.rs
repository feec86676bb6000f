//! Sessions: one symbol table, many runs.

use std::io::Write;

use nibble_bytecode::Bytecode;
use nibble_compiler::{AssembleError, Assembler};
use nibble_core::Interner;
use nibble_vm::{Fault, FuelLimits, NoopTracer, Outcome, Tracer, VM};

use crate::Result;

/// Assembler state plus run configuration.
///
/// Names keep their ids for the lifetime of the session. Every run starts
/// from a fresh machine.
#[derive(Debug, Clone)]
pub struct Session {
    assembler: Assembler,
    limits: FuelLimits,
    cache_branches: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            assembler: Assembler::new(),
            limits: FuelLimits::default(),
            cache_branches: true,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the limits applied to every run.
    pub fn limits(mut self, limits: FuelLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Enable or disable memoized bracket resolution.
    pub fn cache_branches(mut self, enabled: bool) -> Self {
        self.cache_branches = enabled;
        self
    }

    /// Symbol table built so far.
    pub fn names(&self) -> &Interner {
        self.assembler.names()
    }

    pub fn compile(&mut self, source: &str) -> std::result::Result<Bytecode, AssembleError> {
        self.assembler.assemble(source)
    }

    /// Compile `source` and run it, writing built-in output to `out`.
    pub fn run<W: Write>(&mut self, source: &str, out: W) -> Result<Outcome> {
        self.run_with(source, out, &mut NoopTracer)
    }

    pub fn run_with<W: Write, T: Tracer>(
        &mut self,
        source: &str,
        out: W,
        tracer: &mut T,
    ) -> Result<Outcome> {
        let code = self.compile(source)?;
        Ok(self.execute(&code, out, tracer)?)
    }

    /// Run already assembled code under this session's configuration.
    pub fn execute<W: Write, T: Tracer>(
        &self,
        code: &Bytecode,
        out: W,
        tracer: &mut T,
    ) -> std::result::Result<Outcome, Fault> {
        VM::builder(code, out)
            .limits(self.limits)
            .cache_branches(self.cache_branches)
            .build()
            .execute_with(tracer)
    }
}
