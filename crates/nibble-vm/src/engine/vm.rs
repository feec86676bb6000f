//! Virtual machine for executing packed nibble bytecode.

use std::io::Write;

use nibble_bytecode::{Bytecode, CodeRange, ENTRY_ID, Opcode, bcd};

use super::branch::BranchCache;
use super::error::{Fault, RuntimeError};
use super::frame::{Frame, FrameStack};
use super::functions::{FunctionTable, find_definition_end};
use super::state::{MachineState, Outcome, Termination};
use super::trace::{NoopTracer, Tracer};

/// Runtime limits for one run.
#[derive(Clone, Copy, Debug)]
pub struct FuelLimits {
    /// Maximum instructions executed (default: unlimited).
    pub(crate) exec_fuel: Option<u64>,
    /// Maximum call depth (default: 1,024).
    pub(crate) recursion_limit: u32,
    /// Maximum operand stack size (default: 65,536).
    pub(crate) stack_limit: usize,
}

impl Default for FuelLimits {
    fn default() -> Self {
        Self {
            exec_fuel: None,
            recursion_limit: 1024,
            stack_limit: 65_536,
        }
    }
}

impl FuelLimits {
    /// Create new fuel limits with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the execution fuel limit.
    pub fn exec_fuel(mut self, fuel: u64) -> Self {
        self.exec_fuel = Some(fuel);
        self
    }

    /// Set the recursion limit.
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// Set the operand stack limit.
    pub fn stack_limit(mut self, limit: usize) -> Self {
        self.stack_limit = limit;
        self
    }

    pub fn get_exec_fuel(&self) -> Option<u64> {
        self.exec_fuel
    }
    pub fn get_recursion_limit(&self) -> u32 {
        self.recursion_limit
    }
    pub fn get_stack_limit(&self) -> usize {
        self.stack_limit
    }
}

/// What the loop does after an instruction.
pub(super) enum Flow {
    Continue,
    Done(Termination),
}

/// Virtual machine state for one run over one program.
pub struct VM<'c, W> {
    pub(crate) code: &'c Bytecode,
    /// Sink for built-in output.
    pub(crate) out: W,
    pub(crate) stack: Vec<i64>,
    pub(crate) register: i64,
    /// Next nibble to fetch.
    pub(crate) ip: usize,
    /// Nibble index of the instruction being executed, for error context.
    pub(crate) at: usize,
    /// Active code range: the whole program or the current function body.
    pub(crate) range: CodeRange,
    pub(crate) frames: FrameStack,
    pub(crate) functions: FunctionTable,
    pub(crate) branches: BranchCache,

    // Fuel tracking
    pub(crate) exec_fuel: Option<u64>,
    pub(crate) limits: FuelLimits,
}

/// Builder for VM instances.
pub struct VMBuilder<'c, W> {
    code: &'c Bytecode,
    out: W,
    limits: FuelLimits,
    cache_branches: bool,
}

impl<'c, W: Write> VMBuilder<'c, W> {
    /// Create a new VM builder.
    pub fn new(code: &'c Bytecode, out: W) -> Self {
        Self {
            code,
            out,
            limits: FuelLimits::default(),
            cache_branches: true,
        }
    }

    /// Set the fuel limits.
    pub fn limits(mut self, limits: FuelLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the execution fuel limit.
    pub fn exec_fuel(mut self, fuel: u64) -> Self {
        self.limits = self.limits.exec_fuel(fuel);
        self
    }

    /// Set the recursion limit.
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.limits = self.limits.recursion_limit(limit);
        self
    }

    /// Set the operand stack limit.
    pub fn stack_limit(mut self, limit: usize) -> Self {
        self.limits = self.limits.stack_limit(limit);
        self
    }

    /// Enable or disable memoized bracket resolution (default: enabled).
    pub fn cache_branches(mut self, enabled: bool) -> Self {
        self.cache_branches = enabled;
        self
    }

    /// Build the VM.
    pub fn build(self) -> VM<'c, W> {
        let range = self.code.full_range();
        VM {
            code: self.code,
            out: self.out,
            stack: Vec::new(),
            register: 0,
            ip: range.start,
            at: range.start,
            range,
            frames: FrameStack::new(self.limits.get_recursion_limit()),
            functions: FunctionTable::new(),
            branches: BranchCache::new(self.cache_branches),
            exec_fuel: self.limits.get_exec_fuel(),
            limits: self.limits,
        }
    }
}

impl<'c, W: Write> VM<'c, W> {
    /// Create a VM builder.
    pub fn builder(code: &'c Bytecode, out: W) -> VMBuilder<'c, W> {
        VMBuilder::new(code, out)
    }

    /// Run the program to completion.
    ///
    /// This is a convenience method that uses `NoopTracer`, which gets
    /// completely optimized away at compile time.
    pub fn execute(self) -> Result<Outcome, Fault> {
        self.execute_with(&mut NoopTracer)
    }

    /// Run the program with a tracer for debugging.
    ///
    /// The tracer is generic, so `NoopTracer` calls are optimized away
    /// while `PrintTracer` calls collect execution trace.
    pub fn execute_with<T: Tracer>(mut self, tracer: &mut T) -> Result<Outcome, Fault> {
        // `_entry` re-enters the whole program.
        let bound = self.functions.define(ENTRY_ID, self.code.full_range());
        debug_assert!(bound, "entry id lies outside the function table");

        loop {
            match self.step(tracer) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Done(termination)) => {
                    return Ok(Outcome {
                        termination,
                        state: self.snapshot(),
                    });
                }
                Err(error) => {
                    return Err(Fault {
                        error,
                        state: self.snapshot(),
                    });
                }
            }
        }
    }

    fn snapshot(&mut self) -> MachineState {
        MachineState {
            register: self.register,
            stack: std::mem::take(&mut self.stack),
        }
    }

    fn step<T: Tracer>(&mut self, tracer: &mut T) -> Result<Flow, RuntimeError> {
        let Some(op) = self.fetch() else {
            return Ok(self.leave(tracer));
        };

        // Fuel check
        if let Some(fuel) = self.exec_fuel.as_mut() {
            if *fuel == 0 {
                let limit = self.limits.get_exec_fuel().unwrap_or_default();
                return Err(RuntimeError::ExecFuelExhausted(limit));
            }
            *fuel -= 1;
        }

        self.at = self.ip;
        self.ip += 1;
        tracer.trace_instruction(self.at, op);

        match op {
            Opcode::Literal => {
                let lit = bcd::decode(self.code, self.ip)?;
                self.ip = lit.next;
                tracer.trace_literal(lit.value);
                self.push(lit.value)?;
            }
            Opcode::Add => self.binary(i64::wrapping_add)?,
            Opcode::Sub => self.binary(i64::wrapping_sub)?,
            Opcode::Mul => self.binary(i64::wrapping_mul)?,
            Opcode::Index => self.exec_index()?,
            Opcode::Load => self.register = self.pop()?,
            Opcode::Push => self.push(self.register)?,
            Opcode::Drop => {
                self.pop()?;
            }
            Opcode::Swap => {
                let y = self.pop()?;
                let x = self.pop()?;
                self.push(y)?;
                self.push(x)?;
            }
            Opcode::Define => self.exec_define(tracer)?,
            Opcode::Call => return self.exec_call(tracer),
            Opcode::Return => return Ok(self.leave(tracer)),
            Opcode::OpenA => {
                if self.pop()? == 0 {
                    self.jump(op, tracer)?;
                }
            }
            Opcode::OpenB => {
                if self.pop()? <= 0 {
                    self.jump(op, tracer)?;
                }
            }
            // Both families share the one register.
            Opcode::CloseA | Opcode::CloseB => {
                if self.register != 0 {
                    self.register = self.register.wrapping_sub(1);
                    self.jump(op, tracer)?;
                }
            }
        }

        Ok(Flow::Continue)
    }

    /// Opcode at `ip`, or None once the active range is exhausted.
    #[inline]
    fn fetch(&self) -> Option<Opcode> {
        if self.ip >= self.range.end {
            return None;
        }
        self.code.opcode_at(self.ip)
    }

    pub(crate) fn push(&mut self, value: i64) -> Result<(), RuntimeError> {
        if self.stack.len() >= self.limits.get_stack_limit() {
            return Err(RuntimeError::StackOverflow {
                ip: self.at,
                limit: self.limits.get_stack_limit(),
            });
        }
        self.stack.push(value);
        Ok(())
    }

    pub(crate) fn pop(&mut self) -> Result<i64, RuntimeError> {
        self.stack
            .pop()
            .ok_or(RuntimeError::StackUnderflow { ip: self.at })
    }

    /// Pop `y`, pop `x`, push `f(x, y)`.
    fn binary(&mut self, f: fn(i64, i64) -> i64) -> Result<(), RuntimeError> {
        let y = self.pop()?;
        let x = self.pop()?;
        self.push(f(x, y))
    }

    fn exec_index(&mut self) -> Result<(), RuntimeError> {
        let index = self.pop()?;

        if index >= 0 {
            let len = self.stack.len();
            let value = usize::try_from(index)
                .ok()
                .and_then(|i| len.checked_sub(i + 1))
                .map(|slot| self.stack[slot])
                .ok_or(RuntimeError::IndexOutOfRange {
                    ip: self.at,
                    index,
                    len,
                })?;
            return self.push(value);
        }

        let value = self.pop()?;
        let len = self.stack.len();
        let slot = usize::try_from(index.unsigned_abs())
            .ok()
            .and_then(|d| len.checked_sub(d))
            .ok_or(RuntimeError::IndexOutOfRange {
                ip: self.at,
                index,
                len,
            })?;
        self.stack[slot] = value;
        Ok(())
    }

    fn exec_define<T: Tracer>(&mut self, tracer: &mut T) -> Result<(), RuntimeError> {
        let id = self.pop()?;
        let end = find_definition_end(self.code, self.ip, self.range.end)
            .ok_or(RuntimeError::UnterminatedDefinition { ip: self.at })?;
        let body = CodeRange::new(self.ip, end);

        if !self.functions.define(id, body) {
            return Err(RuntimeError::InvalidFunctionId { ip: self.at, id });
        }
        tracer.trace_define(id, body);

        self.ip = end + 1;
        Ok(())
    }

    fn exec_call<T: Tracer>(&mut self, tracer: &mut T) -> Result<Flow, RuntimeError> {
        let id = self.pop()?;

        let Some(body) = self.functions.get(id) else {
            return self.exec_builtin(id, tracer);
        };

        let frame = Frame {
            return_ip: self.ip,
            range: self.range,
            register: self.register,
        };
        if !self.frames.push(frame) {
            return Err(RuntimeError::CallDepthExceeded {
                ip: self.at,
                limit: self.frames.limit(),
            });
        }
        tracer.trace_call(id, body);

        self.range = body;
        self.ip = body.start;
        self.register = 0;
        Ok(Flow::Continue)
    }

    /// Leave the active range, resuming the caller if there is one.
    fn leave<T: Tracer>(&mut self, tracer: &mut T) -> Flow {
        let Some(frame) = self.frames.pop() else {
            tracer.trace_return(None);
            return Flow::Done(Termination::Completed);
        };
        tracer.trace_return(Some(frame.return_ip));

        self.ip = frame.return_ip;
        self.range = frame.range;
        self.register = frame.register;
        Flow::Continue
    }

    /// Move past the match of the bracket just executed.
    fn jump<T: Tracer>(&mut self, op: Opcode, tracer: &mut T) -> Result<(), RuntimeError> {
        let resolved = self
            .branches
            .resolve(self.code, self.at, op, self.range)
            .ok_or(RuntimeError::UnmatchedBracket { ip: self.at, op })?;
        tracer.trace_branch(self.at, resolved.target, resolved.cached);
        self.ip = resolved.target;
        Ok(())
    }
}
