//! Native functions, dispatched by id when no body is bound.

use std::io::Write;

use nibble_bytecode::Builtin;

use super::error::RuntimeError;
use super::state::Termination;
use super::trace::Tracer;
use super::vm::{Flow, VM};

impl<W: Write> VM<'_, W> {
    pub(super) fn exec_builtin<T: Tracer>(
        &mut self,
        id: i64,
        tracer: &mut T,
    ) -> Result<Flow, RuntimeError> {
        let builtin =
            Builtin::from_id(id).ok_or(RuntimeError::UnknownBuiltin { ip: self.at, id })?;
        tracer.trace_builtin(builtin);

        match builtin {
            Builtin::Top => {
                let value = *self
                    .stack
                    .last()
                    .ok_or(RuntimeError::StackUnderflow { ip: self.at })?;
                writeln!(self.out, "top: {value}")?;
            }
            Builtin::Say => self.say()?,
            Builtin::Halt => return Ok(Flow::Done(Termination::Halted)),
        }

        Ok(Flow::Continue)
    }

    /// Write the values above the topmost zero as bytes, bottom to top, then
    /// drop them together with the zero. Without a zero the whole stack is
    /// the string.
    fn say(&mut self) -> Result<(), RuntimeError> {
        let marker = self.stack.iter().rposition(|&v| v == 0);
        let start = marker.map_or(0, |m| m + 1);

        let mut line: Vec<u8> = self.stack[start..].iter().map(|&v| v as u8).collect();
        line.push(b'\n');
        self.out.write_all(&line)?;

        self.stack.truncate(marker.unwrap_or(0));
        Ok(())
    }
}
