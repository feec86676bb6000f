//! Assemble and run a program.

use std::io;
use std::path::PathBuf;

use nibble_lib::{Colors, FuelLimits, NoopTracer, Session};

use super::run_common::{self, PreparedProgram, ProgramInput};

pub struct RunArgs {
    pub source_text: Option<String>,
    pub source_path: Option<PathBuf>,
    pub limits: FuelLimits,
    pub cache_branches: bool,
    pub json: bool,
    pub color: bool,
}

pub fn run(args: RunArgs) {
    let session = Session::new()
        .limits(args.limits)
        .cache_branches(args.cache_branches);
    let PreparedProgram { session, code } = run_common::prepare_program(
        session,
        ProgramInput {
            source_text: args.source_text.as_deref(),
            source_path: args.source_path.as_deref(),
            color: args.color,
        },
    );

    let colors = Colors::new(args.color);
    eprintln!(
        "{}code size: {} bytes{}",
        colors.dim,
        code.byte_len(),
        colors.reset
    );

    match session.execute(&code, io::stdout().lock(), &mut NoopTracer) {
        Ok(outcome) => run_common::print_outcome(&outcome, args.json),
        Err(fault) => run_common::fail(&fault, args.json),
    }
}
