//! Trace program execution for debugging.

use std::io::{self, Write};
use std::path::PathBuf;

use nibble_lib::{Colors, FuelLimits, PrintTracer, Session};

use super::run_common::{self, PreparedProgram, ProgramInput};

pub struct TraceArgs {
    pub source_text: Option<String>,
    pub source_path: Option<PathBuf>,
    pub limits: FuelLimits,
    pub cache_branches: bool,
    pub json: bool,
    pub color: bool,
}

pub fn run(args: TraceArgs) {
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

    // Built-in output is held back so it does not interleave with the trace.
    let mut output = Vec::new();
    let mut tracer = PrintTracer::new(colors).names(session.names());
    let result = session.execute(&code, &mut output, &mut tracer);
    tracer.print();

    if !output.is_empty() {
        println!("{}---{}", colors.dim, colors.reset);
        let mut stdout = io::stdout().lock();
        if let Err(e) = stdout.write_all(&output).and_then(|()| stdout.flush()) {
            eprintln!("error: failed to write program output: {e}");
            std::process::exit(1);
        }
    }

    println!("{}---{}", colors.dim, colors.reset);
    match result {
        Ok(outcome) => run_common::print_outcome(&outcome, args.json),
        Err(fault) => run_common::fail(&fault, args.json),
    }
}
