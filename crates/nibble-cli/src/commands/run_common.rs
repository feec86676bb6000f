//! Shared logic for run, dump and trace commands.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use nibble_lib::{Bytecode, Fault, MachineState, Outcome, Session, Termination};
use serde_json::json;

/// Where the program text comes from.
pub struct ProgramInput<'a> {
    pub source_text: Option<&'a str>,
    pub source_path: Option<&'a Path>,
    pub color: bool,
}

/// An assembled program, ready to run.
pub struct PreparedProgram {
    pub session: Session,
    pub code: Bytecode,
}

/// Load program text from inline text, a file, or stdin (`-`).
pub fn load_source(
    source_text: Option<&str>,
    source_path: Option<&Path>,
) -> Result<String, String> {
    if let Some(text) = source_text {
        return Ok(text.to_owned());
    }

    let Some(path) = source_path else {
        return Err("a program is required: pass it inline or use -f/--file".to_owned());
    };

    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read stdin: {e}"))?;
        return Ok(buf);
    }

    fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {e}", path.display()))
}

/// Load and assemble the program, exiting with status 1 on failure.
pub fn prepare_program(mut session: Session, input: ProgramInput<'_>) -> PreparedProgram {
    let source = load_source(input.source_text, input.source_path).unwrap_or_else(|msg| {
        eprintln!("error: {msg}");
        std::process::exit(1);
    });

    let code = match session.compile(&source) {
        Ok(code) => code,
        Err(e) => {
            let path = input.source_path.map(|p| p.display().to_string());
            let mut printer = e.printer().source(&source).colored(input.color);
            if let Some(path) = path.as_deref() {
                printer = printer.path(path);
            }
            eprintln!("{}", printer.render());
            std::process::exit(1);
        }
    };

    PreparedProgram { session, code }
}

/// Print the final state of a successful run.
pub fn print_outcome(outcome: &Outcome, json: bool) {
    if json {
        let value = json!({
            "termination": outcome.termination,
            "state": outcome.state,
        });
        println!("{value:#}");
        return;
    }

    if outcome.termination == Termination::Halted {
        eprintln!("halted");
    }
    print_state(&outcome.state);
}

/// Report a failed run and exit with status 2. The state at the point of
/// failure is still printed.
pub fn fail(fault: &Fault, json: bool) -> ! {
    eprintln!("{}: {fault}", fault.kind());

    if json {
        let value = json!({
            "error": fault.to_string(),
            "kind": fault.kind().as_str(),
            "state": fault.state,
        });
        println!("{value:#}");
    } else {
        print_state(&fault.state);
    }
    std::process::exit(2);
}

fn print_state(state: &MachineState) {
    print!("{state}");
}
