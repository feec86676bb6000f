use std::path::PathBuf;

use nibble_lib::{Colors, Session, dump};

use super::run_common::{self, PreparedProgram, ProgramInput};

pub struct DumpArgs {
    pub source_text: Option<String>,
    pub source_path: Option<PathBuf>,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let PreparedProgram { session, code } = run_common::prepare_program(
        Session::new(),
        ProgramInput {
            source_text: args.source_text.as_deref(),
            source_path: args.source_path.as_deref(),
            color: args.color,
        },
    );

    let colors = Colors::new(args.color);
    print!("{}", dump(&code, Some(session.names()), colors));
}
