//! Command builders for the CLI.
//!
//! run/dump/trace accept the same flags so a command line can be switched
//! between them by changing only the subcommand. Flags a command ignores are
//! hidden from its `--help`.

use clap::Command;

use super::args::*;

/// Add hidden runtime args (for commands that don't execute).
fn with_hidden_runtime_args(cmd: Command) -> Command {
    cmd.arg(fuel_arg().hide(true))
        .arg(max_depth_arg().hide(true))
        .arg(max_stack_arg().hide(true))
        .arg(no_branch_cache_arg().hide(true))
}

/// Add hidden output args (for commands that don't print a final state).
fn with_hidden_output_args(cmd: Command) -> Command {
    cmd.arg(json_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("nibble")
        .about("Assemble and run programs for a stack machine with 4-bit instructions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(run_command())
        .subcommand(dump_command())
        .subcommand(trace_command())
}

/// Assemble and run a program, then print the final state.
pub fn run_command() -> Command {
    Command::new("run")
        .about("Assemble and run a program")
        .override_usage(
            "\
  nibble run <PROGRAM>
  nibble run -f <FILE>",
        )
        .after_help(
            r#"EXAMPLES:
  nibble run '3 4 + top.'                     # prints top: 7
  nibble run "'Hello, world!' say."           # prints Hello, world!
  nibble run 'sq: % * : 12 sq.' --json        # final state as JSON
  nibble run -f loop.nb --fuel 100000         # bounded run"#,
        )
        .arg(source_text_arg())
        .arg(source_path_arg())
        .arg(fuel_arg())
        .arg(max_depth_arg())
        .arg(max_stack_arg())
        .arg(no_branch_cache_arg())
        .arg(json_arg())
        .arg(color_arg())
}

/// Show assembled code.
///
/// Accepts the runtime flags but ignores them.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Show assembled code")
        .override_usage(
            "\
  nibble dump <PROGRAM>
  nibble dump -f <FILE>",
        )
        .after_help(
            r#"EXAMPLES:
  nibble dump 'dbl: % + : 21 dbl.'
  nibble dump -f loop.nb --color always"#,
        )
        .arg(source_text_arg())
        .arg(source_path_arg())
        .arg(color_arg());

    with_hidden_output_args(with_hidden_runtime_args(cmd))
}

/// Run a program, printing every executed instruction.
pub fn trace_command() -> Command {
    Command::new("trace")
        .about("Trace program execution for debugging")
        .override_usage(
            "\
  nibble trace <PROGRAM>
  nibble trace -f <FILE>",
        )
        .after_help(
            r#"EXAMPLES:
  nibble trace '2=1[ 1 ]'
  nibble trace -f loop.nb --fuel 200
  nibble trace -f loop.nb --no-branch-cache"#,
        )
        .arg(source_text_arg())
        .arg(source_path_arg())
        .arg(fuel_arg())
        .arg(max_depth_arg())
        .arg(max_stack_arg())
        .arg(no_branch_cache_arg())
        .arg(json_arg())
        .arg(color_arg())
}
