//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands,
//! hidden where a command parses a flag without using it.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Inline program text (positional).
pub fn source_text_arg() -> Arg {
    Arg::new("source_text")
        .value_name("PROGRAM")
        .conflicts_with("source_path")
        .help("Program text, e.g. '3 4 + top.'")
}

/// Program file (-f/--file).
pub fn source_path_arg() -> Arg {
    Arg::new("source_path")
        .short('f')
        .long("file")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Read the program from a file (use \"-\" for stdin)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Execution fuel limit (--fuel).
pub fn fuel_arg() -> Arg {
    Arg::new("fuel")
        .long("fuel")
        .value_name("N")
        .value_parser(value_parser!(u64))
        .help("Stop after N instructions (default: unlimited)")
}

/// Call depth limit (--max-depth).
pub fn max_depth_arg() -> Arg {
    Arg::new("max_depth")
        .long("max-depth")
        .value_name("N")
        .default_value("1024")
        .value_parser(value_parser!(u32))
        .help("Maximum call depth")
}

/// Operand stack limit (--max-stack).
pub fn max_stack_arg() -> Arg {
    Arg::new("max_stack")
        .long("max-stack")
        .value_name("N")
        .default_value("65536")
        .value_parser(value_parser!(usize))
        .help("Maximum number of values on the operand stack")
}

/// Disable the branch cache (--no-branch-cache).
pub fn no_branch_cache_arg() -> Arg {
    Arg::new("no_branch_cache")
        .long("no-branch-cache")
        .action(ArgAction::SetTrue)
        .help("Rescan for the matching bracket on every jump")
}

/// Print the final state as JSON (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print the final machine state as JSON")
}
