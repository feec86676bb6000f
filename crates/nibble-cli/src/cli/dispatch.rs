//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` structs pull the fields a command uses out of the unified flag
//! set; hidden flags are parsed but never extracted.

use std::path::PathBuf;

use clap::ArgMatches;
use nibble_lib::FuelLimits;

use super::ColorChoice;
use crate::commands::dump::DumpArgs;
use crate::commands::run::RunArgs;
use crate::commands::trace::TraceArgs;

pub struct RunParams {
    pub source_text: Option<String>,
    pub source_path: Option<PathBuf>,
    pub limits: FuelLimits,
    pub cache_branches: bool,
    pub json: bool,
    pub color: ColorChoice,
}

impl RunParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_text: m.get_one::<String>("source_text").cloned(),
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            limits: parse_limits(m),
            cache_branches: !m.get_flag("no_branch_cache"),
            json: m.get_flag("json"),
            color: parse_color(m),
        }
    }
}

impl From<RunParams> for RunArgs {
    fn from(p: RunParams) -> Self {
        Self {
            source_text: p.source_text,
            source_path: p.source_path,
            limits: p.limits,
            cache_branches: p.cache_branches,
            json: p.json,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub source_text: Option<String>,
    pub source_path: Option<PathBuf>,
    pub color: ColorChoice,
    // Note: fuel, max_depth, max_stack, no_branch_cache, json are parsed but
    // not extracted (unified flags)
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_text: m.get_one::<String>("source_text").cloned(),
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            source_text: p.source_text,
            source_path: p.source_path,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TraceParams {
    pub source_text: Option<String>,
    pub source_path: Option<PathBuf>,
    pub limits: FuelLimits,
    pub cache_branches: bool,
    pub json: bool,
    pub color: ColorChoice,
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_text: m.get_one::<String>("source_text").cloned(),
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            limits: parse_limits(m),
            cache_branches: !m.get_flag("no_branch_cache"),
            json: m.get_flag("json"),
            color: parse_color(m),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        Self {
            source_text: p.source_text,
            source_path: p.source_path,
            limits: p.limits,
            cache_branches: p.cache_branches,
            json: p.json,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn parse_limits(m: &ArgMatches) -> FuelLimits {
    let mut limits = FuelLimits::new();
    if let Some(&fuel) = m.get_one::<u64>("fuel") {
        limits = limits.exec_fuel(fuel);
    }
    if let Some(&depth) = m.get_one::<u32>("max_depth") {
        limits = limits.recursion_limit(depth);
    }
    if let Some(&stack) = m.get_one::<usize>("max_stack") {
        limits = limits.stack_limit(stack);
    }
    limits
}
