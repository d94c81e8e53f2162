//! CLI domain: parse, route and output only.
//! Snapshot construction and diffing live in the library modules.

mod output;
mod parse;
mod route;

pub use output::{
    exit_code, format_delta_json, format_delta_text, map_error, EXIT_CHANGED, EXIT_ERROR,
    EXIT_UNCHANGED,
};
pub use parse::{Cli, Commands, OutputFormat};
pub use route::{CommandOutcome, RunContext};
