//! dirdelta CLI Binary
//!
//! Command-line front end for snapshotting directories and diffing them.

use clap::Parser;
use dirdelta::cli::{exit_code, map_error, Cli, RunContext, EXIT_ERROR};
use dirdelta::logging::init_logging;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let workdir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let context = match RunContext::from_cli(&cli, &workdir) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(EXIT_ERROR);
        }
    };

    if let Err(e) = init_logging(&context.config().logging) {
        eprintln!("{}", map_error(&e));
        process::exit(EXIT_ERROR);
    }

    info!("dirdelta starting");

    match context.execute(&cli.command) {
        Ok(outcome) => {
            if !outcome.output.is_empty() {
                println!("{}", outcome.output);
            }
            info!(changed = outcome.changed, "Command completed");
            process::exit(exit_code(outcome.changed));
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(EXIT_ERROR);
        }
    }
}
