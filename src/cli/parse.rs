//! CLI parse: clap types for dirdelta. No behavior; definitions only.

use crate::snapshot::hasher::DigestAlgorithm;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// dirdelta - content-addressed directory snapshots and diffs
#[derive(Parser, Debug)]
#[command(name = "dirdelta")]
#[command(about = "Snapshot directory trees by content and report what changed")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Digest algorithm (sha256, blake3)
    #[arg(long, global = true)]
    pub algorithm: Option<DigestAlgorithm>,

    /// Hash files one at a time instead of on a worker pool
    #[arg(long, global = true)]
    pub sequential: bool,

    /// Worker count for parallel hashing
    #[arg(long, global = true)]
    pub threads: Option<usize>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Snapshot a directory and print or save it as JSON
    Snapshot {
        /// Directory to snapshot
        root: PathBuf,
        /// Write the snapshot to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Compare two directories or saved snapshots
    Diff {
        /// Base directory or snapshot file
        base: PathBuf,
        /// Other directory or snapshot file
        other: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
