//! Error types for snapshot construction, configuration and the CLI.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building, saving or loading a snapshot
///
/// Every filesystem variant carries the offending path so the caller can tell
/// which entry aborted the walk.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Cannot access snapshot root {path:?}: {source}")]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot root is not a directory: {0:?}")]
    NotADirectory(PathBuf),

    #[error("Failed to walk {path:?}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Path {path:?} is not under snapshot root {root:?}")]
    RelativePath { path: PathBuf, root: PathBuf },

    #[error("Path {0:?} is not valid UTF-8")]
    NonUtf8Path(PathBuf),

    #[error("Failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot of {0:?} was cancelled")]
    Cancelled(PathBuf),

    #[error("Failed to start hashing worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Failed to persist snapshot at {path:?}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid snapshot data: {0}")]
    InvalidSnapshot(String),

    #[error("Snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors surfaced by the command line front end
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Cannot compare snapshots hashed with {base} and {other}")]
    AlgorithmMismatch { base: String, other: String },

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}
