//! dirdelta: Content-Addressed Directory Snapshots
//!
//! Build a [`Snapshot`] of a directory tree (relative path to content digest for
//! every regular file, plus every subdirectory) and compare two snapshots into a
//! [`Delta`] of new, removed and modified files and new and removed directories.
//!
//! ```no_run
//! use dirdelta::{build_snapshot, diff};
//!
//! # fn main() -> Result<(), dirdelta::SnapshotError> {
//! let before = build_snapshot("test_old")?;
//! let after = build_snapshot("test_new")?;
//! let delta = diff(&before, &after);
//! println!("{}", delta);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod logging;
pub mod sink;
pub mod snapshot;

pub use diff::{diff, Delta};
pub use error::{CliError, ConfigError, SnapshotError};
pub use sink::{DebugSink, MemorySink, NoopSink, TracingSink};
pub use snapshot::builder::build_snapshot;
pub use snapshot::hasher::DigestAlgorithm;
pub use snapshot::{Snapshot, SnapshotBuilder};
