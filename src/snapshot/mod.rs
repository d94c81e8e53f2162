//! Directory snapshots
//!
//! A [`Snapshot`] records every regular file below a root (keyed by its
//! root-relative path, valued by a content digest) and every directory below
//! that root. Snapshots are immutable once built.

pub mod builder;
pub mod hasher;
pub mod path;
pub mod persist;
pub mod walker;

use crate::diff::Delta;
use hasher::DigestAlgorithm;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

pub use builder::SnapshotBuilder;

/// Content-addressed record of one directory tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(skip)]
    root: PathBuf,
    #[serde(default)]
    algorithm: DigestAlgorithm,
    files: BTreeMap<String, String>,
    dirs: BTreeSet<String>,
}

impl Snapshot {
    /// Assemble a snapshot from already computed parts
    ///
    /// Keys must be root-relative and `/`-separated. Used by persistence and by
    /// callers that build snapshots without touching the filesystem.
    pub fn from_parts(
        root: impl Into<PathBuf>,
        algorithm: DigestAlgorithm,
        files: BTreeMap<String, String>,
        dirs: BTreeSet<String>,
    ) -> Self {
        Self {
            root: root.into(),
            algorithm,
            files,
            dirs,
        }
    }

    /// Base path this snapshot was taken from
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Relative file path to hex digest
    pub fn files(&self) -> &BTreeMap<String, String> {
        &self.files
    }

    /// Relative directory paths (the root is not included)
    pub fn dirs(&self) -> &BTreeSet<String> {
        &self.dirs
    }

    pub fn digest(&self, key: &str) -> Option<&str> {
        self.files.get(key).map(String::as_str)
    }

    pub fn contains_dir(&self, key: &str) -> bool {
        self.dirs.contains(key)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn dir_count(&self) -> usize {
        self.dirs.len()
    }

    /// Compare against `other`, treating `self` as the base
    pub fn diff(&self, other: &Snapshot) -> Delta {
        crate::diff::diff(self, other)
    }

    pub(crate) fn with_root(mut self, root: PathBuf) -> Self {
        self.root = root;
        self
    }
}
