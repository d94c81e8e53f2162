//! Snapshot comparison
//!
//! Works purely on the in-memory maps of two snapshots: nothing is re-read or
//! re-hashed. Because snapshots keep their entries in ordered collections, each
//! list comes out sorted and duplicate free without a separate sort pass.

use crate::snapshot::Snapshot;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// How `other` differs from `base`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Delta {
    pub new_files: Vec<String>,
    pub removed_files: Vec<String>,
    pub modified_files: Vec<String>,
    pub new_dirs: Vec<String>,
    pub removed_dirs: Vec<String>,
}

impl Delta {
    /// True when the two snapshots describe the same tree
    pub fn is_empty(&self) -> bool {
        self.change_count() == 0
    }

    /// Total number of reported paths across all five lists
    pub fn change_count(&self) -> usize {
        self.new_files.len()
            + self.removed_files.len()
            + self.modified_files.len()
            + self.new_dirs.len()
            + self.removed_dirs.len()
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sections: [(&str, &Vec<String>); 5] = [
            ("+d", &self.new_dirs),
            ("-d", &self.removed_dirs),
            ("+", &self.new_files),
            ("-", &self.removed_files),
            ("~", &self.modified_files),
        ];
        for (marker, paths) in sections {
            for path in paths {
                writeln!(f, "{} {}", marker, path)?;
            }
        }
        Ok(())
    }
}

/// Compute the delta from `base` to `other`
pub fn diff(base: &Snapshot, other: &Snapshot) -> Delta {
    let (new_files, removed_files, modified_files) = diff_files(base.files(), other.files());
    let (new_dirs, removed_dirs) = diff_dirs(base.dirs(), other.dirs());

    Delta {
        new_files,
        removed_files,
        modified_files,
        new_dirs,
        removed_dirs,
    }
}

fn diff_files(
    base: &BTreeMap<String, String>,
    other: &BTreeMap<String, String>,
) -> (Vec<String>, Vec<String>, Vec<String>) {
    let mut new_files = Vec::new();
    let mut modified_files = Vec::new();
    for (path, other_digest) in other {
        match base.get(path) {
            None => new_files.push(path.clone()),
            Some(digest) if digest != other_digest => modified_files.push(path.clone()),
            Some(_) => {}
        }
    }

    let removed_files = base
        .keys()
        .filter(|path| !other.contains_key(*path))
        .cloned()
        .collect();

    (new_files, removed_files, modified_files)
}

fn diff_dirs(base: &BTreeSet<String>, other: &BTreeSet<String>) -> (Vec<String>, Vec<String>) {
    let new_dirs = other.difference(base).cloned().collect();
    let removed_dirs = base.difference(other).cloned().collect();
    (new_dirs, removed_dirs)
}
