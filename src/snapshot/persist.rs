//! JSON persistence for snapshots
//!
//! The on-disk form holds the digest algorithm, the file map and the directory
//! set. The root is not stored; a loaded snapshot takes the path it was loaded
//! from as its root.

use crate::error::SnapshotError;
use crate::snapshot::hasher::is_valid_digest;
use crate::snapshot::Snapshot;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

impl Snapshot {
    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a snapshot from JSON
    pub fn from_json(json: &str) -> Result<Snapshot, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Write the snapshot to `path`
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let json = self.to_json()?;
        let persist_err = |source| SnapshotError::Persist {
            path: path.to_path_buf(),
            source,
        };
        let mut file = fs::File::create(path).map_err(persist_err)?;
        file.write_all(json.as_bytes()).map_err(persist_err)?;
        file.write_all(b"\n").map_err(persist_err)?;
        file.sync_all().map_err(persist_err)?;
        debug!(path = %path.display(), files = self.file_count(), "Saved snapshot");
        Ok(())
    }

    /// Read a snapshot previously written by [`Snapshot::save`]
    pub fn load(path: &Path) -> Result<Snapshot, SnapshotError> {
        let json = fs::read_to_string(path).map_err(|source| SnapshotError::Persist {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Snapshot::from_json(&json)?.with_root(path.to_path_buf());
        debug!(path = %path.display(), files = snapshot.file_count(), "Loaded snapshot");
        Ok(snapshot)
    }

    fn validate(&self) -> Result<(), SnapshotError> {
        for (key, digest) in self.files() {
            if !is_valid_digest(digest) {
                return Err(SnapshotError::InvalidSnapshot(format!(
                    "file '{}' has malformed digest '{}'",
                    key, digest
                )));
            }
            if self.contains_dir(key) {
                return Err(SnapshotError::InvalidSnapshot(format!(
                    "'{}' is recorded as both a file and a directory",
                    key
                )));
            }
        }
        for key in self.files().keys().chain(self.dirs().iter()) {
            if !is_relative_key(key) {
                return Err(SnapshotError::InvalidSnapshot(format!(
                    "'{}' is not a root-relative path",
                    key
                )));
            }
        }
        Ok(())
    }
}

/// Keys the builder produces: non-empty `/`-joined normal segments
fn is_relative_key(key: &str) -> bool {
    key.split('/')
        .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}
