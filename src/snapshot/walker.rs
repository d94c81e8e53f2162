//! Filesystem walker for snapshot construction

use crate::error::SnapshotError;
use crate::sink::DebugSink;
use crate::snapshot::path::relative_key;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use walkdir::WalkDir;

/// A classified filesystem entry below the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A regular file, to be hashed
    File { key: String, path: PathBuf },
    /// A directory
    Directory { key: String },
}

/// Depth-first walker over one root directory
///
/// Symlinks are never followed. Anything that is not a directory or a regular
/// file is reported to the sink and left out.
pub struct Walker<'a> {
    root: &'a Path,
    sink: &'a dyn DebugSink,
    cancel: Option<&'a AtomicBool>,
}

impl<'a> Walker<'a> {
    pub fn new(root: &'a Path, sink: &'a dyn DebugSink) -> Self {
        Self {
            root,
            sink,
            cancel: None,
        }
    }

    pub fn with_cancel_flag(mut self, cancel: &'a AtomicBool) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Walk the tree and collect every file and directory entry
    ///
    /// Entries come out in depth-first order with siblings sorted by name.
    /// The first error stops the walk.
    pub fn walk(&self) -> Result<Vec<Entry>, SnapshotError> {
        let mut entries = Vec::new();
        self.walk_with(|entry| {
            entries.push(entry);
            Ok(())
        })?;
        Ok(entries)
    }

    /// Walk the tree, handing each entry to `visit` as soon as it is reached
    ///
    /// An error from `visit` stops the walk just like a traversal error, so
    /// the first failure in walk order is the one returned.
    pub fn walk_with<F>(&self, mut visit: F) -> Result<(), SnapshotError>
    where
        F: FnMut(Entry) -> Result<(), SnapshotError>,
    {
        let walker = WalkDir::new(self.root)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            if self.is_cancelled() {
                return Err(SnapshotError::Cancelled(self.root.to_path_buf()));
            }

            let entry = entry.map_err(|source| {
                let path = source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.to_path_buf());
                self.sink.debug(format_args!(
                    "could not walk through '{}': {}",
                    path.display(),
                    source
                ));
                SnapshotError::Walk { path, source }
            })?;

            let path = entry.path();
            let file_type = entry.file_type();

            if file_type.is_dir() {
                self.sink
                    .debug(format_args!("handle dir '{}'", path.display()));
                // The root is not recorded
                if entry.depth() == 0 {
                    continue;
                }
                let key = self.key_for(path, "dir")?;
                visit(Entry::Directory { key })?;
            } else if file_type.is_file() {
                let key = self.key_for(path, "file")?;
                visit(Entry::File {
                    key,
                    path: path.to_path_buf(),
                })?;
            } else {
                self.sink.debug(format_args!(
                    "skipping non-regular file '{}'",
                    path.display()
                ));
            }
        }

        Ok(())
    }

    fn key_for(&self, path: &Path, kind: &str) -> Result<String, SnapshotError> {
        relative_key(self.root, path).map_err(|e| {
            self.sink.debug(format_args!(
                "could not get the relative path of {} '{}' in '{}': {}",
                kind,
                path.display(),
                self.root.display(),
                e
            ));
            e
        })
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
    }
}
