//! Root-relative path keys

use crate::error::SnapshotError;
use std::path::{Component, Path};

/// Compute the snapshot key for `path` under `root`
///
/// Keys are joined with `/` regardless of platform so snapshots taken on
/// different systems compare by the same namespace. The root itself maps to
/// the empty string.
pub fn relative_key(root: &Path, path: &Path) -> Result<String, SnapshotError> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| SnapshotError::RelativePath {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })?;

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(name) => {
                let name = name
                    .to_str()
                    .ok_or_else(|| SnapshotError::NonUtf8Path(path.to_path_buf()))?;
                segments.push(name);
            }
            Component::CurDir => {}
            _ => {
                return Err(SnapshotError::RelativePath {
                    path: path.to_path_buf(),
                    root: root.to_path_buf(),
                })
            }
        }
    }

    Ok(segments.join("/"))
}
