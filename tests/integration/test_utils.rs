//! Shared fixtures: a pair of "before" and "after" trees in one temp dir

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Two sibling roots, `old` and `new`, removed when dropped
pub struct TreePair {
    _temp_dir: TempDir,
    pub old: PathBuf,
    pub new: PathBuf,
}

impl TreePair {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let old = temp_dir.path().join("test_old");
        let new = temp_dir.path().join("test_new");
        fs::create_dir(&old).unwrap();
        fs::create_dir(&new).unwrap();
        Self {
            _temp_dir: temp_dir,
            old,
            new,
        }
    }
}

pub fn create_dir(root: &Path, rel: &str) {
    fs::create_dir_all(root.join(rel)).unwrap();
}

pub fn create_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
