//! Snapshot builder: walk, classify, hash

use crate::config::ScanConfig;
use crate::error::SnapshotError;
use crate::sink::{DebugSink, NoopSink};
use crate::snapshot::hasher::DigestAlgorithm;
use crate::snapshot::walker::{Entry, Walker};
use crate::snapshot::Snapshot;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, instrument};

type Tables = (BTreeMap<String, String>, BTreeSet<String>);

/// Builder for one [`Snapshot`]
///
/// Builders for different roots share nothing; each carries its own sink and
/// settings.
pub struct SnapshotBuilder {
    root: PathBuf,
    algorithm: DigestAlgorithm,
    parallel: bool,
    threads: Option<usize>,
    sink: Arc<dyn DebugSink>,
    cancel: Option<Arc<AtomicBool>>,
}

impl SnapshotBuilder {
    /// Create a sequential SHA-256 builder for the given root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            algorithm: DigestAlgorithm::default(),
            parallel: false,
            threads: None,
            sink: Arc::new(NoopSink),
            cancel: None,
        }
    }

    /// Apply scan settings (algorithm, parallelism) from configuration
    pub fn with_scan_config(mut self, config: &ScanConfig) -> Self {
        self.algorithm = config.algorithm;
        self.parallel = config.parallel;
        self.threads = config.threads;
        self
    }

    pub fn with_algorithm(mut self, algorithm: DigestAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Hash files on a worker pool. `threads = None` or `Some(0)` uses rayon's default size.
    pub fn parallel(mut self, threads: Option<usize>) -> Self {
        self.parallel = true;
        self.threads = threads;
        self
    }

    /// Report traversal checkpoints to `sink`
    pub fn with_sink(mut self, sink: Arc<dyn DebugSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Abort the build once `cancel` is set
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the root and hash every regular file
    ///
    /// Fails on the first error; no partial snapshot is ever returned.
    #[instrument(skip(self), fields(root = %self.root.display(), algorithm = %self.algorithm))]
    pub fn build(&self) -> Result<Snapshot, SnapshotError> {
        let start = Instant::now();

        match self.build_inner() {
            Ok(snapshot) => {
                info!(
                    files = snapshot.file_count(),
                    dirs = snapshot.dir_count(),
                    parallel = self.parallel,
                    duration_ms = start.elapsed().as_millis(),
                    "Snapshot build completed"
                );
                Ok(snapshot)
            }
            Err(e) => {
                error!("Snapshot build failed: {}", e);
                Err(e)
            }
        }
    }

    fn build_inner(&self) -> Result<Snapshot, SnapshotError> {
        self.check_root()?;

        let mut walker = Walker::new(&self.root, self.sink.as_ref());
        if let Some(cancel) = &self.cancel {
            walker = walker.with_cancel_flag(cancel);
        }

        let (files, dirs) = if self.parallel {
            self.build_parallel(&walker)?
        } else {
            self.build_sequential(&walker)?
        };

        Ok(Snapshot::from_parts(
            self.root.clone(),
            self.algorithm,
            files,
            dirs,
        ))
    }

    fn check_root(&self) -> Result<(), SnapshotError> {
        let metadata = std::fs::metadata(&self.root).map_err(|source| {
            self.sink.debug(format_args!(
                "could not walk through '{}': {}",
                self.root.display(),
                source
            ));
            SnapshotError::Root {
                path: self.root.clone(),
                source,
            }
        })?;
        if !metadata.is_dir() {
            self.sink.debug(format_args!(
                "could not walk through '{}': not a directory",
                self.root.display()
            ));
            return Err(SnapshotError::NotADirectory(self.root.clone()));
        }
        Ok(())
    }

    /// Hash each file as the walk reaches it
    fn build_sequential(&self, walker: &Walker<'_>) -> Result<Tables, SnapshotError> {
        let mut files = BTreeMap::new();
        let mut dirs = BTreeSet::new();
        walker.walk_with(|entry| {
            match entry {
                Entry::Directory { key } => {
                    dirs.insert(key);
                }
                Entry::File { key, path } => {
                    let digest = self.hash_one(&path)?;
                    files.insert(key, digest);
                }
            }
            Ok(())
        })?;
        Ok((files, dirs))
    }

    /// Collect the tree first, then hash on the worker pool
    fn build_parallel(&self, walker: &Walker<'_>) -> Result<Tables, SnapshotError> {
        let mut dirs = BTreeSet::new();
        let mut pending = Vec::new();
        walker.walk_with(|entry| {
            match entry {
                Entry::Directory { key } => {
                    dirs.insert(key);
                }
                Entry::File { key, path } => pending.push((key, path)),
            }
            Ok(())
        })?;
        let files = self.hash_parallel(&pending)?;
        Ok((files, dirs))
    }

    /// Each worker produces disjoint (key, digest) pairs; they are merged into
    /// one ordered map, so the result does not depend on completion order.
    fn hash_parallel(
        &self,
        files: &[(String, PathBuf)],
    ) -> Result<BTreeMap<String, String>, SnapshotError> {
        let run = || {
            files
                .par_iter()
                .map(|(key, path)| self.hash_one(path).map(|digest| (key.clone(), digest)))
                .collect::<Result<BTreeMap<String, String>, SnapshotError>>()
        };

        match self.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()?;
                pool.install(run)
            }
            None => run(),
        }
    }

    fn hash_one(&self, path: &Path) -> Result<String, SnapshotError> {
        if self.is_cancelled() {
            return Err(SnapshotError::Cancelled(self.root.clone()));
        }
        self.sink
            .debug(format_args!("handle file '{}'", path.display()));
        self.algorithm.digest_file(path).map_err(|e| {
            self.sink
                .debug(format_args!("could not hash file '{}': {}", path.display(), e));
            e
        })
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
    }
}

/// Build a SHA-256 snapshot of `root` sequentially, without a debug sink
pub fn build_snapshot(root: impl AsRef<Path>) -> Result<Snapshot, SnapshotError> {
    SnapshotBuilder::new(root.as_ref()).build()
}
