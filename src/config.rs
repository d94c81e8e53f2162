//! Configuration System
//!
//! Layered configuration for scans and logging. Sources, lowest to highest
//! precedence: built-in defaults, the global config file, `dirdelta.toml` in
//! the working directory (or an explicit file), then `DIRDELTA_*` environment
//! variables.

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use crate::snapshot::hasher::DigestAlgorithm;
use config::{Config, Environment};
use serde::{Deserialize, Serialize};
use std::path::Path;

mod sources;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirDeltaConfig {
    /// Snapshot construction settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Snapshot construction settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Content digest: sha256 or blake3
    #[serde(default)]
    pub algorithm: DigestAlgorithm,

    /// Hash files on a worker pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Worker count for parallel hashing (None = one per core)
    #[serde(default)]
    pub threads: Option<usize>,
}

fn default_parallel() -> bool {
    true
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            algorithm: DigestAlgorithm::default(),
            parallel: default_parallel(),
            threads: None,
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.threads == Some(0) {
            return Err("scan.threads must be at least 1".to_string());
        }
        Ok(())
    }
}

impl DirDeltaConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scan.validate().map_err(ConfigError::Invalid)?;
        self.logging.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }
}

/// Loads [`DirDeltaConfig`] from files and the environment
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from the global file, `dirdelta.toml` under `workdir`, and the environment
    pub fn load(workdir: &Path) -> Result<DirDeltaConfig, ConfigError> {
        let builder = Config::builder();
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workdir)?;
        Self::finish(builder)
    }

    /// Load from an explicit file plus the environment
    pub fn load_from_file(path: &Path) -> Result<DirDeltaConfig, ConfigError> {
        let builder = sources::workspace_file::add_explicit(Config::builder(), path)?;
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<DirDeltaConfig, ConfigError> {
        let config: DirDeltaConfig = builder
            .add_source(
                Environment::with_prefix("DIRDELTA")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
