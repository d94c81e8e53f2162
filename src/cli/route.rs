//! CLI route: run context and command dispatch.

use crate::cli::output::{format_delta_json, format_delta_text};
use crate::cli::parse::{Cli, Commands, OutputFormat};
use crate::config::{ConfigLoader, DirDeltaConfig};
use crate::error::CliError;
use crate::sink::TracingSink;
use crate::snapshot::{Snapshot, SnapshotBuilder};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of one command: text for stdout and whether changes were found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub output: String,
    pub changed: bool,
}

/// Runtime context for CLI execution: resolved configuration.
pub struct RunContext {
    config: DirDeltaConfig,
}

impl RunContext {
    /// Load configuration (explicit file or working directory) and apply CLI overrides.
    pub fn from_cli(cli: &Cli, workdir: &Path) -> Result<Self, CliError> {
        let config = match &cli.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(workdir)?,
        };
        let config = apply_overrides(config, cli);
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn new(config: DirDeltaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DirDeltaConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<CommandOutcome, CliError> {
        match command {
            Commands::Snapshot { root, output } => {
                let snapshot = self.build(root)?;
                match output {
                    Some(path) => {
                        snapshot.save(path)?;
                        info!(path = %path.display(), "Snapshot written");
                        Ok(CommandOutcome {
                            output: format!(
                                "{} files, {} dirs -> {}",
                                snapshot.file_count(),
                                snapshot.dir_count(),
                                path.display()
                            ),
                            changed: false,
                        })
                    }
                    None => Ok(CommandOutcome {
                        output: snapshot.to_json()?,
                        changed: false,
                    }),
                }
            }
            Commands::Diff {
                base,
                other,
                format,
                no_color,
            } => {
                let base = self.resolve(base)?;
                let other = self.resolve(other)?;
                if base.algorithm() != other.algorithm() {
                    return Err(CliError::AlgorithmMismatch {
                        base: base.algorithm().to_string(),
                        other: other.algorithm().to_string(),
                    });
                }

                let delta = base.diff(&other);
                debug!(changes = delta.change_count(), "Computed delta");
                let output = match format {
                    OutputFormat::Text => format_delta_text(&delta, !no_color),
                    OutputFormat::Json => format_delta_json(&delta)?,
                };
                Ok(CommandOutcome {
                    output,
                    changed: !delta.is_empty(),
                })
            }
        }
    }

    fn build(&self, root: &Path) -> Result<Snapshot, CliError> {
        let snapshot = SnapshotBuilder::new(root)
            .with_scan_config(&self.config.scan)
            .with_sink(Arc::new(TracingSink))
            .build()?;
        Ok(snapshot)
    }

    /// A directory is scanned; anything else is read as a saved snapshot.
    fn resolve(&self, path: &Path) -> Result<Snapshot, CliError> {
        if path.is_dir() {
            self.build(path)
        } else {
            Ok(Snapshot::load(path)?)
        }
    }
}

fn apply_overrides(mut config: DirDeltaConfig, cli: &Cli) -> DirDeltaConfig {
    if let Some(algorithm) = cli.algorithm {
        config.scan.algorithm = algorithm;
    }
    if cli.sequential {
        config.scan.parallel = false;
    }
    if cli.threads.is_some() {
        config.scan.threads = cli.threads;
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }
    config
}
