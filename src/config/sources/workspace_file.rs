//! Working-directory config file source: dirdelta.toml, or an explicit path

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::{File, FileFormat};
use std::path::Path;

/// Name of the config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "dirdelta.toml";

/// Add `<workdir>/dirdelta.toml` to builder when present.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workdir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = workdir.join(CONFIG_FILE_NAME);
    if path.exists() {
        return Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(false)));
    }
    Ok(builder)
}

/// Add an explicitly named config file; it must exist.
pub fn add_explicit(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }
    Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(true)))
}
