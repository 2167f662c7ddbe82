//! Location of the giga config file and seeding it on first run.

use std::fs;
use std::path::{Path, PathBuf};

use giga_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

const APP_DIR: &str = "giga";
const FILE_NAME: &str = "config.toml";

/// `<platform config dir>/giga/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(FILE_NAME))
        .ok_or_else(|| {
            ConfigError::ParseError("no platform config directory, pass --config <path>".into())
        })
}

/// Write the commented template to `path`. An existing file is left as is.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Ok(());
    }

    let seed = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, default_config_toml())
    };
    seed().map_err(|e| {
        ConfigError::ParseError(format!(
            "cannot write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!(
        path = %path.display(),
        "wrote default config, GigaChat credentials go in [auth] or the environment"
    );
    Ok(())
}
