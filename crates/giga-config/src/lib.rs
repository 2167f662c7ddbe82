//! Configuration for the giga chat shell and tool server.
//!
//! TOML-based with serde defaults for every field, so partial files work.
//! Credentials may come from the environment instead of the file.

pub mod env;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use env::{apply_env_overrides, load_dotenv};
pub use schema::*;

use std::path::Path;

use giga_common::ConfigError;

/// Load, overlay env credentials, and validate.
///
/// With `path = None` the platform default location is used and a
/// documented default file is created there when missing.
pub fn load_config(path: Option<&Path>) -> Result<GigaConfig, ConfigError> {
    let mut config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };
    apply_env_overrides(&mut config);
    validation::validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_config_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[chat]\ntemperature = 2.5\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn load_config_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9090\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.bind_addr(), "127.0.0.1:9090");
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }
}
