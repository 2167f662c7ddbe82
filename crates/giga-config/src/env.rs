//! Environment overrides and `.env` loading.

use std::path::Path;

use crate::schema::GigaConfig;

pub const CLIENT_ID_VAR: &str = "GIGACHAT_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "GIGACHAT_CLIENT_SECRET";

/// Overlay credentials from the process environment.
pub fn apply_env_overrides(config: &mut GigaConfig) {
    apply_overrides_from(config, |key| std::env::var(key).ok());
}

pub(crate) fn apply_overrides_from(
    config: &mut GigaConfig,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(id) = lookup(CLIENT_ID_VAR).filter(|v| !v.is_empty()) {
        config.auth.client_id = id;
    }
    if let Some(secret) = lookup(CLIENT_SECRET_VAR).filter(|v| !v.is_empty()) {
        config.auth.client_secret = secret;
    }
}

/// Load `KEY=VALUE` lines from a `.env` file into the environment.
/// Variables that are already set win. Returns `false` when the file
/// could not be read.
pub fn load_dotenv(path: &Path) -> bool {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return false;
    };
    for (key, value) in parse_dotenv(&contents) {
        if std::env::var(&key).is_err() {
            std::env::set_var(key, value);
        }
    }
    true
}

pub(crate) fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}
