//! Full configuration validation.
//!
//! Every section pushes its violations into one list; the result is a
//! single `ConfigError` naming all offending keys.

mod helpers;


use crate::schema::GigaConfig;
use giga_common::ConfigError;

use helpers::{validate_range, validate_range_f64, validate_url};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &GigaConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_url(&mut errors, "auth.token_url", &config.auth.token_url);
    if config.auth.scope.trim().is_empty() {
        errors.push("auth.scope must not be empty".into());
    }
    validate_range(
        &mut errors,
        "auth.connect_timeout_secs",
        config.auth.connect_timeout_secs,
        1,
        300,
    );

    validate_url(&mut errors, "api.completion_url", &config.api.completion_url);
    if config.api.model.trim().is_empty() {
        errors.push("api.model must not be empty".into());
    }
    validate_range(
        &mut errors,
        "api.max_tokens",
        u64::from(config.api.max_tokens),
        1,
        32_768,
    );
    validate_range(
        &mut errors,
        "api.connect_timeout_secs",
        config.api.connect_timeout_secs,
        1,
        300,
    );
    validate_range(
        &mut errors,
        "api.request_timeout_secs",
        config.api.request_timeout_secs,
        1,
        3600,
    );

    validate_range_f64(
        &mut errors,
        "chat.temperature",
        config.chat.temperature,
        0.0,
        2.0,
    );
    // Compression keeps the last two messages, so anything smaller never shrinks.
    validate_range(
        &mut errors,
        "chat.max_messages",
        config.chat.max_messages as u64,
        3,
        1000,
    );

    validate_url(&mut errors, "tools.server_url", &config.tools.server_url);
    validate_range(
        &mut errors,
        "tools.timeout_secs",
        config.tools.timeout_secs,
        1,
        300,
    );

    validate_range(
        &mut errors,
        "server.workers",
        config.server.workers as u64,
        1,
        256,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
