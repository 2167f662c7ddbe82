use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failure surfaced to the user by the binaries. Each variant names the
/// stage that failed so the message can be printed as-is.
#[derive(Debug, thiserror::Error)]
pub enum GigaError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("file error: {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("http setup error: {0}")]
    Http(String),

    #[error("auth error: {0}")]
    Auth(String),

    #[error("completion error: {0}")]
    Api(String),

    #[error("tool error: {0}")]
    Tool(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("chat.max_messages = 1".into());
        assert_eq!(
            err.to_string(),
            "config validation error: chat.max_messages = 1"
        );
    }

    #[test]
    fn giga_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: GigaError = config_err.into();
        assert!(matches!(err, GigaError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn giga_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: GigaError = io_err.into();
        assert!(matches!(err, GigaError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn file_error_names_path() {
        let err = GigaError::File {
            path: PathBuf::from("resources/prompt.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("file error"));
        assert!(msg.contains("resources/prompt.txt"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn stage_prefixes() {
        assert_eq!(
            GigaError::Auth("HTTP 401".into()).to_string(),
            "auth error: HTTP 401"
        );
        assert_eq!(
            GigaError::Api("timeout".into()).to_string(),
            "completion error: timeout"
        );
        assert_eq!(
            GigaError::Tool("not found".into()).to_string(),
            "tool error: not found"
        );
        assert_eq!(
            GigaError::Http("bad certificate".into()).to_string(),
            "http setup error: bad certificate"
        );
    }
}
