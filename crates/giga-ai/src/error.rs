//! Error taxonomy of the conversation engine.
//!
//! Each type names its stage in `Display` so a message can be shown to
//! the user without further decoration.

use std::path::PathBuf;
use std::time::Duration;

use giga_common::GigaError;

/// Token fetch failed. A failed refresh never evicts a cached token.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("token endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("token request failed: {0}")]
    Network(String),
    #[error("token response parse error: {0}")]
    Parse(String),
    #[error("token response carried no access_token")]
    MissingToken,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("auth unavailable: {0}")]
    AuthUnavailable(#[from] AuthError),
    #[error("completion endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("completion request failed: {0}")]
    Network(String),
    #[error("completion response parse error: {0}")]
    Parse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("tool '{name}' failed: {message}")]
    Handler { name: String, message: String },
    #[error("tool '{name}' timed out after {}s", after.as_secs_f64())]
    Timeout { name: String, after: Duration },
    #[error("tool discovery failed: {0}")]
    Discovery(String),
}

/// Summarization failed. The history has still been truncated.
#[derive(Debug, thiserror::Error)]
pub enum CompressionError {
    #[error("summarization call failed: {0}")]
    Summarization(#[from] ApiError),
    #[error("summarization returned no text")]
    EmptySummary,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TemperatureError {
    #[error("temperature must be a number, got {0:?}")]
    NotANumber(String),
    #[error("temperature {0} is out of range [0.0, 2.0]")]
    OutOfRange(f64),
}

#[derive(Debug, thiserror::Error)]
pub enum HttpSetupError {
    #[error("cannot read certificate {path}: {source}")]
    Certificate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid certificate {path}: {message}")]
    InvalidCertificate { path: PathBuf, message: String },
    #[error("failed to build HTTP client: {0}")]
    Build(String),
}

impl From<AuthError> for GigaError {
    fn from(e: AuthError) -> Self {
        GigaError::Auth(e.to_string())
    }
}

impl From<ApiError> for GigaError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::AuthUnavailable(auth) => auth.into(),
            other => GigaError::Api(other.to_string()),
        }
    }
}

impl From<ToolError> for GigaError {
    fn from(e: ToolError) -> Self {
        GigaError::Tool(e.to_string())
    }
}

impl From<CompressionError> for GigaError {
    fn from(e: CompressionError) -> Self {
        GigaError::Api(e.to_string())
    }
}

impl From<HttpSetupError> for GigaError {
    fn from(e: HttpSetupError) -> Self {
        GigaError::Http(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_error_display() {
        let err = AuthError::Status {
            status: 401,
            body: "bad credentials".into(),
        };
        assert_eq!(
            err.to_string(),
            "token endpoint returned HTTP 401: bad credentials"
        );
    }

    #[test]
    fn api_error_wraps_auth() {
        let err: ApiError = AuthError::MissingToken.into();
        assert!(matches!(err, ApiError::AuthUnavailable(_)));
        assert!(err.to_string().starts_with("auth unavailable"));
    }

    #[test]
    fn tool_timeout_display() {
        let err = ToolError::Timeout {
            name: "get_current_datetime".into(),
            after: Duration::from_secs(10),
        };
        assert_eq!(
            err.to_string(),
            "tool 'get_current_datetime' timed out after 10s"
        );
    }

    #[test]
    fn giga_error_keeps_stage() {
        let err: GigaError = ApiError::AuthUnavailable(AuthError::MissingToken).into();
        assert!(matches!(err, GigaError::Auth(_)));

        let err: GigaError = ApiError::Network("connection reset".into()).into();
        assert!(matches!(err, GigaError::Api(_)));
        assert!(err.to_string().contains("connection reset"));

        let err: GigaError = ToolError::NotFound("nope".into()).into();
        assert_eq!(err.to_string(), "tool error: tool not found: nope");
    }

    #[test]
    fn http_setup_error_names_its_stage() {
        let err: GigaError = HttpSetupError::InvalidCertificate {
            path: PathBuf::from("/etc/giga/root_ca.cer"),
            message: "bad DER".into(),
        }
        .into();
        assert!(matches!(err, GigaError::Http(_)));
        assert_eq!(
            err.to_string(),
            "http setup error: invalid certificate /etc/giga/root_ca.cer: bad DER"
        );
    }
}
