//! GigaChat conversation engine.
//!
//! Provides:
//! - OAuth client-credentials token caching with expiry-aware refresh
//! - A chat-completion transport for the GigaChat API
//! - A bounded conversation context that compresses itself by summary
//! - A tool registry that dispatches named actions to external handlers
//! - A session that ties the pieces together one turn at a time

pub mod auth;
pub mod context;
pub mod error;
pub mod gigachat;
pub mod http;
pub mod session;
pub mod token_tracker;
pub mod tools;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

pub use auth::{AccessToken, OAuthConfig, TokenCache, TokenProvider};
pub use context::{CompressionReport, ConversationContext, DEFAULT_MAX_MESSAGES};
pub use error::{ApiError, AuthError, CompressionError, HttpSetupError, TemperatureError, ToolError};
pub use gigachat::{GigaChatClient, GigaChatConfig};
pub use http::{build_http_client, HttpSettings};
pub use session::Session;
pub use token_tracker::{CallKind, TokenTracker};
pub use tools::{ToolArguments, ToolDescriptor, ToolHandler, ToolRegistry};

/// Anything that can turn a message list into a model reply.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        messages: &[Message],
        params: CompletionParams,
    ) -> Result<CompletionResult, ApiError>;
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Tokens billed for producing this message. Only assistant replies
    /// carry a non-zero count.
    #[serde(default)]
    pub token_count: u64,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            token_count: 0,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn with_tokens(mut self, token_count: u64) -> Self {
        self.token_count = token_count;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sampling temperature, always within `[0.0, 2.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Temperature(f64);

impl Temperature {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 2.0;
    /// Used for summaries, biased toward factual output.
    pub const SUMMARY: Temperature = Temperature(0.5);

    pub fn new(value: f64) -> Result<Self, TemperatureError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TemperatureError::OutOfRange(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Temperature {
    fn default() -> Self {
        Self(0.87)
    }
}

impl FromStr for Temperature {
    type Err = TemperatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| TemperatureError::NotANumber(s.trim().to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Per-call sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionParams {
    pub temperature: Temperature,
    pub max_tokens: u32,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self {
            temperature: Temperature::default(),
            max_tokens: 1024,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// Outcome of one successful completion call.
///
/// `content` is `None` when the reply carried no text; a failed call is an
/// `Err(ApiError)` instead. The context fields are filled in by the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionResult {
    pub content: Option<String>,
    pub usage: TokenUsage,
    pub context_size: usize,
    pub context_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_accepts_inclusive_range() {
        assert_eq!(Temperature::new(0.0).unwrap().value(), 0.0);
        assert_eq!(Temperature::new(2.0).unwrap().value(), 2.0);
        assert_eq!(Temperature::new(0.87).unwrap().to_string(), "0.87");
    }

    #[test]
    fn temperature_rejects_out_of_range() {
        assert!(matches!(
            Temperature::new(2.5),
            Err(TemperatureError::OutOfRange(v)) if v == 2.5
        ));
        assert!(Temperature::new(-0.01).is_err());
        assert!(Temperature::new(f64::NAN).is_err());
    }

    #[test]
    fn temperature_parses_from_str() {
        let t: Temperature = " 1.5 ".parse().unwrap();
        assert_eq!(t.value(), 1.5);
        assert!(matches!(
            "warm".parse::<Temperature>(),
            Err(TemperatureError::NotANumber(s)) if s == "warm"
        ));
        assert!(matches!(
            "2.5".parse::<Temperature>(),
            Err(TemperatureError::OutOfRange(_))
        ));
    }

    #[test]
    fn message_constructors() {
        let m = Message::assistant("hi").with_tokens(42);
        assert_eq!(m.role, Role::Assistant);
        assert_eq!(m.content, "hi");
        assert_eq!(m.token_count, 42);
        assert_eq!(Message::user("q").token_count, 0);
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        assert_eq!(Role::System.to_string(), "system");
    }
}
