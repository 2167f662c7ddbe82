//! GigaChat client struct, request building, and response parsing.

use std::sync::Arc;

use crate::auth::TokenProvider;
use crate::{ApiError, CompletionParams, CompletionResult, Message, TokenUsage};

use super::config::{GigaChatConfig, TOP_P};

/// GigaChat completion client.
pub struct GigaChatClient {
    pub(crate) config: GigaChatConfig,
    pub(crate) http: reqwest::Client,
    pub(crate) tokens: Arc<dyn TokenProvider>,
}

impl GigaChatClient {
    pub fn new(
        config: GigaChatConfig,
        http: reqwest::Client,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            config,
            http,
            tokens,
        }
    }

    /// Build the JSON request body. `serde_json` escapes quotes,
    /// backslashes and control characters in every content string.
    pub(crate) fn build_request_body(
        &self,
        messages: &[Message],
        params: CompletionParams,
    ) -> serde_json::Value {
        let msgs: Vec<_> = messages
            .iter()
            .map(|msg| {
                serde_json::json!({
                    "role": msg.role.as_str(),
                    "content": msg.content,
                })
            })
            .collect();

        serde_json::json!({
            "model": self.config.model,
            "messages": msgs,
            "temperature": params.temperature.value(),
            "top_p": TOP_P,
            "n": 1,
            "stream": false,
            "max_tokens": params.max_tokens,
        })
    }
}

/// Parse a completion response body.
///
/// Absent `choices`, `message` or `content` yield `content: None`; usage
/// counters default to 0 independently. A body that is not JSON is an error.
pub(crate) fn parse_response(body: &str) -> Result<CompletionResult, ApiError> {
    let json: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))?;

    let content = json["choices"][0]["message"]["content"]
        .as_str()
        .map(String::from);

    let usage = TokenUsage {
        prompt_tokens: json["usage"]["prompt_tokens"].as_u64().unwrap_or(0),
        completion_tokens: json["usage"]["completion_tokens"].as_u64().unwrap_or(0),
        total_tokens: json["usage"]["total_tokens"].as_u64().unwrap_or(0),
    };

    Ok(CompletionResult {
        content,
        usage,
        ..Default::default()
    })
}
