//! CompletionClient implementation for GigaChatClient.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use tracing::{debug, warn};

use crate::{ApiError, CompletionClient, CompletionParams, CompletionResult, Message};

use super::client::{parse_response, GigaChatClient};

#[async_trait]
impl CompletionClient for GigaChatClient {
    async fn complete(
        &self,
        messages: &[Message],
        params: CompletionParams,
    ) -> Result<CompletionResult, ApiError> {
        let token = self.tokens.access_token().await?;
        let body = self.build_request_body(messages, params);

        debug!(
            model = %self.config.model,
            messages = messages.len(),
            temperature = params.temperature.value(),
            "GigaChat completion request"
        );

        let response = self
            .http
            .post(&self.config.completion_url)
            .header(AUTHORIZATION, format!("Bearer {}", token.value))
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            if status == reqwest::StatusCode::UNAUTHORIZED {
                warn!("completion rejected the bearer token, dropping it");
                self.tokens.invalidate().await;
            }
            let text = response.text().await.unwrap_or_default();
            let body = text.chars().take(500).collect::<String>();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let result = parse_response(&text)?;
        debug!(
            total_tokens = result.usage.total_tokens,
            has_content = result.content.is_some(),
            "GigaChat completion response"
        );
        Ok(result)
    }
}
