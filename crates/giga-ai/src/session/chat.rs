//! Turn handling for Session.

use tracing::{debug, info, warn};

use crate::context::CompressionReport;
use crate::token_tracker::CallKind;
use crate::tools::ToolArguments;
use crate::{
    ApiError, CompletionParams, CompletionResult, CompressionError, Message, Temperature,
    ToolError,
};

use super::manager::Session;

impl Session {
    /// Send one user turn and record the reply.
    ///
    /// The user message stays in the context even when the call fails;
    /// a failed reply is never recorded. When the reply fills the context,
    /// it is compressed before returning. A failed compression is logged
    /// and does not fail the turn.
    pub async fn send_turn(
        &mut self,
        user_text: impl Into<String>,
        temperature: Temperature,
    ) -> Result<CompletionResult, ApiError> {
        let turn = giga_common::new_correlation_id();
        self.context.append(Message::user(user_text));

        let params = CompletionParams {
            temperature,
            max_tokens: self.max_tokens,
        };
        debug!(session = %self.id, turn = %turn, messages = self.context.len(), "sending turn");

        let mut result = match self.client.complete(self.context.messages(), params).await {
            Ok(result) => result,
            Err(e) => {
                warn!(session = %self.id, turn = %turn, error = %e, "turn failed");
                return Err(e);
            }
        };

        self.tracker.record(CallKind::Turn, &result.usage);
        match &result.content {
            Some(content) => self.context.append(
                Message::assistant(content.clone()).with_tokens(result.usage.total_tokens),
            ),
            None => warn!(session = %self.id, turn = %turn, "reply carried no text"),
        }

        result.context_size = self.context.len();
        result.context_tokens = self.context.total_tokens();
        info!(
            session = %self.id,
            turn = %turn,
            total_tokens = result.usage.total_tokens,
            context_size = result.context_size,
            "turn complete"
        );

        if self.context.is_full() {
            match self.compress_context().await {
                Ok(report) => {
                    debug!(session = %self.id, before = report.before, after = report.after, "auto-compressed")
                }
                Err(e) => warn!(session = %self.id, error = %e, "auto-compression lost history"),
            }
        }

        Ok(result)
    }

    /// Compress the context now, regardless of its size.
    pub async fn summarize_now(&mut self) -> Result<CompressionReport, CompressionError> {
        self.compress_context().await
    }

    /// Run a registered tool and fold its result into the context as a
    /// user message for the next turn.
    pub async fn call_tool(
        &mut self,
        name: &str,
        arguments: ToolArguments,
    ) -> Result<String, ToolError> {
        let text = self.tools.invoke(name, arguments).await?;
        self.context
            .append(Message::user(format!("[Tool Result: {name}]\n{text}")));
        Ok(text)
    }

    async fn compress_context(&mut self) -> Result<CompressionReport, CompressionError> {
        let report = self
            .context
            .compress(self.client.as_ref(), self.max_tokens)
            .await?;
        if report.summary.is_some() {
            self.tracker.record(CallKind::Summary, &report.usage);
        }
        Ok(report)
    }
}
