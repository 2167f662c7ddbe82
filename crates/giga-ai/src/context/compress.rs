//! Summary-based compression of the conversation log.

use tracing::{info, warn};

use crate::{
    CompletionClient, CompletionParams, CompressionError, Message, Role, Temperature, TokenUsage,
};

use super::ConversationContext;

/// Messages kept verbatim at the end of the log.
const KEEP_LAST: usize = 2;

const SUMMARY_INSTRUCTION: &str = "Summarize the following dialogue briefly, keeping its main \
     point and key details. Answer in 2-3 sentences:";

const SUMMARY_PREFIX: &str = "Conversation context: ";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompressionReport {
    pub before: usize,
    pub after: usize,
    /// Summary text, `None` when there was nothing to compress.
    pub summary: Option<String>,
    pub usage: TokenUsage,
}

impl ConversationContext {
    /// Replace older history with a model-written summary.
    ///
    /// Keeps the system message and the last two messages. The log is
    /// truncated even when the summary call fails; the error is returned
    /// so the caller can report the lost history.
    pub async fn compress(
        &mut self,
        client: &dyn CompletionClient,
        max_tokens: u32,
    ) -> Result<CompressionReport, CompressionError> {
        let before = self.len();
        if before <= KEEP_LAST {
            return Ok(CompressionReport {
                before,
                after: before,
                ..Default::default()
            });
        }

        let system = self.messages.first().filter(|m| m.role == Role::System).cloned();
        let tail = self.messages[before - KEEP_LAST..].to_vec();

        let params = CompletionParams {
            temperature: Temperature::SUMMARY,
            max_tokens,
        };
        let outcome = client
            .complete(&[Message::user(summary_prompt(&self.messages))], params)
            .await;

        self.messages.clear();
        self.messages.extend(system);

        let result = match outcome {
            Ok(reply) => match reply.content.filter(|s| !s.trim().is_empty()) {
                Some(summary) => {
                    self.messages
                        .push(Message::assistant(format!("{SUMMARY_PREFIX}{summary}")));
                    Ok((summary, reply.usage))
                }
                None => Err(CompressionError::EmptySummary),
            },
            Err(e) => Err(CompressionError::Summarization(e)),
        };

        self.messages.extend(tail);
        let after = self.len();

        match result {
            Ok((summary, usage)) => {
                info!(before, after, "conversation compressed");
                Ok(CompressionReport {
                    before,
                    after,
                    summary: Some(summary),
                    usage,
                })
            }
            Err(e) => {
                warn!(before, after, error = %e, "summary failed, older history dropped");
                Err(e)
            }
        }
    }
}

/// Every non-system message as `role: content`, one per line, after the
/// summary instruction.
pub(crate) fn summary_prompt(messages: &[Message]) -> String {
    let dialogue = messages
        .iter()
        .filter(|m| m.role != Role::System)
        .map(|m| format!("{}: {}", m.role, m.content))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{SUMMARY_INSTRUCTION}\n\n{dialogue}")
}
