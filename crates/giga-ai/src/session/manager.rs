//! Session struct and its configuration.

use std::sync::Arc;

use giga_common::SessionId;

use crate::context::{ConversationContext, DEFAULT_MAX_MESSAGES};
use crate::token_tracker::TokenTracker;
use crate::tools::ToolRegistry;
use crate::CompletionClient;

pub struct Session {
    pub(super) id: SessionId,
    pub(super) context: ConversationContext,
    pub(super) client: Arc<dyn CompletionClient>,
    pub(super) tools: ToolRegistry,
    pub(super) tracker: TokenTracker,
    /// Reply budget for turns and summaries.
    pub(super) max_tokens: u32,
}

impl Session {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            id: SessionId::new(),
            context: ConversationContext::new(DEFAULT_MAX_MESSAGES),
            client,
            tools: ToolRegistry::new(),
            tracker: TokenTracker::new(),
            max_tokens: 1024,
        }
    }

    /// Resize the context. Any existing history is kept.
    pub fn with_max_messages(mut self, max_messages: usize) -> Self {
        let mut context = ConversationContext::new(max_messages);
        for message in self.context.messages() {
            context.append(message.clone());
        }
        self.context = context;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.context.set_system_prompt(prompt);
        self
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Replace the system prompt; blank text removes it.
    pub fn set_system_prompt(&mut self, prompt: impl Into<String>) {
        self.context.set_system_prompt(prompt);
    }

    pub fn system_prompt(&self) -> Option<&str> {
        self.context.system_prompt()
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut ToolRegistry {
        &mut self.tools
    }

    pub fn tracker(&self) -> &TokenTracker {
        &self.tracker
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Drop the history but keep the system prompt.
    pub fn clear_history(&mut self) {
        self.context.clear_history();
    }
}
