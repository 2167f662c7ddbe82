//! Bounded conversation history.
//!
//! Holds at most one system message, always at index 0. Once the log
//! reaches `max_messages` it is compressed: the older turns are replaced
//! by a model-written summary and only the last two messages survive
//! verbatim.

mod compress;


pub use compress::CompressionReport;

use crate::{Message, Role};

pub const DEFAULT_MAX_MESSAGES: usize = 10;

/// Whether the log still has room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    Active,
    Full,
}

#[derive(Debug, Clone)]
pub struct ConversationContext {
    messages: Vec<Message>,
    max_messages: usize,
}

impl ConversationContext {
    pub fn new(max_messages: usize) -> Self {
        Self {
            messages: Vec::new(),
            max_messages,
        }
    }

    /// Append to the end of the log. A system message replaces the one at
    /// index 0, or is inserted there if there is none.
    pub fn append(&mut self, message: Message) {
        if message.role != Role::System {
            self.messages.push(message);
            return;
        }
        if self.has_system_message() {
            self.messages[0] = message;
        } else {
            self.messages.insert(0, message);
        }
    }

    /// Set the system prompt. Blank text removes it.
    pub fn set_system_prompt(&mut self, prompt: impl Into<String>) {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            if self.has_system_message() {
                self.messages.remove(0);
            }
            return;
        }
        self.append(Message::system(prompt));
    }

    pub fn system_prompt(&self) -> Option<&str> {
        self.messages
            .first()
            .filter(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
    }

    pub fn has_system_message(&self) -> bool {
        self.system_prompt().is_some()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn max_messages(&self) -> usize {
        self.max_messages
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.max_messages
    }

    pub fn state(&self) -> ContextState {
        if self.is_full() {
            ContextState::Full
        } else {
            ContextState::Active
        }
    }

    /// Sum of per-message token counts.
    pub fn total_tokens(&self) -> u64 {
        self.messages.iter().map(|m| m.token_count).sum()
    }

    /// Drop the history but keep the system prompt.
    pub fn clear_history(&mut self) {
        self.messages.retain(|m| m.role == Role::System);
    }
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MESSAGES)
    }
}
