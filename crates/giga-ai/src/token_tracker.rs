//! Token usage tracking across a session.

use std::collections::HashMap;

use crate::TokenUsage;

/// What a completion call was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    /// A user turn.
    Turn,
    /// A compression summary.
    Summary,
}

/// Tracks cumulative token usage per call kind.
pub struct TokenTracker {
    total: TokenUsage,
    by_kind: HashMap<CallKind, TokenUsage>,
    call_count: u64,
}

fn add(into: &mut TokenUsage, usage: &TokenUsage) {
    into.prompt_tokens = into.prompt_tokens.saturating_add(usage.prompt_tokens);
    into.completion_tokens = into
        .completion_tokens
        .saturating_add(usage.completion_tokens);
    into.total_tokens = into.total_tokens.saturating_add(usage.total_tokens);
}

impl TokenTracker {
    pub fn new() -> Self {
        Self {
            total: TokenUsage::default(),
            by_kind: HashMap::new(),
            call_count: 0,
        }
    }

    /// Record token usage from a completion call.
    pub fn record(&mut self, kind: CallKind, usage: &TokenUsage) {
        add(&mut self.total, usage);
        add(self.by_kind.entry(kind).or_default(), usage);
        self.call_count += 1;
    }

    pub fn total(&self) -> &TokenUsage {
        &self.total
    }

    pub fn for_kind(&self, kind: CallKind) -> Option<&TokenUsage> {
        self.by_kind.get(&kind)
    }

    /// Total tokens as billed by the API.
    pub fn total_tokens(&self) -> u64 {
        self.total.total_tokens
    }

    pub fn call_count(&self) -> u64 {
        self.call_count
    }

    pub fn reset(&mut self) {
        self.total = TokenUsage::default();
        self.by_kind.clear();
        self.call_count = 0;
    }
}

impl Default for TokenTracker {
    fn default() -> Self {
        Self::new()
    }
}
