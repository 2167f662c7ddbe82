//! Identifiers: request ids for the token endpoint, session ids, and
//! short per-turn tags for log correlation.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Hyphenated v4 UUID, the format the token endpoint expects in `RqUID`.
pub fn new_rq_uid() -> String {
    Uuid::new_v4().hyphenated().to_string()
}

/// Eight hex digits tagging the log lines of one conversation turn.
pub fn new_correlation_id() -> String {
    let mut simple = Uuid::new_v4().simple().to_string();
    simple.truncate(8);
    simple
}

/// Identity of one chat session. Logs show the short form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }

    /// First eight hex digits.
    pub fn short(&self) -> String {
        let mut simple = self.0.simple().to_string();
        simple.truncate(8);
        simple
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short())
    }
}
