//! Access token value and token-response parsing.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use crate::AuthError;

/// Tokens are treated as expired this long before their real expiry.
pub const SAFETY_MARGIN_SECS: i64 = 60;

#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl AccessToken {
    /// Usable while `now < expires_at - 60s`.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at - Duration::seconds(SAFETY_MARGIN_SECS)
    }
}

/// Cache slot state. A missing `expires_at` in the response leaves the
/// expiry at the Unix epoch, which always reads as expired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TokenSlot {
    pub value: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl Default for TokenSlot {
    fn default() -> Self {
        Self {
            value: None,
            expires_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

impl TokenSlot {
    pub fn token(&self) -> Option<AccessToken> {
        self.value.as_ref().map(|value| AccessToken {
            value: value.clone(),
            expires_at: self.expires_at,
        })
    }

    pub fn usable_at(&self, now: DateTime<Utc>) -> Option<AccessToken> {
        self.token().filter(|t| t.is_usable_at(now))
    }
}

/// Parse `{access_token, expires_at (epoch ms)}`. Missing fields are
/// tolerated; a body that is not JSON is not.
pub(crate) fn parse_token_response(body: &str) -> Result<TokenSlot, AuthError> {
    let json: serde_json::Value =
        serde_json::from_str(body).map_err(|e| AuthError::Parse(e.to_string()))?;

    let value = json["access_token"].as_str().map(String::from);
    let expires_at = json["expires_at"]
        .as_i64()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

    Ok(TokenSlot { value, expires_at })
}
