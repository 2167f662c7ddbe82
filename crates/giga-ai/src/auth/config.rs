//! Token endpoint configuration.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub(crate) const DEFAULT_TOKEN_URL: &str = "https://ngw.devices.sberbank.ru:9443/api/v2/oauth";
pub(crate) const DEFAULT_SCOPE: &str = "GIGACHAT_API_PERS";

/// Client identity used for the client-credentials flow.
#[derive(Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    pub scope: String,
}

impl fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("token_url", &self.token_url)
            .field("scope", &self.scope)
            .finish()
    }
}

impl OAuthConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
        }
    }

    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// `base64(client_id:client_secret)` for the Basic authorization header.
    pub(crate) fn basic_credentials(&self) -> String {
        STANDARD.encode(format!("{}:{}", self.client_id, self.client_secret))
    }
}
