use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// OAuth client-credentials settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub token_url: String,
    pub scope: String,
    pub client_id: String,
    pub client_secret: String,
    /// Extra trust anchor for the token and completion endpoints.
    pub cert_path: Option<PathBuf>,
    pub connect_timeout_secs: u64,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_url", &self.token_url)
            .field("scope", &self.scope)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("cert_path", &self.cert_path)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_url: "https://ngw.devices.sberbank.ru:9443/api/v2/oauth".into(),
            scope: "GIGACHAT_API_PERS".into(),
            client_id: String::new(),
            client_secret: String::new(),
            cert_path: None,
            connect_timeout_secs: 10,
        }
    }
}

impl AuthConfig {
    /// Both halves of the client credentials are present.
    pub fn has_credentials(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}
