use serde::{Deserialize, Serialize};

/// Chat-completion endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub completion_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            completion_url: "https://gigachat.devices.sberbank.ru/api/v1/chat/completions".into(),
            model: "GigaChat".into(),
            max_tokens: 1024,
            connect_timeout_secs: 30,
            request_timeout_secs: 120,
        }
    }
}
