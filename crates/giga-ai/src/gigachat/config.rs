//! GigaChat completion endpoint configuration.

pub(crate) const DEFAULT_COMPLETION_URL: &str =
    "https://gigachat.devices.sberbank.ru/api/v1/chat/completions";

/// Nucleus sampling is pinned for every request.
pub(crate) const TOP_P: f64 = 0.9;

#[derive(Debug, Clone)]
pub struct GigaChatConfig {
    pub completion_url: String,
    pub model: String,
}

impl Default for GigaChatConfig {
    fn default() -> Self {
        Self {
            completion_url: DEFAULT_COMPLETION_URL.to_string(),
            model: "GigaChat".to_string(),
        }
    }
}

impl GigaChatConfig {
    pub fn with_completion_url(mut self, url: impl Into<String>) -> Self {
        self.completion_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}
