use serde::{Deserialize, Serialize};

/// Tool server the shell delegates tool calls to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub server_url: String,
    /// Upper bound for a single tool invocation.
    pub timeout_secs: u64,
    /// Register every tool advertised by `GET /tools/list` at startup.
    pub discover: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080".into(),
            timeout_secs: 10,
            discover: false,
        }
    }
}
