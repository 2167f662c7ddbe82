//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults of the GigaChat public API.

mod api;
mod auth;
mod chat;
mod logging;
mod server;
mod tools;

pub use api::*;
pub use auth::*;
pub use chat::*;
pub use logging::*;
pub use server::*;
pub use tools::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GigaConfig {
    pub auth: AuthConfig,
    pub api: ApiConfig,
    pub chat: ChatConfig,
    pub tools: ToolsConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: GigaConfig = toml::from_str("").unwrap();
        assert_eq!(config.api.model, "GigaChat");
        assert_eq!(config.chat.max_messages, 10);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.scope, "GIGACHAT_API_PERS");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: GigaConfig = toml::from_str(
            r#"
[chat]
temperature = 0.3
"#,
        )
        .unwrap();
        assert_eq!(config.chat.temperature, 0.3);
        assert_eq!(config.chat.max_messages, 10);
        assert_eq!(config.tools.timeout_secs, 10);
    }
}
