//! Wires configuration into a ready session.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use giga_ai::tools::{discover_tools, DateTimeTool};
use giga_ai::{
    build_http_client, GigaChatClient, GigaChatConfig, HttpSettings, OAuthConfig, Session,
    Temperature, TokenCache, ToolRegistry,
};
use giga_common::{ConfigError, GigaError};
use giga_config::{ChatConfig, GigaConfig, ToolsConfig};
use tracing::{info, warn};

/// Everything the shell needs to start.
pub struct Boot {
    pub session: Session,
    pub temperature: Temperature,
    pub resources_dir: PathBuf,
}

pub async fn boot(config: &GigaConfig) -> Result<Boot, GigaError> {
    if !config.auth.has_credentials() {
        return Err(ConfigError::ValidationError(format!(
            "client credentials missing: set {} and {} or fill [auth] in the config",
            giga_config::env::CLIENT_ID_VAR,
            giga_config::env::CLIENT_SECRET_VAR
        ))
        .into());
    }

    let temperature = Temperature::new(config.chat.temperature)
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

    let auth_http = build_http_client(&HttpSettings {
        cert_path: config.auth.cert_path.clone(),
        connect_timeout: Duration::from_secs(config.auth.connect_timeout_secs),
        request_timeout: Some(Duration::from_secs(config.api.request_timeout_secs)),
    })?;
    let api_http = build_http_client(&HttpSettings {
        cert_path: config.auth.cert_path.clone(),
        connect_timeout: Duration::from_secs(config.api.connect_timeout_secs),
        request_timeout: Some(Duration::from_secs(config.api.request_timeout_secs)),
    })?;

    let oauth = OAuthConfig::new(&config.auth.client_id, &config.auth.client_secret)
        .with_token_url(&config.auth.token_url)
        .with_scope(&config.auth.scope);
    let tokens = Arc::new(TokenCache::new(oauth, auth_http));

    let chat = GigaChatConfig::default()
        .with_completion_url(&config.api.completion_url)
        .with_model(&config.api.model);
    let client = Arc::new(GigaChatClient::new(chat, api_http, tokens));

    let tools = build_tools(&config.tools).await?;
    info!(tools = tools.len(), "tool registry ready");

    let mut session = Session::new(client)
        .with_max_messages(config.chat.max_messages)
        .with_max_tokens(config.api.max_tokens)
        .with_tools(tools);
    if let Some(prompt) = read_system_prompt(&config.chat) {
        session.set_system_prompt(prompt);
    }
    info!(session = %session.id(), model = %config.api.model, "session started");

    Ok(Boot {
        session,
        temperature,
        resources_dir: config.chat.resources_dir.clone(),
    })
}

/// Registers the tools advertised by the tool server when discovery is
/// on, otherwise the built-in datetime tool.
pub async fn build_tools(config: &ToolsConfig) -> Result<ToolRegistry, GigaError> {
    let timeout = Duration::from_secs(config.timeout_secs);
    let http = build_http_client(&HttpSettings {
        cert_path: None,
        connect_timeout: timeout,
        request_timeout: Some(timeout),
    })?;
    let mut registry = ToolRegistry::new().with_timeout(timeout);

    if config.discover {
        match discover_tools(&http, &config.server_url).await {
            Ok(tools) => {
                for tool in tools {
                    let descriptor = tool.descriptor().clone();
                    registry.register(descriptor, Arc::new(tool));
                }
                return Ok(registry);
            }
            Err(e) => warn!(error = %e, "falling back to the built-in datetime tool"),
        }
    }

    registry.register(
        DateTimeTool::descriptor(),
        Arc::new(DateTimeTool::new(http, &config.server_url)),
    );
    Ok(registry)
}

/// The system prompt file, if present and non-empty.
fn read_system_prompt(chat: &ChatConfig) -> Option<String> {
    let path = chat.system_prompt_path();
    match std::fs::read_to_string(&path) {
        Ok(text) if !text.trim().is_empty() => {
            info!(path = %path.display(), "system prompt loaded");
            Some(text.trim().to_string())
        }
        Ok(_) => None,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read system prompt");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn missing_credentials_fail_fast() {
        let err = boot(&GigaConfig::default()).await.err().unwrap();
        assert!(err.to_string().contains("GIGACHAT_CLIENT_ID"));
    }

    #[tokio::test]
    async fn boot_loads_system_prompt_from_resources() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("system_prompt.txt"), "  Answer briefly.\n").unwrap();

        let mut config = GigaConfig::default();
        config.auth.client_id = "id".into();
        config.auth.client_secret = "secret".into();
        config.chat.resources_dir = dir.path().to_path_buf();
        config.chat.temperature = 1.2;

        let boot = boot(&config).await.unwrap();
        assert_eq!(boot.session.system_prompt(), Some("Answer briefly."));
        assert_eq!(boot.temperature.value(), 1.2);
        assert_eq!(boot.session.context().max_messages(), 10);
    }

    #[test]
    fn absent_prompt_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let chat = ChatConfig {
            resources_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        assert!(read_system_prompt(&chat).is_none());
    }

    #[tokio::test]
    async fn builtin_datetime_tool_without_discovery() {
        let registry = build_tools(&ToolsConfig::default()).await.unwrap();
        let names: Vec<_> = registry.list().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["get_current_datetime"]);
    }

    #[tokio::test]
    async fn discovery_registers_advertised_tools() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tools/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tools": [
                    DateTimeTool::descriptor(),
                    {"name": "weather", "description": "forecast", "inputSchema": {"type": "object"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = ToolsConfig {
            server_url: server.uri(),
            discover: true,
            ..Default::default()
        };
        let registry = build_tools(&config).await.unwrap();
        let names: Vec<_> = registry.list().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["get_current_datetime", "weather"]);
    }

    #[tokio::test]
    async fn failed_discovery_falls_back() {
        let config = ToolsConfig {
            server_url: "http://127.0.0.1:9".into(),
            discover: true,
            timeout_secs: 2,
        };
        let registry = build_tools(&config).await.unwrap();
        assert_eq!(registry.len(), 1);
    }
}
