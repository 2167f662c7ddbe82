//! Tools hosted by a tool server (`GET /tools/list`, `POST /tools/call`).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::ToolError;

use super::{ToolArguments, ToolDescriptor, ToolHandler};

/// One tool advertised by a tool server.
pub struct RemoteTool {
    http: reqwest::Client,
    base_url: String,
    descriptor: ToolDescriptor,
}

impl RemoteTool {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, descriptor: ToolDescriptor) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            descriptor,
        }
    }

    pub fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }
}

#[async_trait]
impl ToolHandler for RemoteTool {
    async fn call(&self, arguments: ToolArguments) -> Result<String, String> {
        let response = self
            .http
            .post(format!("{}/tools/call", self.base_url))
            .json(&json!({
                "name": self.descriptor.name,
                "arguments": arguments,
            }))
            .send()
            .await
            .map_err(|e| format!("tool server unreachable: {e}"))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let json: Option<serde_json::Value> = serde_json::from_str(&body).ok();

        if !status.is_success() {
            let message = json
                .as_ref()
                .and_then(|j| j["error"].as_str())
                .map(String::from)
                .unwrap_or(body);
            return Err(format!("tool server returned HTTP {status}: {message}"));
        }

        debug!(tool = %self.descriptor.name, "remote tool answered");
        Ok(match json {
            Some(j) if !j["result"].is_null() => j["result"].to_string(),
            _ => body,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ToolListing {
    Wrapped { tools: Vec<ToolDescriptor> },
    Bare(Vec<ToolDescriptor>),
}

/// Fetch the tool server's listing and wrap each entry as a `RemoteTool`.
pub async fn discover_tools(
    http: &reqwest::Client,
    base_url: &str,
) -> Result<Vec<RemoteTool>, ToolError> {
    let base_url = base_url.trim_end_matches('/');
    let response = http
        .get(format!("{base_url}/tools/list"))
        .send()
        .await
        .map_err(|e| ToolError::Discovery(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ToolError::Discovery(format!("HTTP {status}")));
    }

    let listing: ToolListing = response
        .json()
        .await
        .map_err(|e| ToolError::Discovery(e.to_string()))?;
    let descriptors = match listing {
        ToolListing::Wrapped { tools } => tools,
        ToolListing::Bare(tools) => tools,
    };

    info!(count = descriptors.len(), url = %base_url, "discovered tools");
    Ok(descriptors
        .into_iter()
        .map(|d| RemoteTool::new(http.clone(), base_url, d))
        .collect())
}
