//! Tools the model's host can delegate to external services.
//!
//! A tool is a `ToolDescriptor` (name, description, JSON input schema)
//! plus a `ToolHandler` that performs the action and returns text.

mod datetime;
mod registry;
mod remote;

pub use datetime::{DateTimeTool, DATETIME_TOOL_NAME};
pub use registry::{ToolRegistry, DEFAULT_TOOL_TIMEOUT};
pub use remote::{discover_tools, RemoteTool};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Named arguments of one tool call.
pub type ToolArguments = serde_json::Map<String, serde_json::Value>;

/// Tool metadata, serialized exactly as the `/tools/list` endpoint lists it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// Performs one tool's action. Errors are plain messages; the registry
/// wraps them into `ToolError::Handler`.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, arguments: ToolArguments) -> Result<String, String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_uses_camel_case_schema_key() {
        let descriptor = DateTimeTool::descriptor();
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["name"], "get_current_datetime");
        assert!(json.get("inputSchema").is_some());
        assert!(json.get("input_schema").is_none());

        let back: ToolDescriptor = serde_json::from_value(json).unwrap();
        assert_eq!(back, descriptor);
    }
}
