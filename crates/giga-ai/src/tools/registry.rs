//! Tool registry and invoker.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::ToolError;

use super::{ToolArguments, ToolDescriptor, ToolHandler};

pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(10);

struct RegisteredTool {
    descriptor: ToolDescriptor,
    handler: Arc<dyn ToolHandler>,
}

/// Maps tool names to handlers. Owned by a session; registration order
/// is kept for listing.
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    timeout: Duration,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            timeout: DEFAULT_TOOL_TIMEOUT,
        }
    }

    /// Bound for every single invocation.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Register a tool. A duplicate name replaces the earlier handler.
    pub fn register(&mut self, descriptor: ToolDescriptor, handler: Arc<dyn ToolHandler>) {
        if let Some(existing) = self
            .tools
            .iter_mut()
            .find(|t| t.descriptor.name == descriptor.name)
        {
            debug!(tool = %descriptor.name, "replacing tool handler");
            existing.descriptor = descriptor;
            existing.handler = handler;
            return;
        }
        self.tools.push(RegisteredTool {
            descriptor,
            handler,
        });
    }

    pub fn list(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(|t| t.descriptor.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Run a tool by name.
    ///
    /// The handler runs on its own task so a panic or a hang stays
    /// contained: panics become `Handler` errors and calls that outlive
    /// the timeout are aborted.
    pub async fn invoke(&self, name: &str, arguments: ToolArguments) -> Result<String, ToolError> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.descriptor.name == name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;

        debug!(tool = %name, "invoking tool");
        let handler = Arc::clone(&tool.handler);
        let mut task = tokio::spawn(async move { handler.call(arguments).await });

        match tokio::time::timeout(self.timeout, &mut task).await {
            Ok(Ok(Ok(text))) => Ok(text),
            Ok(Ok(Err(message))) => {
                warn!(tool = %name, error = %message, "tool failed");
                Err(ToolError::Handler {
                    name: name.to_string(),
                    message,
                })
            }
            Ok(Err(join_err)) => {
                warn!(tool = %name, error = %join_err, "tool task aborted");
                Err(ToolError::Handler {
                    name: name.to_string(),
                    message: if join_err.is_panic() {
                        "handler panicked".to_string()
                    } else {
                        join_err.to_string()
                    },
                })
            }
            Err(_) => {
                task.abort();
                warn!(tool = %name, timeout = ?self.timeout, "tool timed out");
                Err(ToolError::Timeout {
                    name: name.to_string(),
                    after: self.timeout,
                })
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
