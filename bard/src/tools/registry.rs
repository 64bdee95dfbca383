//! Tool registry: collects tools by name and exposes them as a ToolSource.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::tool_source::{ToolCallContent, ToolSource, ToolSourceError, ToolSpec};
use crate::tools::Tool;

/// Registry of tools behind one [`ToolSource`].
///
/// Registering a tool with an existing name replaces it.
pub struct AggregateToolSource {
    tools: RwLock<HashMap<String, Box<dyn Tool>>>,
}

impl AggregateToolSource {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            tools: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a tool under its own name.
    pub async fn register(&self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.write().await.insert(name, tool);
    }

    /// Number of registered tools.
    pub async fn len(&self) -> usize {
        self.tools.read().await.len()
    }

    /// True when no tool is registered.
    pub async fn is_empty(&self) -> bool {
        self.tools.read().await.is_empty()
    }
}

impl Default for AggregateToolSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolSource for AggregateToolSource {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError> {
        let guard = self.tools.read().await;
        let mut specs: Vec<ToolSpec> = guard.values().map(|t| t.spec()).collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(specs)
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<ToolCallContent, ToolSourceError> {
        let guard = self.tools.read().await;
        let tool = guard
            .get(name)
            .ok_or_else(|| ToolSourceError::NotFound(name.to_string()))?;
        tool.call(arguments).await
    }
}
