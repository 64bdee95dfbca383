//! Tool source abstraction: list tools and call a tool.
//!
//! The think node gets `list_tools()` to describe tools to the model; the act
//! node gets `call_tool(name, args)` to execute them. Implementations:
//! [`AggregateToolSource`](crate::tools::AggregateToolSource) (registry of
//! [`Tool`](crate::tools::Tool)s) and [`MockToolSource`] for tests.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Tool specification given to the model: name, description, JSON Schema.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolSpec {
    /// Tool name used in tool calls.
    pub name: String,
    /// Human-readable description for the model.
    pub description: Option<String>,
    /// JSON Schema for the arguments object.
    pub input_schema: Value,
}

/// Result of a single tool call.
#[derive(Debug, Clone)]
pub struct ToolCallContent {
    /// Result text handed back to the model.
    pub text: String,
}

/// Errors from listing or calling tools.
#[derive(Debug, Error)]
pub enum ToolSourceError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("invalid arguments: {0}")]
    InvalidInput(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Tool source: list tools and call a tool by name.
#[async_trait]
pub trait ToolSource: Send + Sync {
    /// Lists the available tools.
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError>;

    /// Calls a tool by name with JSON arguments.
    async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<ToolCallContent, ToolSourceError>;
}

/// Mock tool source: fixed tool list and fixed call result, for tests.
pub struct MockToolSource {
    tools: Vec<ToolSpec>,
    call_result: String,
}

impl MockToolSource {
    /// Source with the given tools, answering every call with `call_result`.
    pub fn new(tools: Vec<ToolSpec>, call_result: impl Into<String>) -> Self {
        Self {
            tools,
            call_result: call_result.into(),
        }
    }

    /// One `get_todo_item` tool answering with a canned todo payload.
    pub fn todo_example() -> Self {
        Self::new(
            vec![ToolSpec {
                name: "get_todo_item".to_string(),
                description: Some("Fetch a todo item by id.".to_string()),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": { "todo_id": { "type": "integer" } }
                }),
            }],
            "{\n  \"id\": 1,\n  \"userId\": 1,\n  \"title\": \"delectus aut autem\",\n  \"completed\": false\n}",
        )
    }
}

#[async_trait]
impl ToolSource for MockToolSource {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError> {
        Ok(self.tools.clone())
    }

    async fn call_tool(
        &self,
        _name: &str,
        _arguments: Value,
    ) -> Result<ToolCallContent, ToolSourceError> {
        Ok(ToolCallContent {
            text: self.call_result.clone(),
        })
    }
}
