//! Fetch a single todo item from the JSONPlaceholder REST API.
//!
//! Failures are part of the tool's result text, not errors: the model reads
//! "Error fetching todo item: ..." or "Error parsing JSON response: ..." and
//! can react, instead of the whole run failing on a flaky endpoint. One plain
//! GET per call; no retries, no timeout tuning, no caching.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
use crate::tools::Tool;

/// Tool name: fetch one todo item by id.
pub const TOOL_GET_TODO_ITEM: &str = "get_todo_item";

const TODO_BASE_URL: &str = "https://jsonplaceholder.typicode.com/todos";

/// Todo-item fetch tool (`GET {base}/{todo_id}`).
///
/// The response body is re-serialized as indented JSON with fields id, userId,
/// title, completed.
pub struct TodoTool {
    client: reqwest::Client,
    base_url: String,
}

impl TodoTool {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: TODO_BASE_URL.to_string(),
        }
    }

    /// Points the tool at another base URL (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch(&self, todo_id: i64) -> String {
        let url = format!("{}/{}", self.base_url, todo_id);

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => return format!("Error fetching todo item: {}", e),
        };
        let response = match response.error_for_status() {
            Ok(r) => r,
            Err(e) => return format!("Error fetching todo item: {}", e),
        };
        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => return format!("Error fetching todo item: {}", e),
        };

        match serde_json::from_str::<Value>(&body) {
            Ok(value) => serde_json::to_string_pretty(&value)
                .unwrap_or_else(|e| format!("Error parsing JSON response: {}", e)),
            Err(e) => format!("Error parsing JSON response: {}", e),
        }
    }
}

impl Default for TodoTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for TodoTool {
    fn name(&self) -> &str {
        TOOL_GET_TODO_ITEM
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_GET_TODO_ITEM.to_string(),
            description: Some(
                "Fetch a specific todo item from the JSONPlaceholder API. \
                 Returns the todo item as JSON text (id, userId, title, completed)."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "todo_id": {
                        "type": "integer",
                        "description": "The ID of the todo item to retrieve (default: 1)."
                    }
                }
            }),
        }
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let todo_id = args.get("todo_id").and_then(|v| v.as_i64()).unwrap_or(1);
        Ok(ToolCallContent {
            text: self.fetch(todo_id).await,
        })
    }
}
