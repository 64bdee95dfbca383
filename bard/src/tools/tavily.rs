//! Web search via the Tavily REST API.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
use crate::tools::Tool;

/// Tool name: web search.
pub const TOOL_SEARCH: &str = "search";

const TAVILY_SEARCH_URL: &str = "https://api.tavily.com/search";
const MAX_RESULTS_CAP: u64 = 20;

/// Web search tool backed by Tavily (`POST /search`).
///
/// Needs an API key (`TAVILY_API_KEY`); `max_results` defaults to 2 and callers
/// can override it per call.
pub struct TavilySearchTool {
    api_key: String,
    max_results: u64,
    client: reqwest::Client,
    endpoint: String,
}

impl TavilySearchTool {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            max_results: 2,
            client: reqwest::Client::new(),
            endpoint: TAVILY_SEARCH_URL.to_string(),
        }
    }

    /// Default number of results per search.
    pub fn with_max_results(mut self, max_results: u64) -> Self {
        self.max_results = max_results;
        self
    }

    /// Points the tool at another endpoint (tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn search(&self, query: &str, max_results: u64) -> Result<Value, ToolSourceError> {
        let body = json!({
            "api_key": self.api_key,
            "query": query,
            "max_results": max_results.min(MAX_RESULTS_CAP),
        });
        let res = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ToolSourceError::Transport(e.to_string()))?;
        if !res.status().is_success() {
            let status = res.status();
            let err_body = res.text().await.unwrap_or_default();
            return Err(ToolSourceError::Transport(format!(
                "Tavily API error {}: {}",
                status, err_body
            )));
        }
        res.json()
            .await
            .map_err(|e| ToolSourceError::Decode(e.to_string()))
    }
}

/// Renders search results as numbered title/URL/content lines for the model.
fn format_results(value: &Value) -> String {
    let results: &[Value] = value
        .get("results")
        .and_then(|r| r.as_array())
        .map(|v| v.as_slice())
        .unwrap_or(&[]);
    let mut out = String::new();
    if let Some(answer) = value.get("answer").and_then(|a| a.as_str()) {
        if !answer.trim().is_empty() {
            out.push_str(answer.trim());
            out.push_str("\n\n");
        }
    }
    for (i, r) in results.iter().enumerate() {
        let title = r.get("title").and_then(|t| t.as_str()).unwrap_or("(no title)");
        let url = r.get("url").and_then(|u| u.as_str()).unwrap_or("");
        out.push_str(&format!("[{}] {}\n  URL: {}\n", i + 1, title, url));
        if let Some(content) = r.get("content").and_then(|c| c.as_str()) {
            let content = content.trim();
            if !content.is_empty() {
                out.push_str(&format!("  {}\n", content.replace('\n', " ")));
            }
        }
        out.push('\n');
    }
    if out.is_empty() {
        out = "No results.".to_string();
    }
    out
}

#[async_trait]
impl Tool for TavilySearchTool {
    fn name(&self) -> &str {
        TOOL_SEARCH
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_SEARCH.to_string(),
            description: Some(
                "Search the web. Use for current events and up-to-date information \
                 such as today's weather."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "Search query." },
                    "max_results": {
                        "type": "integer",
                        "description": "Max results to return (default 2)."
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let query = args
            .get("query")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolSourceError::InvalidInput("missing query".to_string()))?;
        let max_results = args
            .get("max_results")
            .and_then(|v| v.as_u64())
            .unwrap_or(self.max_results);

        let out = self.search(query, max_results).await?;
        Ok(ToolCallContent {
            text: format_results(&out),
        })
    }
}
