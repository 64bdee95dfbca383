//! Act node: execute the round's tool calls and collect results.
//!
//! A failing tool never fails the graph: the error is written into the
//! corresponding tool result and flows back to the model, which can retry or
//! answer without the tool.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::state::{ReActState, ToolResult};
use crate::tool_source::ToolSource;

/// Parses a tool-call arguments string to JSON; malformed input degrades to an
/// empty object so the tool still runs.
fn parse_arguments(arguments: &str) -> Value {
    if arguments.trim().is_empty() {
        return serde_json::json!({});
    }
    match serde_json::from_str(arguments) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, arguments = %arguments, "tool arguments parse failed, using empty object");
            serde_json::json!({})
        }
    }
}

fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(max_len).collect::<String>())
    }
}

/// Act node: one ReAct step that executes tool calls and fills tool_results.
pub struct ActNode {
    tools: Box<dyn ToolSource>,
}

impl ActNode {
    pub fn new(tools: Box<dyn ToolSource>) -> Self {
        Self { tools }
    }
}

#[async_trait]
impl Node<ReActState> for ActNode {
    fn id(&self) -> &str {
        "act"
    }

    async fn run(&self, state: ReActState) -> Result<(ReActState, Next), AgentError> {
        let mut tool_results = Vec::with_capacity(state.tool_calls.len());

        for tc in &state.tool_calls {
            let args = parse_arguments(&tc.arguments);
            debug!(tool = %tc.name, args = ?args, "calling tool");

            match self.tools.call_tool(&tc.name, args).await {
                Ok(content) => {
                    trace!(
                        tool = %tc.name,
                        result_preview = %truncate_for_log(&content.text, 200),
                        "tool returned"
                    );
                    tool_results.push(ToolResult {
                        call_id: tc.id.clone(),
                        name: Some(tc.name.clone()),
                        content: content.text,
                        is_error: false,
                    });
                }
                Err(e) => {
                    warn!(tool = %tc.name, error = %e, "tool call failed");
                    tool_results.push(ToolResult {
                        call_id: tc.id.clone(),
                        name: Some(tc.name.clone()),
                        content: format!(
                            "Error executing tool '{}': {}. Please fix the error and try again.",
                            tc.name, e
                        ),
                        is_error: true,
                    });
                }
            }
        }

        let new_state = ReActState {
            messages: state.messages,
            tool_calls: state.tool_calls,
            tool_results,
            turn_count: state.turn_count,
        };
        Ok((new_state, Next::Continue))
    }
}
