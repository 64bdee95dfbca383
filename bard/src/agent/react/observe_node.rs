//! Observe node: fold tool results back into the conversation and decide
//! whether the loop continues.

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::message::Message;
use crate::state::ReActState;

/// Observe rounds before the loop is forced to end.
pub const MAX_REACT_TURNS: u32 = 10;

pub struct ObserveNode;

impl ObserveNode {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ObserveNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Node<ReActState> for ObserveNode {
    fn id(&self) -> &str {
        "observe"
    }

    async fn run(&self, state: ReActState) -> Result<(ReActState, Next), AgentError> {
        let mut messages = state.messages;
        for tr in &state.tool_results {
            let name = tr
                .name
                .as_deref()
                .or(tr.call_id.as_deref())
                .unwrap_or("tool");
            messages.push(Message::User(format!(
                "Tool {} returned: {}",
                name, tr.content
            )));
        }
        let next_turn = state.turn_count.saturating_add(1);
        let new_state = ReActState {
            messages,
            tool_calls: vec![],
            tool_results: vec![],
            turn_count: next_turn,
        };
        let next = if next_turn >= MAX_REACT_TURNS {
            Next::End
        } else {
            Next::Continue
        };
        Ok((new_state, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ToolResult;

    /// **Scenario**: tool results become user messages and per-round fields clear.
    #[tokio::test]
    async fn run_merges_results_and_clears_round() {
        let node = ObserveNode::new();
        let state = ReActState {
            messages: vec![Message::user("fetch it")],
            tool_results: vec![ToolResult {
                call_id: Some("call-1".into()),
                name: Some("get_todo_item".into()),
                content: "{\"id\": 1}".into(),
                is_error: false,
            }],
            ..Default::default()
        };
        let (out, next) = node.run(state).await.unwrap();
        assert_eq!(next, Next::Continue);
        assert_eq!(out.turn_count, 1);
        assert!(out.tool_calls.is_empty());
        assert!(out.tool_results.is_empty());
        assert!(matches!(
            out.messages.last(),
            Some(Message::User(s)) if s.contains("get_todo_item") && s.contains("{\"id\": 1}")
        ));
    }

    /// **Scenario**: reaching the turn cap forces Next::End.
    #[tokio::test]
    async fn run_ends_at_turn_cap() {
        let node = ObserveNode::new();
        let state = ReActState {
            turn_count: MAX_REACT_TURNS - 1,
            ..Default::default()
        };
        let (out, next) = node.run(state).await.unwrap();
        assert_eq!(out.turn_count, MAX_REACT_TURNS);
        assert_eq!(next, Next::End);
    }
}
