//! State and tool types for the ReAct graph (think → act → observe).
//!
//! `ReActState` flows through [`StateGraph`](crate::graph::StateGraph); the think
//! node writes `tool_calls`, act fills `tool_results`, observe merges results back
//! into `messages` and clears both.

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// One tool invocation produced by the LLM and consumed by the act node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool name as listed by the ToolSource.
    pub name: String,
    /// Arguments as a JSON string; parsed by act before calling the tool.
    pub arguments: String,
    /// Provider-assigned call id, used to correlate with `ToolResult::call_id`.
    pub id: Option<String>,
}

/// Result of executing one tool call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolResult {
    /// Id of the tool call this result belongs to.
    pub call_id: Option<String>,
    /// Tool name; alternative to `call_id` for matching.
    pub name: Option<String>,
    /// Result text.
    pub content: String,
    /// True when the tool failed and `content` carries the error message.
    #[serde(default)]
    pub is_error: bool,
}

/// State for the ReAct graph: conversation plus per-round tool data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReActState {
    /// Conversation history (System, User, Assistant).
    pub messages: Vec<Message>,
    /// Tool calls from the current round (think writes, act reads).
    pub tool_calls: Vec<ToolCall>,
    /// Tool results from the current round (act writes, observe merges and clears).
    pub tool_results: Vec<ToolResult>,
    /// Completed observe rounds; observe ends the run at [`MAX_REACT_TURNS`](crate::agent::react::MAX_REACT_TURNS).
    #[serde(default)]
    pub turn_count: u32,
}

impl ReActState {
    /// Content of the chronologically last assistant message, if any.
    ///
    /// An assistant turn that carried only tool calls yields `Some("")`; `None`
    /// means no assistant message exists at all.
    pub fn last_assistant_reply(&self) -> Option<String> {
        self.messages.iter().rev().find_map(|m| match m {
            Message::Assistant(s) => Some(s.clone()),
            _ => None,
        })
    }
}
