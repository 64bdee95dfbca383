//! ReAct loop: think → act → observe, wired as a state graph.
//!
//! The think node calls the LLM and may emit tool calls; routing after think is
//! conditional: to "act" when tool calls are present, to END otherwise. Act
//! executes the calls, observe folds the results back into the conversation and
//! loops to think. [`build_react_agent`] assembles the compiled graph;
//! [`build_react_initial_state`] restores thread history from a checkpointer so
//! successive turns share one conversation.

mod act_node;
mod builder;
mod observe_node;
mod think_node;

pub use act_node::ActNode;
pub use builder::{build_react_agent, build_react_initial_state};
pub use observe_node::{ObserveNode, MAX_REACT_TURNS};
pub use think_node::ThinkNode;

use crate::state::ReActState;

/// Routing decision after the think node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolsConditionResult {
    /// Route to the tool-execution node.
    Tools,
    /// Route to END.
    End,
}

impl ToolsConditionResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tools => "tools",
            Self::End => "__end__",
        }
    }
}

/// Conditional router after think: tools when tool calls exist, END otherwise.
pub fn tools_condition(state: &ReActState) -> ToolsConditionResult {
    if state.tool_calls.is_empty() {
        ToolsConditionResult::End
    } else {
        ToolsConditionResult::Tools
    }
}
