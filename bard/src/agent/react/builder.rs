//! Assembles the ReAct graph and its per-turn initial state.

use std::collections::HashMap;
use std::sync::Arc;

use crate::graph::{CompilationError, CompiledStateGraph, StateGraph, END, START};
use crate::llm::LlmClient;
use crate::memory::{CheckpointError, Checkpointer, RunnableConfig};
use crate::message::Message;
use crate::state::ReActState;
use crate::tool_source::ToolSource;

use super::{tools_condition, ActNode, ObserveNode, ThinkNode};

/// Builds the compiled ReAct graph: think → (conditional) act → observe → think.
///
/// After think, routing is conditional: to "act" when the model issued tool
/// calls, straight to END otherwise. Observe loops back to think until the
/// model stops calling tools or the turn cap ends the run. When a checkpointer
/// is given the final state is saved per `config.thread_id`.
pub fn build_react_agent(
    llm: Arc<dyn LlmClient>,
    tools: Box<dyn ToolSource>,
    checkpointer: Option<Arc<dyn Checkpointer<ReActState>>>,
) -> Result<CompiledStateGraph<ReActState>, CompilationError> {
    let think = ThinkNode::new(llm);
    let act = ActNode::new(tools);
    let observe = ObserveNode::new();

    let path_map: HashMap<String, String> = [
        ("tools".to_string(), "act".to_string()),
        (END.to_string(), END.to_string()),
    ]
    .into_iter()
    .collect();

    let mut graph = StateGraph::<ReActState>::new();
    graph
        .add_node("think", Arc::new(think))
        .add_node("act", Arc::new(act))
        .add_node("observe", Arc::new(observe))
        .add_edge(START, "think")
        .add_conditional_edges(
            "think",
            Arc::new(|state: &ReActState| tools_condition(state).as_str().to_string()),
            Some(path_map),
        )
        .add_edge("act", "observe")
        .add_edge("observe", "think");

    match checkpointer {
        Some(cp) => graph.compile_with_checkpointer(cp),
        None => graph.compile(),
    }
}

/// Builds the state for one turn, restoring thread history when available.
///
/// With a checkpointer and `config.thread_id`, the latest checkpoint for the
/// thread is loaded, the new user message appended, and per-round tool fields
/// cleared; this is what carries the conversation across turns. Otherwise a
/// fresh state starts from the system prompt and the user message.
pub async fn build_react_initial_state(
    user_message: &str,
    checkpointer: Option<&dyn Checkpointer<ReActState>>,
    config: Option<&RunnableConfig>,
    system_prompt: Option<&str>,
) -> Result<ReActState, CheckpointError> {
    if let (Some(cp), Some(cfg)) = (checkpointer, config) {
        if cfg.thread_id.is_some() {
            if let Some((checkpoint, _meta)) = cp.get_tuple(cfg).await? {
                let mut state = checkpoint.state;
                state.messages.push(Message::user(user_message));
                state.tool_calls.clear();
                state.tool_results.clear();
                return Ok(state);
            }
        }
    }

    let mut messages = Vec::new();
    if let Some(prompt) = system_prompt {
        if !prompt.is_empty() {
            messages.push(Message::system(prompt));
        }
    }
    messages.push(Message::user(user_message));
    Ok(ReActState {
        messages,
        ..Default::default()
    })
}
