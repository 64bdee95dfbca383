//! # Bard
//!
//! A Shakespearean weather assistant built on a minimal, graph-based agent
//! runtime with a **state-in, state-out** design: one shared state type flows
//! through nodes, and conditional edges route on the updated state.
//!
//! ## What's here
//!
//! - **State graphs**: [`StateGraph`] / [`CompiledStateGraph`] with
//!   [`Node`], [`Next`], conditional edges, invoke and streaming runs.
//! - **ReAct loop**: [`ThinkNode`], [`ActNode`], [`ObserveNode`],
//!   [`tools_condition`]; [`build_react_agent`] assembles the compiled graph
//!   and [`build_react_initial_state`] restores per-thread history.
//! - **LLM clients**: [`LlmClient`] trait with [`ChatOpenAI`] (any
//!   OpenAI-compatible endpoint) and [`MockLlm`] for tests.
//! - **Memory**: [`Checkpointer`] with in-memory [`MemorySaver`], keyed by
//!   `thread_id` via [`RunnableConfig`]. Process-local only.
//! - **Trimming**: [`trim_messages`] keeps the newest messages inside a token
//!   budget ([`TrimConfig`], [`estimate_tokens`]).
//! - **Streaming**: [`StreamEvent`] / [`StreamMode`]; token chunks are tagged
//!   with the producing node so callers print model output only.
//! - **Tools**: [`ToolSource`] with [`AggregateToolSource`] registry,
//!   [`TavilySearchTool`] (web search) and [`TodoTool`] (todo-item fetch).
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use bard::{
//!     build_react_agent, build_react_initial_state, AggregateToolSource, ChatOpenAI,
//!     MemorySaver, RunnableConfig, TodoTool,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tools = AggregateToolSource::new();
//! tools.register(Box::new(TodoTool::new())).await;
//! let specs = bard::ToolSource::list_tools(&tools).await?;
//!
//! let llm = Arc::new(ChatOpenAI::new("gpt-4o-mini").with_tools(specs));
//! let saver = Arc::new(MemorySaver::<bard::ReActState>::new());
//! let graph = build_react_agent(llm, Box::new(tools), Some(saver.clone()))?;
//!
//! let config = RunnableConfig::for_thread("demo");
//! let state = build_react_initial_state(
//!     "Fetch todo item 1, I pray thee.",
//!     Some(saver.as_ref()),
//!     Some(&config),
//!     Some("Thou art a helpful assistant."),
//! )
//! .await?;
//! let out = graph.invoke(state, Some(config)).await?;
//! println!("{}", out.last_assistant_reply().unwrap_or_default());
//! # Ok(())
//! # }
//! ```
//!
//! Interactive bot: `cargo run -p cli -- "What is the weather in Seoul?"`.
//! Examples: `react_stream`, `persona_chat` in the `bard-examples` crate.

pub mod agent;
pub mod error;
pub mod graph;
pub mod llm;
pub mod memory;
pub mod message;
pub mod state;
pub mod stream;
pub mod tool_source;
pub mod tools;
pub mod trim;

pub use agent::react::{
    build_react_agent, build_react_initial_state, tools_condition, ActNode, ObserveNode,
    ThinkNode, ToolsConditionResult, MAX_REACT_TURNS,
};
pub use error::AgentError;
pub use graph::{
    CompilationError, CompiledStateGraph, Next, Node, RunContext, StateGraph, END, START,
};
pub use llm::{ChatOpenAI, LlmClient, LlmResponse, LlmUsage, MockLlm, ToolChoiceMode};
pub use memory::{
    Checkpoint, CheckpointError, CheckpointListItem, CheckpointMetadata, CheckpointSource,
    Checkpointer, MemorySaver, RunnableConfig,
};
pub use message::Message;
pub use state::{ReActState, ToolCall, ToolResult};
pub use stream::{ChunkToStreamSender, MessageChunk, StreamEvent, StreamMetadata, StreamMode};
pub use tool_source::{MockToolSource, ToolCallContent, ToolSource, ToolSourceError, ToolSpec};
pub use tools::{
    AggregateToolSource, TavilySearchTool, TodoTool, Tool, TOOL_GET_TODO_ITEM, TOOL_SEARCH,
};
pub use trim::{estimate_tokens, trim_messages, TrimConfig};
