//! Agent execution error.
//!
//! Returned by nodes and by graph invoke/stream when a step fails.

use thiserror::Error;

/// Error raised while running a node or a compiled graph.
#[derive(Debug, Error)]
pub enum AgentError {
    /// A step failed (LLM call, tool execution, malformed graph).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}
