//! Concrete tools and the registry that exposes them as a [`ToolSource`].
//!
//! - [`TavilySearchTool`]: web search via the Tavily REST API.
//! - [`TodoTool`]: fetch one todo item from the JSONPlaceholder REST API.
//! - [`AggregateToolSource`]: registry of `Box<dyn Tool>` implementing
//!   [`ToolSource`]; pass it to the act node.

mod registry;
mod tavily;
mod todo;

pub use registry::AggregateToolSource;
pub use tavily::{TavilySearchTool, TOOL_SEARCH};
pub use todo::{TodoTool, TOOL_GET_TODO_ITEM};

use async_trait::async_trait;
use serde_json::Value;

use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};

/// One callable tool: a name, a spec for the model, and an async call.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name; must match `spec().name`.
    fn name(&self) -> &str;

    /// Specification sent to the model.
    fn spec(&self) -> ToolSpec;

    /// Executes the tool with JSON arguments.
    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError>;
}
