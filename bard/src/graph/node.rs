//! Graph node trait: one step in a state graph.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::AgentError;

use super::{Next, RunContext};

/// One step in a graph: state in, (state out, next step).
///
/// The runner uses the returned [`Next`] to choose the following node unless
/// the node has conditional edges, which take precedence.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Node id (e.g. `"think"`, `"act"`). Unique within a graph.
    fn id(&self) -> &str;

    /// One step: state in, (state out, next step).
    async fn run(&self, state: S) -> Result<(S, Next), AgentError>;

    /// Variant with run context (streaming, config). Defaults to `run`.
    async fn run_with_context(
        &self,
        state: S,
        _ctx: &RunContext<S>,
    ) -> Result<(S, Next), AgentError> {
        self.run(state).await
    }
}
