//! Run context passed into nodes for streaming-aware execution.

use std::collections::HashSet;
use std::fmt::Debug;

use tokio::sync::mpsc;

use crate::memory::RunnableConfig;
use crate::stream::{StreamEvent, StreamMode};

/// Context for one graph run: config plus optional streaming channel.
///
/// Nodes that implement `run_with_context` read `stream_mode` and send events
/// through `stream_tx` (e.g. the think node forwards LLM token chunks when
/// [`StreamMode::Messages`] is enabled).
#[derive(Clone)]
pub struct RunContext<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Config for the current run (thread_id, checkpoint selection).
    pub config: RunnableConfig,
    /// Sender for streaming events, set by `CompiledStateGraph::stream`.
    pub stream_tx: Option<mpsc::Sender<StreamEvent<S>>>,
    /// Enabled stream modes.
    pub stream_mode: HashSet<StreamMode>,
}

impl<S> RunContext<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Creates a context without streaming.
    pub fn new(config: RunnableConfig) -> Self {
        Self {
            config,
            stream_tx: None,
            stream_mode: HashSet::new(),
        }
    }

    /// True when the given mode is enabled and a sender is attached.
    pub fn emits(&self, mode: StreamMode) -> bool {
        self.stream_tx.is_some() && self.stream_mode.contains(&mode)
    }
}
