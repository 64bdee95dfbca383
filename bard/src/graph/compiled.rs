//! Compiled graph: immutable, supports invoke and stream.
//!
//! Built by `StateGraph::compile`. Runs from the first node, following each
//! node's returned [`Next`] or the conditional router attached to that node.
//! With a checkpointer and `config.thread_id`, the final state is saved when
//! the run reaches END.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, error};

use crate::error::AgentError;
use crate::memory::{Checkpoint, CheckpointSource, Checkpointer, RunnableConfig};
use crate::stream::{StreamEvent, StreamMode};

use super::state_graph::END;
use super::{Next, NextEntry, Node, RunContext};

/// Executable graph produced by `StateGraph::compile`.
#[derive(Clone)]
pub struct CompiledStateGraph<S> {
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// Entry node (target of the START edge).
    pub(super) first_node_id: String,
    /// Node id -> fixed edge or conditional router.
    pub(super) next_map: HashMap<String, NextEntry<S>>,
    pub(super) checkpointer: Option<Arc<dyn Checkpointer<S>>>,
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Shared run loop for invoke and stream: steps through nodes until END.
    async fn run_loop(
        &self,
        state: &mut S,
        config: &Option<RunnableConfig>,
        ctx: &RunContext<S>,
    ) -> Result<(), AgentError> {
        let mut current_id = self.first_node_id.clone();
        let mut step: i64 = 0;
        debug!("graph run start");

        loop {
            let node = self
                .nodes
                .get(&current_id)
                .ok_or_else(|| {
                    AgentError::ExecutionFailed(format!("unknown node: {}", current_id))
                })?
                .clone();

            debug!(node = %current_id, step, "node start");
            let (new_state, next) = match node.run_with_context(state.clone(), ctx).await {
                Ok(out) => out,
                Err(e) => {
                    error!(node = %current_id, error = %e, "node failed");
                    return Err(e);
                }
            };
            *state = new_state;
            step += 1;

            if let Some(tx) = &ctx.stream_tx {
                if ctx.stream_mode.contains(&StreamMode::Values) {
                    let _ = tx.send(StreamEvent::Values(state.clone())).await;
                }
                if ctx.stream_mode.contains(&StreamMode::Updates) {
                    let _ = tx
                        .send(StreamEvent::Updates {
                            node_id: current_id.clone(),
                            state: state.clone(),
                        })
                        .await;
                }
            }

            let next_id: Option<String> = match self.next_map.get(&current_id) {
                Some(NextEntry::Conditional(router)) => {
                    let target = router.resolve_next(state);
                    debug!(from = %current_id, to = %target, "conditional routing");
                    Some(target)
                }
                entry => match next {
                    Next::End => None,
                    Next::Node(id) => Some(id),
                    Next::Continue => match entry {
                        Some(NextEntry::Unconditional(id)) => Some(id.clone()),
                        _ => None,
                    },
                },
            };

            match next_id {
                Some(id) if id != END => current_id = id,
                _ => {
                    self.save_checkpoint(state, config, step).await;
                    debug!("graph run complete");
                    return Ok(());
                }
            }
        }
    }

    async fn save_checkpoint(&self, state: &S, config: &Option<RunnableConfig>, step: i64) {
        if let (Some(cp), Some(cfg)) = (&self.checkpointer, config) {
            if cfg.thread_id.is_some() {
                let checkpoint = Checkpoint::from_state(state.clone(), CheckpointSource::Loop, step);
                if let Err(e) = cp.put(cfg, &checkpoint).await {
                    error!(error = %e, "checkpoint save failed");
                }
            }
        }
    }

    /// Runs the graph to completion and returns the final state.
    ///
    /// With `config.thread_id` and a checkpointer, the final state is saved
    /// after the run so the next invoke on the same thread can resume from it.
    pub async fn invoke(&self, state: S, config: Option<RunnableConfig>) -> Result<S, AgentError> {
        if !self.nodes.contains_key(&self.first_node_id) {
            return Err(AgentError::ExecutionFailed("empty graph".into()));
        }
        let ctx = RunContext::new(config.clone().unwrap_or_default());
        let mut state = state;
        self.run_loop(&mut state, &config, &ctx).await?;
        Ok(state)
    }

    /// Runs the graph in a spawned task, emitting [`StreamEvent`]s as it goes.
    ///
    /// A run failure is emitted as [`StreamEvent::Error`] before the stream
    /// closes, so consumers can report it and keep going.
    pub fn stream(
        &self,
        state: S,
        config: Option<RunnableConfig>,
        stream_mode: impl Into<HashSet<StreamMode>>,
    ) -> ReceiverStream<StreamEvent<S>> {
        let (tx, rx) = mpsc::channel(128);
        let graph = self.clone();
        let modes: HashSet<StreamMode> = stream_mode.into();

        tokio::spawn(async move {
            if !graph.nodes.contains_key(&graph.first_node_id) {
                return;
            }
            let mut ctx = RunContext::new(config.clone().unwrap_or_default());
            ctx.stream_tx = Some(tx.clone());
            ctx.stream_mode = modes;

            let mut state = state;
            if let Err(e) = graph.run_loop(&mut state, &config, &ctx).await {
                let _ = tx.send(StreamEvent::Error(e.to_string())).await;
            }
        });

        ReceiverStream::new(rx)
    }
}
