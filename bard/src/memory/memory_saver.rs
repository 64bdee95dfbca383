//! In-memory checkpointer. Not persistent; scoped to the process.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::memory::checkpoint::{Checkpoint, CheckpointListItem, CheckpointMetadata};
use crate::memory::checkpointer::{CheckpointError, Checkpointer};
use crate::memory::config::RunnableConfig;

/// In-memory checkpointer: each thread key holds its checkpoints, newest last.
pub struct MemorySaver<S> {
    by_thread: Arc<RwLock<HashMap<String, Vec<Checkpoint<S>>>>>,
}

impl<S> MemorySaver<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Creates an empty saver.
    pub fn new() -> Self {
        Self {
            by_thread: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn thread_key(config: &RunnableConfig) -> Result<String, CheckpointError> {
        let thread_id = config
            .thread_id
            .as_deref()
            .ok_or(CheckpointError::ThreadIdRequired)?;
        Ok(format!("{}:{}", thread_id, config.checkpoint_ns))
    }
}

impl<S> Default for MemorySaver<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S> Checkpointer<S> for MemorySaver<S>
where
    S: Clone + Send + Sync + 'static,
{
    async fn put(
        &self,
        config: &RunnableConfig,
        checkpoint: &Checkpoint<S>,
    ) -> Result<String, CheckpointError> {
        let key = Self::thread_key(config)?;
        let mut guard = self.by_thread.write().await;
        guard.entry(key).or_default().push(checkpoint.clone());
        Ok(checkpoint.id.clone())
    }

    async fn get_tuple(
        &self,
        config: &RunnableConfig,
    ) -> Result<Option<(Checkpoint<S>, CheckpointMetadata)>, CheckpointError> {
        let key = Self::thread_key(config)?;
        let guard = self.by_thread.read().await;
        let list = match guard.get(&key) {
            Some(l) if !l.is_empty() => l,
            _ => return Ok(None),
        };
        let found = match &config.checkpoint_id {
            Some(cid) => list.iter().find(|cp| &cp.id == cid),
            None => list.last(),
        };
        Ok(found.map(|cp| (cp.clone(), cp.metadata.clone())))
    }

    async fn list(
        &self,
        config: &RunnableConfig,
        limit: Option<usize>,
    ) -> Result<Vec<CheckpointListItem>, CheckpointError> {
        let key = Self::thread_key(config)?;
        let guard = self.by_thread.read().await;
        let mut items: Vec<CheckpointListItem> = guard
            .get(&key)
            .into_iter()
            .flatten()
            .map(|cp| CheckpointListItem {
                checkpoint_id: cp.id.clone(),
                metadata: cp.metadata.clone(),
            })
            .collect();
        if let Some(n) = limit {
            let len = items.len();
            if len > n {
                items = items.split_off(len - n);
            }
        }
        Ok(items)
    }
}
