//! Checkpoint: a state snapshot with id, timestamp, and metadata.

use std::time::SystemTime;

/// Origin of a checkpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CheckpointSource {
    /// Created from the input to an invoke.
    #[default]
    Input,
    /// Created by the graph run loop reaching END.
    Loop,
    /// Created by a manual state update.
    Update,
    /// Created as a copy of another checkpoint.
    Fork,
}

/// Metadata stored alongside a checkpoint.
#[derive(Debug, Clone, Default)]
pub struct CheckpointMetadata {
    pub source: CheckpointSource,
    /// Step number within the run (-1 for input, 0+ for loop steps).
    pub step: i64,
    pub created_at: Option<SystemTime>,
}

/// One checkpoint: state snapshot plus id/ts/metadata.
///
/// Stored by a [`Checkpointer`](crate::memory::Checkpointer) keyed by
/// `(thread_id, checkpoint_ns, checkpoint_id)`.
#[derive(Debug, Clone)]
pub struct Checkpoint<S> {
    /// Unique checkpoint id (UUID v4).
    pub id: String,
    /// Milliseconds since epoch, as a string.
    pub ts: String,
    /// The graph state at the time of the checkpoint.
    pub state: S,
    pub metadata: CheckpointMetadata,
}

/// Summary item returned by `Checkpointer::list`.
#[derive(Debug, Clone)]
pub struct CheckpointListItem {
    pub checkpoint_id: String,
    pub metadata: CheckpointMetadata,
}

impl<S> Checkpoint<S> {
    /// Builds a checkpoint from the current state.
    pub fn from_state(state: S, source: CheckpointSource, step: i64) -> Self {
        let now = SystemTime::now();
        let ts = now
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0)
            .to_string();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            ts,
            state,
            metadata: CheckpointMetadata {
                source,
                step,
                created_at: Some(now),
            },
        }
    }
}
