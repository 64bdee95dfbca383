//! Conversation memory: checkpoints keyed by thread id.
//!
//! A [`Checkpointer`] saves and loads state snapshots per
//! `(thread_id, checkpoint_ns)`. [`MemorySaver`] is the in-memory
//! implementation; checkpoints live for the process only and nothing is
//! written to disk.

mod checkpoint;
mod checkpointer;
mod config;
mod memory_saver;

pub use checkpoint::{Checkpoint, CheckpointListItem, CheckpointMetadata, CheckpointSource};
pub use checkpointer::{CheckpointError, Checkpointer};
pub use config::RunnableConfig;
pub use memory_saver::MemorySaver;
