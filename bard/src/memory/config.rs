//! Per-invoke config: which thread (and optionally which checkpoint) to use.

/// Config for a single invoke. Identifies the conversation thread.
///
/// When the graph was compiled with a checkpointer, `thread_id` selects the
/// conversation whose state is saved and restored.
#[derive(Debug, Clone, Default)]
pub struct RunnableConfig {
    /// Conversation/thread id. Required for checkpoint save and load.
    pub thread_id: Option<String>,
    /// Load this checkpoint instead of the latest one.
    pub checkpoint_id: Option<String>,
    /// Namespace for checkpoints; empty by default.
    pub checkpoint_ns: String,
}

impl RunnableConfig {
    /// Config for the given thread id, everything else default.
    pub fn for_thread(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: Some(thread_id.into()),
            ..Default::default()
        }
    }
}
