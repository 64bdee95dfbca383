//! Streaming types for graph runs.
//!
//! `CompiledStateGraph::stream` emits [`StreamEvent`]s selected by
//! [`StreamMode`]. Token-level output arrives as `Messages` events tagged with
//! the producing node id, so callers can print model output only (and skip
//! tool-driven nodes).

use std::fmt::Debug;

use tokio::sync::mpsc;

/// Which kinds of events a stream emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamMode {
    /// Full state after each node completes.
    Values,
    /// Node id plus state after that node.
    Updates,
    /// LLM token chunks as they arrive.
    Messages,
}

/// One chunk of streamed message content.
#[derive(Clone, Debug)]
pub struct MessageChunk {
    pub content: String,
}

/// Metadata attached to streamed message chunks.
#[derive(Clone, Debug)]
pub struct StreamMetadata {
    /// Id of the node that produced the chunk (e.g. "think").
    pub node: String,
}

/// Event emitted while running a graph.
#[derive(Clone, Debug)]
pub enum StreamEvent<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Full state snapshot after a node finished.
    Values(S),
    /// Incremental update with the node id and state after that node.
    Updates { node_id: String, state: S },
    /// Message chunk from a node streaming LLM output.
    Messages {
        chunk: MessageChunk,
        metadata: StreamMetadata,
    },
    /// Token usage reported by the provider for the last completion.
    Usage {
        prompt_tokens: u32,
        completion_tokens: u32,
        total_tokens: u32,
    },
    /// The run failed; emitted last, before the stream closes.
    Error(String),
}

/// Adapter that forwards [`MessageChunk`]s into `StreamEvent::Messages`.
///
/// Used by nodes that stream LLM output: call [`channel`](Self::channel) to get
/// a chunk channel, pass the sender to `LlmClient::invoke_stream`, and await
/// [`forward`](Self::forward) alongside it with `tokio::join!` so every chunk
/// is forwarded before the node returns. `forward` returns the number of
/// chunks forwarded.
pub struct ChunkToStreamSender<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    stream_tx: mpsc::Sender<StreamEvent<S>>,
    node_id: String,
}

impl<S> ChunkToStreamSender<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    pub fn new(stream_tx: mpsc::Sender<StreamEvent<S>>, node_id: impl Into<String>) -> Self {
        Self {
            stream_tx,
            node_id: node_id.into(),
        }
    }

    /// Returns a fresh (chunk_tx, chunk_rx) pair for one LLM call.
    pub fn channel(&self) -> (mpsc::Sender<MessageChunk>, mpsc::Receiver<MessageChunk>) {
        mpsc::channel::<MessageChunk>(128)
    }

    /// Forwards chunks until the sender side closes; returns how many were sent.
    pub async fn forward(&self, mut chunk_rx: mpsc::Receiver<MessageChunk>) -> usize {
        let mut forwarded = 0;
        while let Some(chunk) = chunk_rx.recv().await {
            let event = StreamEvent::Messages {
                chunk,
                metadata: StreamMetadata {
                    node: self.node_id.clone(),
                },
            };
            if self.stream_tx.send(event).await.is_ok() {
                forwarded += 1;
            }
        }
        forwarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: chunks sent into the adapter come out as Messages events
    /// tagged with the node id, and forward reports the count.
    #[tokio::test]
    async fn forward_tags_chunks_with_node_id() {
        let (stream_tx, mut stream_rx) = mpsc::channel::<StreamEvent<i32>>(8);
        let adapter = ChunkToStreamSender::new(stream_tx, "think");
        let (chunk_tx, chunk_rx) = adapter.channel();

        let producer = async move {
            for text in ["To ", "be"] {
                chunk_tx
                    .send(MessageChunk {
                        content: text.to_string(),
                    })
                    .await
                    .unwrap();
            }
        };
        let (_, forwarded) = tokio::join!(producer, adapter.forward(chunk_rx));
        assert_eq!(forwarded, 2);

        let mut contents = Vec::new();
        while let Ok(event) = stream_rx.try_recv() {
            match event {
                StreamEvent::Messages { chunk, metadata } => {
                    assert_eq!(metadata.node, "think");
                    contents.push(chunk.content);
                }
                other => panic!("unexpected event {:?}", other),
            }
        }
        assert_eq!(contents.join(""), "To be");
    }
}
