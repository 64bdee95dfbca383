//! Think node: call the LLM over the conversation, record the reply and any
//! tool calls.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Next, Node, RunContext};
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;
use crate::state::ReActState;
use crate::stream::{ChunkToStreamSender, MessageChunk, StreamEvent, StreamMetadata, StreamMode};

pub struct ThinkNode {
    llm: Arc<dyn LlmClient>,
}

impl ThinkNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

fn apply_response(state: ReActState, response: LlmResponse) -> ReActState {
    let mut messages = state.messages;
    messages.push(Message::Assistant(response.content));
    ReActState {
        messages,
        tool_calls: response.tool_calls,
        tool_results: state.tool_results,
        turn_count: state.turn_count,
    }
}

#[async_trait]
impl Node<ReActState> for ThinkNode {
    fn id(&self) -> &str {
        "think"
    }

    async fn run(&self, state: ReActState) -> Result<(ReActState, Next), AgentError> {
        let response = self.llm.invoke(&state.messages).await?;
        Ok((apply_response(state, response), Next::Continue))
    }

    async fn run_with_context(
        &self,
        state: ReActState,
        ctx: &RunContext<ReActState>,
    ) -> Result<(ReActState, Next), AgentError> {
        if !ctx.emits(StreamMode::Messages) {
            return self.run(state).await;
        }
        let stream_tx = ctx.stream_tx.clone().expect("emits checked sender");

        let adapter = ChunkToStreamSender::new(stream_tx.clone(), self.id());
        let (chunk_tx, chunk_rx) = adapter.channel();

        // Forward chunks while the LLM call is in flight so tokens reach the
        // consumer as they arrive, not after the call returns.
        let (result, forwarded) = tokio::join!(
            self.llm.invoke_stream(&state.messages, Some(chunk_tx)),
            adapter.forward(chunk_rx),
        );
        let response = result?;

        // Clients that answer without incremental deltas still owe the stream
        // the assistant text.
        if forwarded == 0 && !response.content.is_empty() {
            let _ = stream_tx
                .send(StreamEvent::Messages {
                    chunk: MessageChunk {
                        content: response.content.clone(),
                    },
                    metadata: StreamMetadata {
                        node: self.id().to_string(),
                    },
                })
                .await;
        }

        if let Some(ref usage) = response.usage {
            let _ = stream_tx
                .send(StreamEvent::Usage {
                    prompt_tokens: usage.prompt_tokens,
                    completion_tokens: usage.completion_tokens,
                    total_tokens: usage.total_tokens,
                })
                .await;
        }

        Ok((apply_response(state, response), Next::Continue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use tokio::sync::mpsc;

    use crate::llm::MockLlm;
    use crate::memory::RunnableConfig;

    /// **Scenario**: run appends the assistant reply and records tool calls.
    #[tokio::test]
    async fn run_appends_assistant_and_tool_calls() {
        let llm = Arc::new(MockLlm::first_tool_then_end("search", "{}", "done"));
        let node = ThinkNode::new(llm);
        let state = ReActState {
            messages: vec![Message::user("what news?")],
            ..Default::default()
        };
        let (out, next) = node.run(state).await.unwrap();
        assert_eq!(next, Next::Continue);
        assert_eq!(out.messages.len(), 2);
        assert!(matches!(&out.messages[1], Message::Assistant(_)));
        assert_eq!(out.tool_calls.len(), 1);
        assert_eq!(out.tool_calls[0].name, "search");
    }

    /// **Scenario**: with Messages mode, chunks arrive tagged with node "think".
    #[tokio::test]
    async fn run_with_context_streams_chunks() {
        let llm = Arc::new(MockLlm::with_no_tool_calls("what light through yonder"));
        let node = ThinkNode::new(llm);

        let (tx, mut rx) = mpsc::channel(32);
        let mut ctx = RunContext::<ReActState>::new(RunnableConfig::default());
        ctx.stream_tx = Some(tx);
        ctx.stream_mode = HashSet::from([StreamMode::Messages]);

        let state = ReActState {
            messages: vec![Message::user("speak")],
            ..Default::default()
        };
        let (out, _) = node.run_with_context(state, &ctx).await.unwrap();
        drop(ctx);

        let mut streamed = String::new();
        while let Ok(event) = rx.try_recv() {
            if let StreamEvent::Messages { chunk, metadata } = event {
                assert_eq!(metadata.node, "think");
                streamed.push_str(&chunk.content);
            }
        }
        assert_eq!(streamed, "what light through yonder");
        assert_eq!(
            out.last_assistant_reply().as_deref(),
            Some("what light through yonder")
        );
    }
}
