//! Mock LLM for tests and offline runs.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;
use crate::state::ToolCall;
use crate::stream::MessageChunk;

/// Mock LLM: fixed assistant text and optional tool calls.
///
/// In stateful mode (`first_tools_then_end`) the first invoke returns the tool
/// call and later invokes return the closing text without tools, so a ReAct
/// graph runs exactly one tool round and then ends.
pub struct MockLlm {
    content: String,
    tool_calls: Vec<ToolCall>,
    /// When Some, invoke counts calls: first returns tool_calls, later returns second_content.
    call_count: Option<AtomicUsize>,
    second_content: Option<String>,
}

impl MockLlm {
    /// Fixed text, no tool calls: the graph ends after one think.
    pub fn with_no_tool_calls(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_calls: vec![],
            call_count: None,
            second_content: None,
        }
    }

    /// Fixed text plus the given tool calls on every invoke.
    pub fn new(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: content.into(),
            tool_calls,
            call_count: None,
            second_content: None,
        }
    }

    /// Stateful: first invoke calls the given tool, later invokes answer and end.
    pub fn first_tool_then_end(
        tool_name: impl Into<String>,
        arguments: impl Into<String>,
        closing: impl Into<String>,
    ) -> Self {
        Self {
            content: "I shall consult mine instruments.".to_string(),
            tool_calls: vec![ToolCall {
                name: tool_name.into(),
                arguments: arguments.into(),
                id: Some("call-1".to_string()),
            }],
            call_count: Some(AtomicUsize::new(0)),
            second_content: Some(closing.into()),
        }
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, _messages: &[Message]) -> Result<LlmResponse, AgentError> {
        if let Some(count) = &self.call_count {
            let n = count.fetch_add(1, Ordering::SeqCst);
            if n > 0 {
                return Ok(LlmResponse {
                    content: self
                        .second_content
                        .clone()
                        .unwrap_or_else(|| self.content.clone()),
                    tool_calls: vec![],
                    usage: None,
                });
            }
        }
        Ok(LlmResponse {
            content: self.content.clone(),
            tool_calls: self.tool_calls.clone(),
            usage: None,
        })
    }

    /// Streams the content one whitespace-separated word at a time, so stream
    /// consumers see multiple chunks without a real provider.
    async fn invoke_stream(
        &self,
        messages: &[Message],
        chunk_tx: Option<mpsc::Sender<MessageChunk>>,
    ) -> Result<LlmResponse, AgentError> {
        let response = self.invoke(messages).await?;
        if let Some(tx) = chunk_tx {
            let mut first = true;
            for word in response.content.split_whitespace() {
                let content = if first {
                    word.to_string()
                } else {
                    format!(" {}", word)
                };
                first = false;
                let _ = tx.send(MessageChunk { content }).await;
            }
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: stateful mock returns the tool call once, then the closing text.
    #[tokio::test]
    async fn first_tool_then_end_switches_after_first_call() {
        let llm = MockLlm::first_tool_then_end("get_todo_item", "{}", "Done, my liege.");
        let first = llm.invoke(&[]).await.unwrap();
        assert_eq!(first.tool_calls.len(), 1);
        assert_eq!(first.tool_calls[0].name, "get_todo_item");

        let second = llm.invoke(&[]).await.unwrap();
        assert!(second.tool_calls.is_empty());
        assert_eq!(second.content, "Done, my liege.");
    }

    /// **Scenario**: invoke_stream emits one chunk per word and reassembles the text.
    #[tokio::test]
    async fn invoke_stream_chunks_by_word() {
        let llm = MockLlm::with_no_tool_calls("fair is foul");
        let (tx, mut rx) = mpsc::channel(8);
        let resp = llm.invoke_stream(&[], Some(tx)).await.unwrap();
        assert_eq!(resp.content, "fair is foul");

        let mut joined = String::new();
        while let Ok(chunk) = rx.try_recv() {
            joined.push_str(&chunk.content);
        }
        assert_eq!(joined, "fair is foul");
    }
}
