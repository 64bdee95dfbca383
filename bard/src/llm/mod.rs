//! LLM client abstraction used by the think node.
//!
//! A client takes the conversation messages and returns assistant text plus
//! optional tool calls. [`ChatOpenAI`] talks to any OpenAI-compatible Chat
//! Completions endpoint; [`MockLlm`] returns canned responses for tests.
//!
//! Streaming: `invoke_stream` accepts an optional `Sender<MessageChunk>`; real
//! clients send tokens through it as they arrive, the default implementation
//! sends the full content as one chunk.

mod mock;
mod openai;

pub use mock::MockLlm;
pub use openai::ChatOpenAI;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::AgentError;
use crate::message::Message;
use crate::state::ToolCall;
use crate::stream::MessageChunk;

/// Tool choice mode when tools are present: model may choose (auto), must not
/// use tools (none), or must use them (required).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ToolChoiceMode {
    #[default]
    Auto,
    None,
    Required,
}

impl std::str::FromStr for ToolChoiceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "none" => Ok(Self::None),
            "required" => Ok(Self::Required),
            _ => Err(format!("unknown tool_choice: {} (use auto, none, or required)", s)),
        }
    }
}

/// Token usage for one completion, when the provider reports it.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct LlmUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Response from one completion: assistant text plus optional tool calls.
pub struct LlmResponse {
    /// Assistant message content.
    pub content: String,
    /// Tool calls for this turn; empty means the model answered directly.
    pub tool_calls: Vec<ToolCall>,
    /// Token usage, when available.
    pub usage: Option<LlmUsage>,
}

/// LLM client: messages in, assistant text and optional tool calls out.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// One completion over the given messages.
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError>;

    /// Streaming variant: when `chunk_tx` is set, send tokens through it as
    /// they arrive; still returns the complete response at the end.
    ///
    /// Default implementation calls `invoke` and sends the full content as a
    /// single chunk.
    async fn invoke_stream(
        &self,
        messages: &[Message],
        chunk_tx: Option<mpsc::Sender<MessageChunk>>,
    ) -> Result<LlmResponse, AgentError> {
        let response = self.invoke(messages).await?;
        if let Some(tx) = chunk_tx {
            if !response.content.is_empty() {
                let _ = tx
                    .send(MessageChunk {
                        content: response.content.clone(),
                    })
                    .await;
            }
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubLlm {
        content: String,
    }

    #[async_trait]
    impl LlmClient for StubLlm {
        async fn invoke(&self, _messages: &[Message]) -> Result<LlmResponse, AgentError> {
            Ok(LlmResponse {
                content: self.content.clone(),
                tool_calls: vec![],
                usage: None,
            })
        }
    }

    #[test]
    fn tool_choice_mode_parses_known_values() {
        assert_eq!("auto".parse::<ToolChoiceMode>().unwrap(), ToolChoiceMode::Auto);
        assert_eq!("NONE".parse::<ToolChoiceMode>().unwrap(), ToolChoiceMode::None);
        assert_eq!(
            "required".parse::<ToolChoiceMode>().unwrap(),
            ToolChoiceMode::Required
        );
        assert!("maybe".parse::<ToolChoiceMode>().is_err());
    }

    /// **Scenario**: default invoke_stream forwards the full content as one chunk.
    #[tokio::test]
    async fn default_invoke_stream_sends_single_chunk() {
        let llm = StubLlm {
            content: "hello".to_string(),
        };
        let (tx, mut rx) = mpsc::channel(2);
        let resp = llm.invoke_stream(&[], Some(tx)).await.unwrap();
        assert_eq!(resp.content, "hello");
        assert_eq!(rx.recv().await.expect("one chunk").content, "hello");
    }

    /// **Scenario**: empty content produces no chunk.
    #[tokio::test]
    async fn default_invoke_stream_skips_empty_content() {
        let llm = StubLlm {
            content: String::new(),
        };
        let (tx, mut rx) = mpsc::channel(2);
        llm.invoke_stream(&[], Some(tx)).await.unwrap();
        assert!(rx.try_recv().is_err());
    }
}
