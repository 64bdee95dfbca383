//! Single-node chat graph with a persona and message trimming.
//!
//! The state carries the conversation plus a `persona` string; the one model
//! node trims history to a token budget, prepends a persona-parameterized
//! Shakespearean system prompt, and appends the model's reply. Because the
//! whole state is checkpointed per thread, the persona set on the first turn
//! persists for the rest of the conversation. Tokens stream separated by `|`.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p bard-examples --example persona_chat
//! cargo run -p bard-examples --example persona_chat -- "jilted lover"
//! ```
//!
//! ## Environment
//!
//! - `OPENAI_API_KEY`: required (in `.env` or environment).
//! - `BARD_MODEL`: optional model override (default `gpt-4o-mini`).

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_stream::StreamExt;

use bard::{
    trim_messages, AgentError, ChatOpenAI, Checkpointer, ChunkToStreamSender, CompiledStateGraph,
    LlmClient, MemorySaver, Message, MessageChunk, Next, Node, RunContext, RunnableConfig,
    StateGraph, StreamEvent, StreamMetadata, StreamMode, TrimConfig, END, START,
};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct ChatState {
    messages: Vec<Message>,
    persona: String,
}

/// The single graph node: trim, prompt, complete, append.
struct ModelNode {
    llm: Arc<dyn LlmClient>,
    trim: TrimConfig,
}

impl ModelNode {
    fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            trim: TrimConfig::default(),
        }
    }

    /// System prompt plus the trimmed window of the conversation.
    fn prompt_messages(&self, state: &ChatState) -> Vec<Message> {
        let system = format!(
            "You talk in Shakespearean English. Answer all questions to the best of your \
             ability. Speak like a: {}.",
            state.persona
        );
        let mut messages = vec![Message::system(system)];
        messages.extend(trim_messages(&state.messages, &self.trim));
        messages
    }

    fn apply_reply(state: ChatState, content: String) -> ChatState {
        let mut messages = state.messages;
        messages.push(Message::assistant(content));
        ChatState {
            messages,
            persona: state.persona,
        }
    }
}

#[async_trait]
impl Node<ChatState> for ModelNode {
    fn id(&self) -> &str {
        "model"
    }

    async fn run(&self, state: ChatState) -> Result<(ChatState, Next), AgentError> {
        let response = self.llm.invoke(&self.prompt_messages(&state)).await?;
        Ok((Self::apply_reply(state, response.content), Next::Continue))
    }

    async fn run_with_context(
        &self,
        state: ChatState,
        ctx: &RunContext<ChatState>,
    ) -> Result<(ChatState, Next), AgentError> {
        if !ctx.emits(StreamMode::Messages) {
            return self.run(state).await;
        }
        let stream_tx = ctx.stream_tx.clone().expect("emits checked sender");

        let adapter = ChunkToStreamSender::new(stream_tx.clone(), self.id());
        let (chunk_tx, chunk_rx) = adapter.channel();
        let prompt = self.prompt_messages(&state);
        let (result, forwarded) = tokio::join!(
            self.llm.invoke_stream(&prompt, Some(chunk_tx)),
            adapter.forward(chunk_rx),
        );
        let response = result?;

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

        Ok((Self::apply_reply(state, response.content), Next::Continue))
    }
}

/// Builds the one-node graph compiled with the checkpointer.
fn build_chat_graph(
    llm: Arc<dyn LlmClient>,
    saver: Arc<MemorySaver<ChatState>>,
) -> Result<CompiledStateGraph<ChatState>, Box<dyn std::error::Error>> {
    let mut graph = StateGraph::<ChatState>::new();
    graph
        .add_node("model", Arc::new(ModelNode::new(llm)))
        .add_edge(START, "model")
        .add_edge("model", END);
    Ok(graph.compile_with_checkpointer(saver)?)
}

/// One turn: restore the thread state (persona included), append the query,
/// stream the reply.
async fn run_turn(
    graph: &CompiledStateGraph<ChatState>,
    saver: &MemorySaver<ChatState>,
    config: &RunnableConfig,
    query: &str,
    persona: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = match saver.get_tuple(config).await? {
        Some((checkpoint, _meta)) => checkpoint.state,
        None => ChatState {
            messages: vec![],
            persona: persona.to_string(),
        },
    };
    state.messages.push(Message::user(query));

    println!("User: {}", query);
    let mut stream = graph.stream(state, Some(config.clone()), [StreamMode::Messages]);
    while let Some(event) = stream.next().await {
        match event {
            StreamEvent::Messages { chunk, .. } => print!("{}|", chunk.content),
            StreamEvent::Error(e) => {
                eprintln!("\nError: {}", e);
                std::process::exit(1);
            }
            _ => {}
        }
    }
    println!("\n---");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let persona = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "jilted lover".to_string());
    let model = std::env::var("BARD_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
    let llm = Arc::new(ChatOpenAI::new(model));

    let saver = Arc::new(MemorySaver::<ChatState>::new());
    let graph = build_chat_graph(llm, saver.clone())?;
    let config = RunnableConfig::for_thread("persona-chat");

    // The persona is only needed on the first turn; afterwards it rides along
    // in the checkpointed state.
    run_turn(&graph, &saver, &config, "Hi! I'm Zach.", &persona).await?;
    run_turn(&graph, &saver, &config, "What is my name?", &persona).await?;

    Ok(())
}
